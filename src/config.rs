// Configuration resolver: a `.env` file in the working directory merged
// with the process environment. File values win over the environment for
// the same key; blank values count as unset.

use crate::error::{CliError, CliResult};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::Path;

pub const TOKEN_ANALYST_URL: &str = "AEXUS_TOKEN_ANALYST_URL";
pub const SCENARIO_ENGINE_URL: &str = "AEXUS_SCENARIO_ENGINE_URL";
pub const ANALYST_BASE_URL: &str = "AEXUS_ANALYST_BASE_URL";
pub const ANALYST_API_KEY: &str = "AEXUS_ANALYST_API_KEY";
pub const PORTAL_BASE_URL: &str = "AEXUS_PORTAL_BASE_URL";
pub const API_URL: &str = "AEXUS_API_URL";
pub const API_KEY: &str = "AEXUS_API_KEY";

/// Resolved key/value configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

/// How the token analyst service is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalystMode {
    /// `GET <url>?tokenAddress=<mint>`
    Query,
    /// `GET <base>/<mint>` with an optional `api-key` header.
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalystEndpoint {
    pub url: String,
    pub mode: AnalystMode,
    pub api_key: Option<String>,
}

/// How the scenario engine is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioMode {
    /// Direct engine endpoint, body `{input}`.
    Engine,
    /// API gateway, body `{prompt, userId, channel, context}`.
    Gateway,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioEndpoint {
    pub url: String,
    pub mode: ScenarioMode,
    pub api_key: Option<String>,
}

impl Config {
    /// Load `.env` from the current directory and merge it over the
    /// process environment.
    pub fn load() -> Self {
        let file_values = read_env_file(Path::new(".env"));
        Self::from_sources(file_values, std::env::vars())
    }

    /// Merge explicit sources. Entries from `file` override `env`.
    pub fn from_sources<F, E>(file: F, env: E) -> Self
    where
        F: IntoIterator<Item = (String, String)>,
        E: IntoIterator<Item = (String, String)>,
    {
        let mut values: HashMap<String, String> = env.into_iter().collect();
        for (key, value) in file {
            values.insert(key, value);
        }
        Config { values }
    }

    /// Raw lookup. Returns `None` for unset or blank values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn token_analyst_url(&self) -> Option<&str> {
        self.get(TOKEN_ANALYST_URL)
    }

    pub fn scenario_engine_url(&self) -> Option<&str> {
        self.get(SCENARIO_ENGINE_URL)
    }

    pub fn analyst_base_url(&self) -> Option<&str> {
        self.get(ANALYST_BASE_URL)
    }

    pub fn analyst_api_key(&self) -> Option<&str> {
        self.get(ANALYST_API_KEY)
    }

    pub fn portal_base_url(&self) -> Option<&str> {
        self.get(PORTAL_BASE_URL)
    }

    pub fn api_url(&self) -> Option<&str> {
        self.get(API_URL)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.get(API_KEY)
    }

    /// Pick the analyst endpoint. The query-style URL takes priority over
    /// the path-style base.
    pub fn analyst_endpoint(&self) -> CliResult<AnalystEndpoint> {
        if let Some(url) = self.token_analyst_url() {
            return Ok(AnalystEndpoint {
                url: url.to_string(),
                mode: AnalystMode::Query,
                api_key: None,
            });
        }
        if let Some(base) = self.analyst_base_url() {
            return Ok(AnalystEndpoint {
                url: base.to_string(),
                mode: AnalystMode::Path,
                api_key: self.analyst_api_key().map(str::to_string),
            });
        }
        Err(CliError::MissingConfig(format!(
            "Token analyst endpoint ({} or {})",
            TOKEN_ANALYST_URL, ANALYST_BASE_URL
        )))
    }

    /// Pick the scenario endpoint. The direct engine URL takes priority
    /// over the API gateway.
    pub fn scenario_endpoint(&self) -> CliResult<ScenarioEndpoint> {
        let api_key = self.api_key().map(str::to_string);
        if let Some(url) = self.scenario_engine_url() {
            return Ok(ScenarioEndpoint {
                url: url.to_string(),
                mode: ScenarioMode::Engine,
                api_key,
            });
        }
        if let Some(url) = self.api_url() {
            return Ok(ScenarioEndpoint {
                url: url.to_string(),
                mode: ScenarioMode::Gateway,
                api_key,
            });
        }
        Err(CliError::MissingConfig(format!(
            "Scenario endpoint ({} or {})",
            SCENARIO_ENGINE_URL, API_URL
        )))
    }
}

/// Read `key=value` pairs from an env file. A missing file yields nothing;
/// malformed lines are skipped.
pub fn read_env_file(path: &Path) -> Vec<(String, String)> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            if !e.not_found() {
                warn!("Could not read {}: {}", path.display(), e);
            }
            return Vec::new();
        }
    };

    let mut pairs = Vec::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                let key = key.trim().to_string();
                if key.is_empty() {
                    continue;
                }
                pairs.push((key, value.trim().to_string()));
            }
            Err(e) => warn!("Skipping malformed line in {}: {}", path.display(), e),
        }
    }
    debug!("Loaded {} entries from {}", pairs.len(), path.display());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn file_values_override_environment() {
        let cfg = Config::from_sources(
            pairs(&[(API_KEY, "from-file")]),
            pairs(&[(API_KEY, "from-env"), (API_URL, "http://env")]),
        );
        assert_eq!(cfg.api_key(), Some("from-file"));
        assert_eq!(cfg.api_url(), Some("http://env"));
    }

    #[test]
    fn blank_values_are_unset() {
        let cfg = Config::from_sources(pairs(&[(PORTAL_BASE_URL, "   ")]), Vec::new());
        assert_eq!(cfg.portal_base_url(), None);
    }

    #[test]
    fn analyst_query_url_wins_over_base() {
        let cfg = Config::from_sources(
            pairs(&[
                (TOKEN_ANALYST_URL, "http://q"),
                (ANALYST_BASE_URL, "http://p"),
                (ANALYST_API_KEY, "k"),
            ]),
            Vec::new(),
        );
        let ep = cfg.analyst_endpoint().unwrap();
        assert_eq!(ep.mode, AnalystMode::Query);
        assert_eq!(ep.url, "http://q");
        assert_eq!(ep.api_key, None);
    }

    #[test]
    fn analyst_path_mode_carries_key() {
        let cfg = Config::from_sources(
            pairs(&[(ANALYST_BASE_URL, " http://p/ "), (ANALYST_API_KEY, "k")]),
            Vec::new(),
        );
        let ep = cfg.analyst_endpoint().unwrap();
        assert_eq!(ep.mode, AnalystMode::Path);
        assert_eq!(ep.url, "http://p/");
        assert_eq!(ep.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn missing_endpoints_are_config_errors() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.analyst_endpoint(),
            Err(CliError::MissingConfig(_))
        ));
        assert!(matches!(
            cfg.scenario_endpoint(),
            Err(CliError::MissingConfig(_))
        ));
    }

    #[test]
    fn scenario_falls_back_to_gateway() {
        let cfg = Config::from_sources(
            pairs(&[(API_URL, "http://gw"), (API_KEY, "secret")]),
            Vec::new(),
        );
        let ep = cfg.scenario_endpoint().unwrap();
        assert_eq!(ep.mode, ScenarioMode::Gateway);
        assert_eq!(ep.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn env_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}=http://localhost:9000", SCENARIO_ENGINE_URL).unwrap();
        let read = read_env_file(file.path());
        assert_eq!(
            read,
            pairs(&[(SCENARIO_ENGINE_URL, "http://localhost:9000")])
        );
    }

    #[test]
    fn missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_env_file(&dir.path().join(".env")).is_empty());
    }
}
