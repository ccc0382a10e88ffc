// API client module: a small blocking HTTP client for the two upstream
// services (token analyst and scenario engine). One attempt per call,
// no retries.
//
// Every call path shares the same body policy: non-2xx answers become
// `CliError::Status` with the upstream `error`/`message` text when there
// is one, and bodies that are not JSON become `CliError::InvalidJson`
// carrying the raw text.

use crate::config::{AnalystEndpoint, AnalystMode, ScenarioEndpoint, ScenarioMode};
use crate::error::{CliError, CliResult};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{StatusCode, Url};
use serde::Serialize;
use serde_json::{json, Value};

pub const CHANNEL: &str = "aexus-cli";

/// Blocking client shared by the commands.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> CliResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("aexus-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        ApiClient { client }
    }

    pub fn get_json(&self, url: Url, headers: HeaderMap) -> CliResult<Value> {
        debug!("GET {}", url);
        let res = self.client.get(url).headers(headers).send()?;
        let status = res.status();
        let text = res.text()?;
        interpret_response(status, text)
    }

    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        headers: HeaderMap,
        body: &B,
    ) -> CliResult<Value> {
        debug!("POST {}", url);
        let res = self.client.post(url).headers(headers).json(body).send()?;
        let status = res.status();
        let text = res.text()?;
        interpret_response(status, text)
    }

    /// Fetch the raw token-analysis document for `mint`.
    pub fn fetch_token_analysis(&self, endpoint: &AnalystEndpoint, mint: &str) -> CliResult<Value> {
        let mint = mint.trim();
        if mint.is_empty() {
            return Err(CliError::EmptyInput("Token mint is required".into()));
        }
        let url = analyst_url(endpoint, mint)?;
        self.get_json(url, analyst_headers(endpoint)?)
    }

    /// Submit a what-if prompt and return the raw engine answer.
    pub fn run_scenario_engine(
        &self,
        endpoint: &ScenarioEndpoint,
        prompt: &str,
        user_id: Option<&str>,
    ) -> CliResult<Value> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(CliError::EmptyInput("Scenario prompt is required".into()));
        }
        let url = parse_url(&endpoint.url)?;
        let body = scenario_body(endpoint.mode, prompt, user_id);
        self.post_json(url, scenario_headers(endpoint)?, &body)
    }
}

fn parse_url(raw: &str) -> CliResult<Url> {
    Url::parse(raw.trim()).map_err(|e| CliError::InvalidUrl(format!("{}: {}", raw.trim(), e)))
}

fn header_value(name: &str, value: &str) -> CliResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| CliError::InvalidHeader(name.to_string()))
}

/// Query mode appends `tokenAddress=<mint>`; path mode appends the mint
/// as a percent-encoded path segment.
pub fn analyst_url(endpoint: &AnalystEndpoint, mint: &str) -> CliResult<Url> {
    let mut url = parse_url(&endpoint.url)?;
    match endpoint.mode {
        AnalystMode::Query => {
            url.query_pairs_mut().append_pair("tokenAddress", mint);
        }
        AnalystMode::Path => {
            url.path_segments_mut()
                .map_err(|_| CliError::InvalidUrl(endpoint.url.clone()))?
                .pop_if_empty()
                .push(mint);
        }
    }
    Ok(url)
}

pub fn analyst_headers(endpoint: &AnalystEndpoint) -> CliResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = &endpoint.api_key {
        headers.insert(HeaderName::from_static("api-key"), header_value("api-key", key)?);
    }
    Ok(headers)
}

pub fn scenario_headers(endpoint: &ScenarioEndpoint) -> CliResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(key) = &endpoint.api_key {
        headers.insert(AUTHORIZATION, header_value("authorization", key)?);
    }
    Ok(headers)
}

/// Request body for the scenario endpoint.
pub fn scenario_body(mode: ScenarioMode, prompt: &str, user_id: Option<&str>) -> Value {
    match mode {
        ScenarioMode::Engine => json!({ "input": prompt }),
        ScenarioMode::Gateway => json!({
            "prompt": prompt,
            "userId": user_id,
            "channel": CHANNEL,
            "context": { "kind": "scenario", "client": "cli" },
        }),
    }
}

/// Upstream error text from a JSON error body, if it carries one.
pub fn upstream_error_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|key| {
        body.get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Apply the status/body policy to a received response.
pub fn interpret_response(status: StatusCode, text: String) -> CliResult<Value> {
    let parsed = serde_json::from_str::<Value>(&text);

    if !status.is_success() {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(upstream_error_message)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("")
                )
                .trim_end()
                .to_string()
            });
        return Err(CliError::Status {
            status: status.as_u16(),
            message,
        });
    }

    parsed.map_err(|_| CliError::InvalidJson { body: text })
}
