//! Local state: progression points, the identity session and the
//! activity history. Each store is a small JSON document rewritten in
//! full on every save. Concurrent invocations are not coordinated; the
//! last writer wins.

pub mod history;
pub mod points;
pub mod session;

pub use history::{
    AnalystHistoryRecord, HistoryFile, HistoryStore, ScenarioHistoryRecord, HISTORY_LIMIT,
};
pub use points::{PointsSnapshot, PointsStore};
pub use session::{SessionStore, UserSession};

use crate::error::CliResult;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const POINTS_DIR: &str = ".aexus";
const CLI_DIR: &str = ".aexus-cli";

/// Where each state file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDirs {
    pub points_dir: PathBuf,
    pub cli_dir: PathBuf,
}

impl StateDirs {
    /// Resolve under the user's home directory, or the working directory
    /// when no home is known.
    pub fn from_home() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::under(&home)
    }

    pub fn under(root: &Path) -> Self {
        StateDirs {
            points_dir: root.join(POINTS_DIR),
            cli_dir: root.join(CLI_DIR),
        }
    }

    pub fn points(&self) -> PointsStore {
        PointsStore::new(self.points_dir.join("points.json"))
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.cli_dir.join("session.json"))
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(self.cli_dir.join("history.json"))
    }
}

/// Read a JSON document. Missing files read as `None`; unreadable or
/// corrupt ones are logged and also read as `None`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No state file at {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt state file {}: {}", path.display(), e);
            None
        }
    }
}

/// Pretty-print `value` to `path`, creating parent directories.
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_string_pretty(value)?;
    std::fs::write(path, payload)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_dirs_layout() {
        let dirs = StateDirs::under(Path::new("/home/op"));
        assert_eq!(dirs.points_dir, PathBuf::from("/home/op/.aexus"));
        assert_eq!(dirs.cli_dir, PathBuf::from("/home/op/.aexus-cli"));
        assert_eq!(
            dirs.history().path(),
            Path::new("/home/op/.aexus-cli/history.json")
        );
    }

    #[test]
    fn corrupt_json_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(read_json::<serde_json::Value>(&path).is_none());
        assert!(read_json::<serde_json::Value>(&dir.path().join("missing.json")).is_none());
    }

    #[test]
    fn write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b.json");
        write_json(&path, &serde_json::json!({"ok": true})).unwrap();
        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back["ok"], true);
    }
}
