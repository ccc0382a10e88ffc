// Identity session: at most one, overwritten on each save.

use super::{read_json, write_json};
use crate::error::CliResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(handle: &str, display_name: &str) -> Self {
        UserSession {
            id: Uuid::new_v4().to_string(),
            handle: handle.to_string(),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        SessionStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<UserSession> {
        read_json(&self.path)
    }

    pub fn save(&self, session: &UserSession) -> CliResult<()> {
        write_json(&self.path, session)
    }

    /// Remove the session file. Returns whether one existed.
    pub fn clear(&self) -> CliResult<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
