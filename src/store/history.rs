// Activity history: scenario runs and token scans in one document,
// newest first, each list capped at HISTORY_LIMIT.

use super::{read_json, write_json};
use crate::error::CliResult;
use chrono::{DateTime, Utc};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioHistoryRecord {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalystHistoryRecord {
    pub id: String,
    pub mint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryFile {
    pub scenarios: Vec<ScenarioHistoryRecord>,
    pub analyst: Vec<AnalystHistoryRecord>,
}

/// On-disk shape before individual records are checked.
#[derive(Deserialize)]
struct RawHistoryFile {
    scenarios: Vec<Value>,
    analyst: Vec<Value>,
}

/// Keep the records that parse; drop the rest one at a time.
fn parse_records<T: DeserializeOwned>(list: &str, raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping malformed {} history entry {}: {}", list, i, e);
                None
            }
        })
        .collect()
}

fn newest_first<T>(list: &mut Vec<T>, record: T) {
    list.insert(0, record);
    list.truncate(HISTORY_LIMIT);
}

fn limited<T>(mut records: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(n) = limit.filter(|n| *n > 0) {
        records.truncate(n);
    }
    records
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        HistoryStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole document. A missing file, or one without both arrays, reads
    /// as empty; malformed entries inside the arrays are skipped.
    pub fn read(&self) -> HistoryFile {
        match read_json::<RawHistoryFile>(&self.path) {
            Some(raw) => HistoryFile {
                scenarios: parse_records("scenario", raw.scenarios),
                analyst: parse_records("analyst", raw.analyst),
            },
            None => HistoryFile::default(),
        }
    }

    pub fn append_scenario(
        &self,
        prompt: &str,
        sentiment_label: Option<&str>,
        points: Option<u32>,
    ) -> CliResult<ScenarioHistoryRecord> {
        let record = ScenarioHistoryRecord {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            sentiment_label: sentiment_label.map(str::to_string),
            points,
            created_at: Utc::now(),
        };
        let mut file = self.read();
        newest_first(&mut file.scenarios, record.clone());
        write_json(&self.path, &file)?;
        Ok(record)
    }

    pub fn append_analyst(
        &self,
        mint: &str,
        symbol: Option<&str>,
    ) -> CliResult<AnalystHistoryRecord> {
        let record = AnalystHistoryRecord {
            id: Uuid::new_v4().to_string(),
            mint: mint.to_string(),
            symbol: symbol.map(str::to_string),
            created_at: Utc::now(),
        };
        let mut file = self.read();
        newest_first(&mut file.analyst, record.clone());
        write_json(&self.path, &file)?;
        Ok(record)
    }

    /// Newest first. `None` or `Some(0)` returns everything.
    pub fn list_scenarios(&self, limit: Option<usize>) -> Vec<ScenarioHistoryRecord> {
        limited(self.read().scenarios, limit)
    }

    pub fn list_analyst(&self, limit: Option<usize>) -> Vec<AnalystHistoryRecord> {
        limited(self.read().analyst, limit)
    }

    pub fn clear(&self) -> CliResult<()> {
        write_json(&self.path, &HistoryFile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_caps_length() {
        let mut list: Vec<usize> = (0..HISTORY_LIMIT).collect();
        newest_first(&mut list, 999);
        assert_eq!(list.len(), HISTORY_LIMIT);
        assert_eq!(list[0], 999);
        assert_eq!(list[HISTORY_LIMIT - 1], HISTORY_LIMIT - 2);
    }

    #[test]
    fn bad_records_are_skipped_individually() {
        let raw = vec![
            serde_json::json!({"id": "a", "prompt": "ok", "createdAt": "2024-01-01T00:00:00Z"}),
            serde_json::json!({"id": "b", "prompt": "bad", "points": 7.5, "createdAt": "2024-01-01T00:00:00Z"}),
            serde_json::json!({"id": "c", "prompt": "no timestamp"}),
        ];
        let kept: Vec<ScenarioHistoryRecord> = parse_records("scenario", raw);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
    }

    #[test]
    fn limit_zero_means_all() {
        assert_eq!(limited(vec![1, 2, 3], Some(0)), vec![1, 2, 3]);
        assert_eq!(limited(vec![1, 2, 3], Some(2)), vec![1, 2]);
        assert_eq!(limited(vec![1, 2, 3], Some(9)), vec![1, 2, 3]);
        assert_eq!(limited(vec![1, 2, 3], None), vec![1, 2, 3]);
    }
}
