// Progression points: one snapshot for the active identity.

use super::{read_json, write_json};
use crate::error::CliResult;
use crate::progression::{compute_rank, PointsDelta, PointsSource, Rank};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsSnapshot {
    pub id: String,
    pub points: u64,
    pub rank_title: String,
    pub last_updated: DateTime<Utc>,
}

impl PointsSnapshot {
    pub fn fresh(id: &str) -> Self {
        PointsSnapshot {
            id: id.to_string(),
            points: 0,
            rank_title: Rank::Initiate.title().to_string(),
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PointsStore {
    path: PathBuf,
}

impl PointsStore {
    pub fn new(path: PathBuf) -> Self {
        PointsStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot for `id`. A missing or corrupt file, or one that belongs
    /// to another identity, reads as a fresh zero-point snapshot.
    pub fn load(&self, id: &str) -> PointsSnapshot {
        match read_json::<PointsSnapshot>(&self.path) {
            Some(snapshot) if snapshot.id == id => snapshot,
            _ => PointsSnapshot::fresh(id),
        }
    }

    pub fn save(&self, snapshot: &PointsSnapshot) -> CliResult<()> {
        write_json(&self.path, snapshot)
    }

    /// Read, adjust by `change` (floored at zero), re-rank and write back.
    pub fn apply(
        &self,
        id: &str,
        change: i64,
        source: PointsSource,
        label: &str,
    ) -> CliResult<(PointsSnapshot, PointsDelta)> {
        let current = self.load(id);
        let delta = PointsDelta::apply(current.points, change, source, label);
        let updated = PointsSnapshot {
            id: current.id,
            points: delta.new,
            rank_title: compute_rank(delta.new).title().to_string(),
            last_updated: delta.created_at,
        };
        self.save(&updated)?;
        info!(
            "Points for {}: {} -> {} ({:?})",
            updated.id, delta.previous, delta.new, source
        );
        Ok((updated, delta))
    }
}
