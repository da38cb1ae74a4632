//! JSON export of scored worlds for map and narrative consumers

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::world::{World, WorldSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub sequence: u64,
    pub written_at: DateTime<Utc>,
    pub seed: u64,
    pub unit_count: usize,
    pub facility_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub metadata: SnapshotMetadata,
    pub world: WorldSnapshot,
}

/// Writes `<output_dir>/<city-slug>/snapshot_NNNN.json`.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    next_sequence: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            next_sequence: 1,
        }
    }

    pub fn write(&mut self, world: &World, seed: u64) -> Result<PathBuf, SnapshotError> {
        let sequence = self.next_sequence;
        let dir = self.output_dir.join(world.city().slug());
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("snapshot_{sequence:04}.json"));

        let file = SnapshotFile {
            metadata: SnapshotMetadata {
                sequence,
                written_at: Utc::now(),
                seed,
                unit_count: world.units().len(),
                facility_count: world.facilities().len(),
            },
            world: world.snapshot(),
        };
        fs::write(&path, serde_json::to_string_pretty(&file)?)?;

        self.next_sequence += 1;
        tracing::debug!(
            target: "synthequity::snapshot",
            path = %path.display(),
            "snapshot written"
        );
        Ok(path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<SnapshotFile, SnapshotError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Snapshot files under `output_dir`, sorted by path.
    pub fn list(&self) -> Result<Vec<PathBuf>, SnapshotError> {
        let mut snapshots = Vec::new();
        if !self.output_dir.exists() {
            return Ok(snapshots);
        }

        for city_dir in fs::read_dir(&self.output_dir)? {
            let city_dir = city_dir?.path();
            if !city_dir.is_dir() {
                continue;
            }
            for entry in fs::read_dir(&city_dir)? {
                let path = entry?.path();
                if is_snapshot_file(&path) {
                    snapshots.push(path);
                }
            }
        }

        snapshots.sort();
        Ok(snapshots)
    }
}

fn is_snapshot_file(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.starts_with("snapshot_") && name.ends_with(".json"),
        None => false,
    }
}
