use std::path::{Path, PathBuf};

use crate::prayer::{prayer_from_snapshot, PrayerData};
use crate::Result;

/// Single last-known-good snapshot of the published list
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot; a missing or unreadable file yields `None`
    pub fn load(&self) -> Option<PrayerData> {
        if !self.path.exists() {
            return None;
        }
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to read cached prayer list");
                return None;
            }
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => Some(prayer_from_snapshot(&value)),
            Err(e) => {
                tracing::warn!(error = %e, "Cached prayer list is not valid JSON");
                None
            }
        }
    }

    pub fn save(&self, data: &PrayerData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string(data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
