// File-backed key/value storage for the local overlay
use crate::application::overlay_store::{LocalOverlay, OverlayStore};
use crate::domain::error::DashboardError;
use crate::infrastructure::local_files::{read_if_exists, write_atomically};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A JSON object on disk holding one overlay under `key`; other keys are left alone.
#[derive(Debug, Clone)]
pub struct FileOverlayStore {
    path: PathBuf,
    key: String,
}

impl FileOverlayStore {
    pub fn new(path: PathBuf, key: String) -> Self {
        Self { path, key }
    }

    async fn read_entries(&self) -> Result<Option<Map<String, Value>>, DashboardError> {
        let contents = read_if_exists(&self.path)
            .await
            .map_err(|e| DashboardError::Storage(format!("{}: {}", self.path.display(), e)))?;

        match contents {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OverlayStore for FileOverlayStore {
    async fn load(&self) -> LocalOverlay {
        let entries = match self.read_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                tracing::info!("No local overlay at {}", self.path.display());
                return LocalOverlay::default();
            }
            Err(e) => {
                tracing::warn!("Invalid local overlay storage, starting empty: {}", e);
                return LocalOverlay::default();
            }
        };

        let Some(value) = entries.get(&self.key) else {
            tracing::info!("No '{}' entry in local overlay storage", self.key);
            return LocalOverlay::default();
        };

        match serde_json::from_value::<LocalOverlay>(value.clone()) {
            Ok(overlay) => {
                tracing::debug!(
                    "Loaded local overlay: {} classes, {} announcements",
                    overlay.classes.len(),
                    overlay.announcements.len()
                );
                overlay
            }
            Err(e) => {
                tracing::warn!("Invalid local overlay data under '{}': {}", self.key, e);
                LocalOverlay::default()
            }
        }
    }

    async fn save(&self, overlay: &LocalOverlay) -> Result<(), DashboardError> {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Replacing unreadable local overlay storage: {}", e);
                Map::new()
            }
        };
        entries.insert(self.key.clone(), serde_json::to_value(overlay)?);

        let contents = serde_json::to_vec_pretty(&entries)?;
        write_atomically(&self.path, &contents)
            .await
            .map_err(|e| DashboardError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}
