// Remote store backed by a JSON document on local disk
use crate::application::remote_store::{RemoteDocument, RemoteStore};
use crate::domain::error::DashboardError;
use crate::infrastructure::local_files::write_atomically;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    path: PathBuf,
}

impl FileDocumentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RemoteStore for FileDocumentStore {
    async fn load(&self) -> Result<RemoteDocument, DashboardError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DashboardError::Storage(format!("{}: {}", self.path.display(), e)))?;

        Ok(serde_json::from_str(&contents)?)
    }

    async fn save(&self, document: &RemoteDocument) -> Result<(), DashboardError> {
        let contents = serde_json::to_vec_pretty(document)?;
        write_atomically(&self.path, &contents)
            .await
            .map_err(|e| DashboardError::Storage(format!("{}: {}", self.path.display(), e)))?;

        tracing::debug!("Wrote dashboard document to {}", self.path.display());
        Ok(())
    }
}
