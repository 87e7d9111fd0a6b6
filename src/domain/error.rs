// Dashboard error taxonomy
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Transport failure or non-success status from a remote endpoint
    #[error("network error: {0}")]
    Network(String),

    /// Remote or stored document could not be decoded
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local storage could not be read or written
    #[error("storage error: {0}")]
    Storage(String),

    /// A required admin field was missing
    #[error("{0}")]
    Validation(String),

    /// The record is protected by its provenance flag
    #[error("{0}")]
    Permission(String),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission(message.into())
    }

    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
