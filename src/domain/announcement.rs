// Announcement domain model
use super::record_id::{deserialize_id, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Good,
    #[default]
    Info,
    Warning,
    Urgent,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub severity: Severity,
    /// Baseline announcement; never deletable through admin commands
    #[serde(default)]
    pub permanent: bool,
}

impl Record for AnnouncementRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnouncementDraft {
    pub title: String,
    pub message: String,
    pub details: String,
    pub severity: Severity,
}

impl AnnouncementDraft {
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            details: self.details.trim().to_string(),
            severity: self.severity,
        }
    }

    pub fn into_record(self, id: String) -> AnnouncementRecord {
        AnnouncementRecord {
            id,
            title: self.title,
            message: self.message,
            details: self.details,
            severity: self.severity,
            permanent: false,
        }
    }
}
