// Remote document port - the baseline dataset and its write-back
use crate::domain::announcement::AnnouncementRecord;
use crate::domain::class::ClassRecord;
use crate::domain::dashboard::{DashboardState, MediaItem, SettingsPatch};
use crate::domain::error::DashboardError;
use crate::domain::schedule::WeeklySchedule;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The single JSON document holding the dashboard baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteDocument {
    pub settings: SettingsPatch,
    pub media: Vec<MediaItem>,
    pub weekly_schedule: WeeklySchedule,
    pub classes: Vec<ClassRecord>,
    pub announcements: Vec<AnnouncementRecord>,
}

impl RemoteDocument {
    /// Schedule-derived classes are regenerated on every load, so they are
    /// not written back.
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            settings: state.settings.to_patch(),
            media: state.media.clone(),
            weekly_schedule: state.weekly_schedule.clone(),
            classes: state.admin_classes().cloned().collect(),
            announcements: state.announcements.clone(),
        }
    }
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn load(&self) -> Result<RemoteDocument, DashboardError>;

    /// Write the full document. Not retried on conflict.
    async fn save(&self, document: &RemoteDocument) -> Result<(), DashboardError>;
}
