// Local overlay port - admin-added records kept on this machine
use crate::domain::announcement::AnnouncementRecord;
use crate::domain::class::ClassRecord;
use crate::domain::dashboard::DashboardState;
use crate::domain::error::DashboardError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalOverlay {
    pub classes: Vec<ClassRecord>,
    pub announcements: Vec<AnnouncementRecord>,
}

impl LocalOverlay {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            classes: state.admin_classes().cloned().collect(),
            announcements: state.admin_announcements().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.announcements.is_empty()
    }
}

#[async_trait]
pub trait OverlayStore: Send + Sync {
    /// Missing or unreadable data yields an empty overlay.
    async fn load(&self) -> LocalOverlay;

    /// Replace the stored overlay in full.
    async fn save(&self, overlay: &LocalOverlay) -> Result<(), DashboardError>;
}
