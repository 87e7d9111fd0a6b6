// Renderer that keeps the latest display view for the screen endpoint
use crate::application::renderer::Renderer;
use crate::domain::announcement::AnnouncementRecord;
use crate::domain::class::ClassRecord;
use crate::domain::dashboard::{DashboardState, MediaItem};
use serde::Serialize;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub display_name: String,
    pub classes: Vec<ClassRecord>,
    pub announcements: Vec<AnnouncementRecord>,
    pub media: Vec<MediaItem>,
}

#[derive(Debug, Default)]
pub struct SnapshotRenderer {
    view: RwLock<DashboardView>,
}

impl SnapshotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DashboardView {
        self.view.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn update(&self, f: impl FnOnce(&mut DashboardView)) {
        let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut view);
    }
}

impl Renderer for SnapshotRenderer {
    fn render_all(&self, state: &DashboardState) {
        self.update(|view| {
            *view = DashboardView {
                display_name: state.settings.display_name.clone(),
                classes: state.classes.clone(),
                announcements: state.announcements.clone(),
                media: state.media.clone(),
            }
        });
    }

    fn render_classes(&self, classes: &[ClassRecord]) {
        self.update(|view| view.classes = classes.to_vec());
    }

    fn render_announcements(&self, announcements: &[AnnouncementRecord]) {
        self.update(|view| view.announcements = announcements.to_vec());
    }
}
