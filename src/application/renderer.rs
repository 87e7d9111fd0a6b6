// Renderer port - projects dashboard state onto the display
use crate::domain::announcement::AnnouncementRecord;
use crate::domain::class::ClassRecord;
use crate::domain::dashboard::DashboardState;

pub trait Renderer: Send + Sync {
    fn render_all(&self, state: &DashboardState);

    fn render_classes(&self, classes: &[ClassRecord]);

    fn render_announcements(&self, announcements: &[AnnouncementRecord]);
}
