// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::presentation::snapshot_renderer::SnapshotRenderer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub renderer: Arc<SnapshotRenderer>,
}
