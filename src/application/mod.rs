// Application layer - Ports, reconciliation and the dashboard controller
pub mod clock;
pub mod dashboard_service;
pub mod overlay_store;
pub mod reconciler;
pub mod remote_store;
pub mod renderer;
pub mod rotation_scheduler;
