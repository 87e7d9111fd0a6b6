// Presentation layer - HTTP surface for the display and the admin panel
pub mod app_state;
pub mod handlers;
pub mod snapshot_renderer;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_announcement, add_class, admin_state, health_check, refresh, remove_announcement,
    remove_class, screen, toggle_class_cancellation, update_class,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(screen))
        .route("/admin/state", get(admin_state))
        .route("/admin/refresh", post(refresh))
        .route("/admin/classes", post(add_class))
        .route("/admin/classes/:id", put(update_class).delete(remove_class))
        .route("/admin/classes/:id/cancellation", post(toggle_class_cancellation))
        .route("/admin/announcements", post(add_announcement))
        .route("/admin/announcements/:id", delete(remove_announcement))
        .with_state(state)
}
