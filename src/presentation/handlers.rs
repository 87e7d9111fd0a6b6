// HTTP request handlers
use crate::domain::announcement::{AnnouncementDraft, AnnouncementRecord};
use crate::domain::class::{ClassDraft, ClassRecord};
use crate::domain::dashboard::DashboardState;
use crate::domain::error::DashboardError;
use crate::presentation::app_state::AppState;
use crate::presentation::snapshot_renderer::DashboardView;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

/// What the display client shows right now
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub active_announcement: Option<usize>,
    pub active_media: Option<usize>,
    pub date: String,
    pub time: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn screen(State(state): State<Arc<AppState>>) -> Json<ScreenResponse> {
    let now = state.dashboard_service.clock().now();

    Json(ScreenResponse {
        view: state.renderer.view(),
        active_announcement: state.dashboard_service.active_announcement(),
        active_media: state.dashboard_service.active_media(),
        date: now.format("%A, %B %-d, %Y").to_string(),
        time: now.format("%-I:%M %p").to_string(),
    })
}

pub async fn admin_state(State(state): State<Arc<AppState>>) -> Json<DashboardState> {
    Json(state.dashboard_service.state().await)
}

/// Re-fetch the baseline and reconcile immediately
pub async fn refresh(State(state): State<Arc<AppState>>) -> Json<DashboardState> {
    state.dashboard_service.reload().await;
    Json(state.dashboard_service.state().await)
}

pub async fn add_class(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ClassDraft>,
) -> Result<(StatusCode, Json<ClassRecord>), DashboardError> {
    let record = state.dashboard_service.add_class(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_class(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ClassDraft>,
) -> Result<Json<ClassRecord>, DashboardError> {
    Ok(Json(state.dashboard_service.update_class(&id, draft).await?))
}

pub async fn remove_class(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, DashboardError> {
    state.dashboard_service.remove_class(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_class_cancellation(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClassRecord>, DashboardError> {
    Ok(Json(state.dashboard_service.toggle_class_cancellation(&id).await?))
}

pub async fn add_announcement(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AnnouncementDraft>,
) -> Result<(StatusCode, Json<AnnouncementRecord>), DashboardError> {
    let record = state.dashboard_service.add_announcement(draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn remove_announcement(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, DashboardError> {
    state.dashboard_service.remove_announcement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
