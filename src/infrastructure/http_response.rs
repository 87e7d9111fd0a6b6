// HTTP response utilities for dashboard errors
use crate::domain::error::DashboardError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
        DashboardError::Permission(_) => StatusCode::FORBIDDEN,
        DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::Network(_) | DashboardError::Parse(_) => StatusCode::BAD_GATEWAY,
        DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
