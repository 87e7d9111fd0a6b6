// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::remote_store::RemoteStore;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::file_document_store::FileDocumentStore;
use crate::infrastructure::file_overlay_store::FileOverlayStore;
use crate::infrastructure::github_store::GitHubStore;
use crate::infrastructure::system_clock::SystemClock;
use crate::presentation::app_state::AppState;
use crate::presentation::router;
use crate::presentation::snapshot_renderer::SnapshotRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create stores (infrastructure layer)
    let remote: Arc<dyn RemoteStore> = match config.remote.github.clone() {
        Some(github) => {
            tracing::info!("Using GitHub document {}/{}:{}", github.owner, github.repo, github.path);
            Arc::new(GitHubStore::new(github)?)
        }
        None => {
            tracing::info!("Using local document {}", config.remote.seed_path.display());
            Arc::new(FileDocumentStore::new(config.remote.seed_path.clone()))
        }
    };
    let overlay = Arc::new(FileOverlayStore::new(
        config.overlay.path.clone(),
        config.overlay.key.clone(),
    ));
    let clock = Arc::new(SystemClock::with_offset_minutes(config.clock.utc_offset_minutes)?);
    let renderer = Arc::new(SnapshotRenderer::new());

    // Create the controller (application layer) and run the first load
    let dashboard_service = DashboardService::new(remote, overlay, clock, renderer.clone());
    dashboard_service.reload().await;
    let _refresh = dashboard_service.spawn_refresh(Duration::from_secs(config.refresh.interval_seconds.max(1)));

    let state = Arc::new(AppState {
        dashboard_service,
        renderer,
    });

    // Build router (presentation layer)
    let router = router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting facility dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
