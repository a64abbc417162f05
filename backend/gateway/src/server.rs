//! Main HTTP server and routing.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use hairscope_understanding::HairAnalyzer;

use crate::analyze;
use crate::control_ui::{self, UiPage};
use crate::health_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub analyzer: Arc<HairAnalyzer>,
    pub page: Arc<UiPage>,
    pub started_at: Instant,
    /// Request body limit for `/api/analyze`.
    pub max_upload_bytes: usize,
}

impl GatewayState {
    pub fn new(analyzer: HairAnalyzer, page: UiPage, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            page: Arc::new(page),
            started_at: Instant::now(),
            max_upload_bytes,
        }
    }
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(control_ui::index))
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` (host:port, hostnames allowed) and serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: &str, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Hairscope UI listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Hairscope UI stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
