use std::sync::Arc;

use {
    axum::{
        Router,
        response::Json,
        routing::{get, post},
    },
    tracing::info,
};

use forgecord_channels::{ChatOutbound, MembershipRegistry, PushRouter};

use crate::webhook::github_webhook;

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PushRouter>,
    pub registry: Arc<MembershipRegistry>,
    pub outbound: Arc<dyn ChatOutbound>,
}

/// Build the receiver router (shared between production startup and
/// tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhooks/github", post(github_webhook))
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Bind and serve the webhook receiver until the process exits.
pub async fn start(bind: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let addr = format!("{bind}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "webhook receiver listening");
    axum::serve(listener, build_app(state)).await
}
