//! Webhook receiver
//!
//! `POST /telegram/webhook` accepts updates pushed by Telegram,
//! `GET /health` answers liveness probes.

use super::types::Update;
use super::UpdateHandler;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared state of the webhook handlers
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<dyn UpdateHandler>,
    pub secret: Option<String>,
}

pub fn create_router(state: WebhookState) -> Router {
    Router::new()
        .route("/telegram/webhook", post(receive_update))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn receive_update(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> StatusCode {
    if let Some(expected) = &state.secret {
        let provided = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            tracing::warn!(update_id = update.update_id, "Rejected webhook call with bad secret");
            return StatusCode::UNAUTHORIZED;
        }
    }

    // Handling happens on the user worker; Telegram only needs the 200
    state.handler.dispatch(update).await;
    StatusCode::OK
}

async fn health() -> &'static str {
    "ok"
}

/// Serve the webhook until cancelled
pub async fn serve(port: u16, state: WebhookState, cancel: CancellationToken) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Webhook listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
}
