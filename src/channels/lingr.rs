//! Lingr webhook channel.
//!
//! The chat platform POSTs event batches to `/lingr` and posts whatever the
//! response body contains back into the room. An empty body means no reply.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::pipeline::processor::LookupProcessor;
use crate::pipeline::types::WebhookPayload;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct LingrState {
    pub processor: Arc<LookupProcessor>,
}

/// Build the webhook router.
pub fn lingr_routes(processor: Arc<LookupProcessor>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/lingr", post(webhook))
        .route("/health", get(health))
        .with_state(LingrState { processor })
        .layer(TraceLayer::new_for_http())
}

/// GET /
///
/// The platform probes the bot URL when it is registered; answer with an
/// empty body.
async fn root() -> &'static str {
    ""
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pedia-bot"
    }))
}

/// POST /lingr
///
/// A body that is not a valid event batch gets an empty reply rather than
/// an error status, so the platform never retries it.
async fn webhook(State(state): State<LingrState>, body: Bytes) -> String {
    match serde_json::from_slice::<WebhookPayload>(&body) {
        Ok(payload) => state.processor.respond(&payload).await,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "Ignoring undecodable webhook payload");
            String::new()
        }
    }
}
