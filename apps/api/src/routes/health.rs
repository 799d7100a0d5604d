use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client;
use crate::state::AppState;

/// GET /health
/// Returns service status, version, the pinned model and whether an API key is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "agent-hub",
        "model": llm_client::MODEL,
        "api_key_configured": state.config.groq_api_key.is_some()
    }))
}
