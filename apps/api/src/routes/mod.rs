pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::agents::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard / navigation
        .route("/api/v1/agents", get(handlers::handle_dashboard))
        .route("/api/v1/agents/:agent_id", get(handlers::handle_get_agent))
        .route("/api/v1/view", get(handlers::handle_view))
        // Active agents
        .route(
            handlers::MESSAGE_GENERATOR_ENDPOINT,
            post(handlers::handle_generate_message),
        )
        .route(
            handlers::ERROR_ANALYZER_ENDPOINT,
            post(handlers::handle_analyze_error),
        )
        .with_state(state)
}
