//! Axum route handlers for the agent dashboard and the two active tools.
//!
//! Input length and blank checks live here; the task functions accept any text.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::agents::catalog::{self, AgentDescriptor, AgentId, Dashboard, View};
use crate::agents::error_analyzer::generate_error_response;
use crate::agents::message_generator::generate_message;
use crate::errors::AppError;
use crate::state::AppState;

/// Job content must be longer than this (trimmed) to be worth sending.
const MIN_JOB_CONTENT_CHARS: usize = 50;
/// Below this the request still runs, but the response carries a warning.
const RECOMMENDED_JOB_CONTENT_CHARS: usize = 100;

pub const MESSAGE_GENERATOR_ENDPOINT: &str = "/api/v1/message-generator/generate";
pub const ERROR_ANALYZER_ENDPOINT: &str = "/api/v1/error-analyzer/analyze";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateMessageRequest {
    pub page_content: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateMessageResponse {
    pub message: String,
    pub content_length: usize,
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeErrorRequest {
    pub error_message: String,
    #[serde(default)]
    pub code_snippet: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeErrorResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub agent: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewResponse {
    Dashboard { dashboard: Dashboard },
    Agent {
        agent: AgentDescriptor,
        endpoint: &'static str,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/agents
pub async fn handle_dashboard() -> Json<Dashboard> {
    Json(catalog::dashboard())
}

/// GET /api/v1/agents/:agent_id
pub async fn handle_get_agent(Path(agent_id): Path<String>) -> Result<Json<ViewResponse>, AppError> {
    let id = parse_agent(&agent_id)?;
    render_view(View::for_selection(Some(id))).map(Json)
}

/// GET /api/v1/view?agent=<id>
///
/// No `agent` means the dashboard.
pub async fn handle_view(Query(query): Query<ViewQuery>) -> Result<Json<ViewResponse>, AppError> {
    let selected = query.agent.as_deref().map(parse_agent).transpose()?;
    render_view(View::for_selection(selected)).map(Json)
}

/// POST /api/v1/message-generator/generate
pub async fn handle_generate_message(
    State(state): State<AppState>,
    Json(request): Json<GenerateMessageRequest>,
) -> Result<Json<GenerateMessageResponse>, AppError> {
    let content_length = request.page_content.trim().chars().count();
    if content_length <= MIN_JOB_CONTENT_CHARS {
        return Err(AppError::Validation(format!(
            "Please paste the job description content (at least {MIN_JOB_CONTENT_CHARS} characters)"
        )));
    }

    let warning = (content_length < RECOMMENDED_JOB_CONTENT_CHARS).then(|| {
        "Content seems too short. Please paste the complete job description for better results."
            .to_string()
    });

    info!("Generating referral message from {content_length} chars of job content");
    let message = generate_message(state.llm.as_ref(), &request.page_content).await?;

    Ok(Json(GenerateMessageResponse {
        message,
        content_length,
        warning,
    }))
}

/// POST /api/v1/error-analyzer/analyze
pub async fn handle_analyze_error(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeErrorRequest>,
) -> Result<Json<AnalyzeErrorResponse>, AppError> {
    if request.error_message.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide an error message.".to_string(),
        ));
    }

    let analysis = generate_error_response(
        state.llm.as_ref(),
        &request.error_message,
        &request.code_snippet,
    )
    .await?;

    Ok(Json(AnalyzeErrorResponse { analysis }))
}

fn parse_agent(raw: &str) -> Result<AgentId, AppError> {
    AgentId::parse(raw).ok_or_else(|| AppError::NotFound(format!("Agent '{raw}' not found")))
}

fn render_view(view: View) -> Result<ViewResponse, AppError> {
    let (id, endpoint) = match view {
        View::Dashboard => {
            return Ok(ViewResponse::Dashboard {
                dashboard: catalog::dashboard(),
            })
        }
        View::MessageGenerator => (AgentId::MessageGenerator, MESSAGE_GENERATOR_ENDPOINT),
        View::ErrorAnalyzer => (AgentId::ErrorAnalyzer, ERROR_ANALYZER_ENDPOINT),
        View::Unavailable(id) => {
            return Err(AppError::NotImplemented(format!(
                "Agent '{}' not found or not implemented yet.",
                id.as_str()
            )))
        }
    };

    let agent = catalog::descriptor(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Agent '{}' not found", id.as_str())))?;
    Ok(ViewResponse::Agent { agent, endpoint })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
