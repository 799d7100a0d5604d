// Agents: the dashboard catalog and the two active tools.
// All LLM calls go through llm_client::CompletionClient; no direct HTTP here.

pub mod catalog;
pub mod error_analyzer;
pub mod handlers;
pub mod message_generator;
pub mod prompts;

use thiserror::Error;

use crate::llm_client::CompletionError;
use crate::templates::TemplateError;

/// Failure of an agent task. Both variants display the underlying message unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Completion(#[from] CompletionError),
}
