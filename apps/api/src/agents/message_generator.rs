//! Message Generator — turns pasted job-posting text into a referral request.
//!
//! The model extracts title, company, job ID and location itself; nothing is
//! parsed here.

use tracing::{debug, info};

use crate::agents::prompts::message_template;
use crate::agents::AgentError;
use crate::llm_client::CompletionClient;

/// Renders the referral template and returns the model's text unmodified.
pub async fn generate_message(
    llm: &dyn CompletionClient,
    page_content: &str,
) -> Result<String, AgentError> {
    let prompt = message_template(page_content)?;
    debug!("Referral prompt rendered: {} bytes", prompt.len());

    let message = llm.complete(&prompt).await?;
    info!("Referral message generated: {} chars", message.chars().count());

    Ok(message)
}
