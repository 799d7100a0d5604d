//! Error Analyzer — explains an error message, reproduces it minimally and shows the fix.

use tracing::{debug, info};

use crate::agents::prompts::debug_template;
use crate::agents::AgentError;
use crate::llm_client::CompletionClient;

/// Renders the debug template and returns the model's analysis unmodified.
///
/// An empty `code_snippet` is sent as [`crate::agents::prompts::NO_CODE_PROVIDED`].
pub async fn generate_error_response(
    llm: &dyn CompletionClient,
    error_message: &str,
    code_snippet: &str,
) -> Result<String, AgentError> {
    let prompt = debug_template(error_message, code_snippet)?;
    debug!(
        "Debug prompt rendered: {} bytes (code supplied: {})",
        prompt.len(),
        !code_snippet.is_empty()
    );

    let analysis = llm.complete(&prompt).await?;
    info!("Error analysis generated: {} chars", analysis.chars().count());

    Ok(analysis)
}
