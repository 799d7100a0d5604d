// Prompt templates for the two active agents, plus the functions that render them.
// Both templates are plain text with `{placeholder}` tokens; see `crate::templates`.

use anyhow::{bail, Result};

use crate::templates::{PromptTemplate, RenderContext, TemplateError};

/// Substituted for the code section when the user pasted no code.
pub const NO_CODE_PROVIDED: &str = "[No code provided]";

/// Referral request template. Replace `{page_content}` with the pasted job posting.
pub const MESSAGE_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "referral_message",
    r#"
You are a helpful assistant who writes professional, concise referral request messages to employees at companies.

Page content: {page_content}

Generate a short message that:
– is polite and professional
– clearly mentions the role title, company name, job ID (if available), and location if mentioned
– mentions being connected to the company
– asks for a referral without sounding pushy
– mentions attaching resume
– ends with a thank-you and a friendly closing
– signs off with the placeholder [Your Name]

Example
Hi,
I hope you're doing well! I'm interested in the Software Engineer JOB ID:=45888 role at Honey well
and saw you're connected to the company. I'd really appreciate it if you could refer me for this position.
I've attached my resume for reference.
Thanks so much for your time and support!
Best regards,
[Your Name]

**Instructions:**
- Extract the job title, company name, job ID, and location from the page content
- If no job ID is found, write "JOB ID: [Job ID]" as placeholder
- If no location is found, just use company name without location
- Keep the message concise and exactly match the format above
- Do not add extra details about job requirements or responsibilities
- Keep it short and to the point
- dont forget to add job title, company name, job ID, and location if available


No preamble or additional text, just the message in the exact format specified above.
"#,
);

/// Error analysis template. Replace `{error_message}` and `{code_snippet}`.
pub const DEBUG_TEMPLATE: PromptTemplate = PromptTemplate::new(
    "error_analysis",
    r#"You are a professional software developer and coding assistant.
Your task is limited and structured as follows:

I will provide an error message and possibly a snippet of code.

You must:
1. Analyze and explain the cause of the error clearly and concisely.
2. Provide a minimal example that reproduces the same error.
3. Show the corrected version of that example with the error fixed.

Keep your responses short, focused, and easy to understand. Use code examples where necessary.

--- ERROR MESSAGE ---
{error_message}

--- CODE SNIPPET ---
{code_snippet}"#,
);

/// Renders the referral template. Empty content is accepted as-is.
pub fn message_template(page_content: &str) -> Result<String, TemplateError> {
    MESSAGE_TEMPLATE.render(&RenderContext::new().with("page_content", page_content))
}

/// Renders the debug template, substituting [`NO_CODE_PROVIDED`] for an empty snippet.
pub fn debug_template(error_message: &str, code_snippet: &str) -> Result<String, TemplateError> {
    let code_snippet = if code_snippet.is_empty() {
        NO_CODE_PROVIDED
    } else {
        code_snippet
    };
    DEBUG_TEMPLATE.render(
        &RenderContext::new()
            .with("error_message", error_message)
            .with("code_snippet", code_snippet),
    )
}

/// Confirms each template declares exactly the placeholders its render function supplies.
/// Run once at startup.
pub fn check_templates() -> Result<()> {
    check_template(&MESSAGE_TEMPLATE, &["page_content"])?;
    check_template(&DEBUG_TEMPLATE, &["error_message", "code_snippet"])
}

fn check_template(template: &PromptTemplate, supplied: &[&str]) -> Result<()> {
    let declared = template.placeholders()?;
    if declared != supplied {
        bail!(
            "Template '{}' declares placeholders {:?} but {:?} are supplied",
            template.name,
            declared,
            supplied
        );
    }
    Ok(())
}
