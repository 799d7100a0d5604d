//! LLM Client — the single point of entry for all completion calls in Agent Hub.
//!
//! ARCHITECTURAL RULE: No other module may call the Groq API directly.
//! All LLM interactions MUST go through `CompletionClient`.
//!
//! Model: llama-3.1-8b-instant at temperature 0 (hardcoded so outputs stay reproducible)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for every completion in Agent Hub.
pub const MODEL: &str = "llama-3.1-8b-instant";
const TEMPERATURE: f32 = 0.0;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// The one failure kind of a completion call. Connectivity, auth and
/// remote-side errors are not told apart beyond the message they carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CompletionError {
    message: String,
}

impl CompletionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(e: reqwest::Error) -> Self {
        CompletionError::new(format!("HTTP error: {e}"))
    }
}

/// Sends one fully rendered prompt and returns the generated text.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>` so tests can swap in
/// canned responses.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Only logged; proxies may omit either count.
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, if it has any text.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GroqClient {
    /// A missing key is not an error here; it surfaces on the first `complete`.
    pub fn new(api_key: Option<String>, api_url: impl Into<String>) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
        })
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CompletionError::new("Missing API key: GROQ_API_KEY is not set"))?;

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}", status);
            return Err(CompletionError::new(format!(
                "API error (status {}): {}",
                status.as_u16(),
                api_error_message(&body)
            )));
        }

        let parsed = parse_chat_response(&body)?;
        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        parsed
            .text()
            .map(str::to_owned)
            .ok_or_else(|| CompletionError::new("LLM returned empty content"))
    }
}

fn parse_chat_response(body: &str) -> Result<ChatResponse, CompletionError> {
    serde_json::from_str(body)
        .map_err(|e| CompletionError::new(format!("Malformed LLM response: {e}")))
}

/// Pulls `error.message` out of a provider error body, or falls back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}


#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;

    use super::*;

    #[derive(Default)]
    struct SeenRequest {
        authorization: Option<String>,
        body: Option<Value>,
    }

    /// Binds a chat-completions endpoint on 127.0.0.1 that always answers with
    /// `status` and `reply`, and records what it was sent.
    async fn serve_stub(status: StatusCode, reply: &'static str) -> (String, Arc<Mutex<SeenRequest>>) {
        let seen = Arc::new(Mutex::new(SeenRequest::default()));
        let app = Router::new()
            .route(
                "/openai/v1/chat/completions",
                post(
                    move |State(seen): State<Arc<Mutex<SeenRequest>>>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| async move {
                        {
                            let mut seen = seen.lock().unwrap();
                            seen.authorization = headers
                                .get(AUTHORIZATION)
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_owned);
                            seen.body = Some(body);
                        }
                        (status, reply)
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/openai/v1/chat/completions"), seen)
    }

    fn client_for(url: String) -> GroqClient {
        GroqClient::new(Some("gsk_test".to_string()), url).unwrap()
    }

    #[test]
    fn test_request_body_uses_fixed_model_and_zero_temperature() {
        let body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_text_returns_first_choice_unmodified() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  Hi,\nthanks!  "}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 10, "completion_tokens": 4}
        }"#;
        let parsed = parse_chat_response(body).unwrap();
        assert_eq!(parsed.text(), Some("  Hi,\nthanks!  "));
        assert_eq!(parsed.usage.unwrap().completion_tokens, 4);
    }

    #[test]
    fn test_partial_usage_does_not_fail_parsing() {
        let body = r#"{"choices":[{"message":{"content":"T"}}],"usage":{"prompt_tokens":3}}"#;
        let parsed = parse_chat_response(body).unwrap();
        assert_eq!(parsed.text(), Some("T"));
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 3);
        assert_eq!(usage.completion_tokens, 0);
    }

    #[test]
    fn test_text_is_none_without_choices_or_content() {
        let no_choices = parse_chat_response(r#"{"choices": []}"#).unwrap();
        assert!(no_choices.text().is_none());

        let empty = parse_chat_response(r#"{"choices": [{"message": {"content": ""}}]}"#).unwrap();
        assert!(empty.text().is_none());

        let null = parse_chat_response(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(null.text().is_none());
    }

    #[test]
    fn test_malformed_body_is_a_completion_error() {
        let err = parse_chat_response("<html>bad gateway</html>").unwrap_err();
        assert!(err.message().starts_with("Malformed LLM response"));
    }

    #[test]
    fn test_api_error_message_extracts_provider_message() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Invalid API Key");
        assert_eq!(api_error_message("upstream down"), "upstream down");
    }

    #[tokio::test]
    async fn test_missing_api_key_surfaces_on_first_call() {
        let client = GroqClient::new(None, GROQ_API_URL).unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert_eq!(err.message(), "Missing API key: GROQ_API_KEY is not set");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_completion_error() {
        let client = GroqClient::new(
            Some("gsk_test".to_string()),
            "http://127.0.0.1:9/openai/v1/chat/completions",
        )
        .unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert!(err.message().starts_with("HTTP error"), "got: {err}");
    }

    #[tokio::test]
    async fn test_canned_client_records_prompts() {
        let client = testing::CannedClient::replying("ok");
        assert_eq!(client.complete("p1").await.unwrap(), "ok");
        assert_eq!(client.prompts(), vec!["p1".to_string()]);
    }

    #[tokio::test]
    async fn test_complete_sends_authenticated_request_and_returns_text_verbatim() {
        let (url, seen) = serve_stub(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hi,\nthanks!\n "}}],"usage":{"prompt_tokens":12,"completion_tokens":5}}"#,
        )
        .await;

        let text = client_for(url).complete("Write a referral").await.unwrap();
        assert_eq!(text, "  Hi,\nthanks!\n ");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.authorization.as_deref(), Some("Bearer gsk_test"));
        let body = seen.body.as_ref().unwrap();
        assert_eq!(body["model"], "llama-3.1-8b-instant");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Write a referral");
    }

    #[tokio::test]
    async fn test_complete_tolerates_partial_usage() {
        let (url, _) = serve_stub(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":" T "}}],"usage":{"prompt_tokens":3}}"#,
        )
        .await;
        assert_eq!(client_for(url).complete("p").await.unwrap(), " T ");
    }

    #[tokio::test]
    async fn test_complete_reports_rejected_auth_with_provider_message() {
        let (url, _) = serve_stub(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#,
        )
        .await;
        let err = client_for(url).complete("p").await.unwrap_err();
        assert_eq!(err.message(), "API error (status 401): Invalid API Key");
    }

    #[tokio::test]
    async fn test_complete_reports_server_error_with_raw_body() {
        let (url, _) = serve_stub(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").await;
        let err = client_for(url).complete("p").await.unwrap_err();
        assert_eq!(err.message(), "API error (status 500): upstream exploded");
    }

    #[tokio::test]
    async fn test_complete_rejects_response_without_choices() {
        let (url, _) = serve_stub(StatusCode::OK, r#"{"choices":[]}"#).await;
        let err = client_for(url).complete("p").await.unwrap_err();
        assert_eq!(err.message(), "LLM returned empty content");
    }
}
