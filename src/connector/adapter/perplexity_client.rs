use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ApiRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: request.model(),
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: request.system(),
                },
                ApiMessage {
                    role: "user",
                    content: request.user(),
                },
            ],
            max_tokens: request.max_tokens(),
            temperature: request.temperature(),
        }
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// HTTP client for the Perplexity chat completions API (and compatible
/// OpenAI-style endpoints).
///
/// Implements [`ChatClient`] so the responder stays decoupled from transport
/// and serialization details. The bearer token is supplied per call rather
/// than held by the client.
///
/// Every request is bounded by a timeout (30 s unless overridden) so a hung
/// upstream fails the turn instead of wedging the session.
pub struct PerplexityClient {
    client: reqwest::Client,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
    timeout: Duration,
}

impl PerplexityClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{COMPLETIONS_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            url,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for PerplexityClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

#[async_trait]
impl ChatClient for PerplexityClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: &SecretString,
    ) -> Result<String, DomainError> {
        let body = ApiRequest::from(request);

        // `.json()` also sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::upstream(format!(
                        "PerplexityClient: request timed out after {:?}",
                        self.timeout
                    ))
                } else {
                    DomainError::upstream(format!("PerplexityClient: request failed: {e}"))
                }
            })?;

        // Only 200 counts as success.
        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("PerplexityClient: API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "PerplexityClient: API returned {status}"
            )));
        }

        let raw = response
            .text()
            .await
            .map_err(|e| DomainError::upstream(format!("PerplexityClient: failed to read body: {e}")))?;
        debug!("PerplexityClient raw response: {raw}");

        parse_completion(&raw)
    }
}

/// Extracts `choices[0].message.content`; any other shape is a parse error.
fn parse_completion(raw: &str) -> Result<String, DomainError> {
    let api_response: ApiResponse = serde_json::from_str(raw)
        .map_err(|e| DomainError::parse(format!("PerplexityClient: failed to parse response: {e}")))?;

    api_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| DomainError::parse("PerplexityClient: response contained no choices"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_completions_url_from_base() {
        let client = PerplexityClient::new("http://localhost:9999/", Duration::from_secs(1));
        assert_eq!(client.url(), "http://localhost:9999/chat/completions");
    }

    #[test]
    fn default_targets_perplexity_with_thirty_second_timeout() {
        let client = PerplexityClient::default();
        assert_eq!(client.url(), "https://api.perplexity.ai/chat/completions");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn parse_completion_takes_first_choice() {
        let raw = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(raw).unwrap(), "first");
    }

    #[test]
    fn parse_completion_rejects_empty_choices() {
        let err = parse_completion(r#"{"choices":[]}"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn parse_completion_rejects_other_shapes() {
        assert!(parse_completion(r#"{"content":[{"text":"hi"}]}"#)
            .unwrap_err()
            .is_parse_error());
        assert!(parse_completion(r#"{"choices":[{"message":{}}]}"#)
            .unwrap_err()
            .is_parse_error());
        assert!(parse_completion("not json").unwrap_err().is_parse_error());
    }

    #[test]
    fn request_body_has_expected_shape() {
        let request = CompletionRequest::new("sonar", "sys", "usr");
        let json = serde_json::to_value(ApiRequest::from(&request)).unwrap();
        assert_eq!(json["model"], "sonar");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["max_tokens"], 1024);
    }
}
