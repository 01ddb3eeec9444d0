//! OpenAI-compatible chat-completion gateway backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::DocumentModel;
use crate::prompt::INSTRUCTION_PROMPT;
use crate::{ImagePayload, InferenceError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "LOVABLE_API_KEY";

/// Document model reached through a chat-completion HTTP endpoint.
pub struct ChatGatewayBackend {
    client: Client,
    endpoint: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl ChatGatewayBackend {
    /// Create a backend with the default endpoint, model and credential variable.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Name of the environment variable read for the bearer credential.
    pub fn with_api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    /// Use an explicit credential instead of the environment.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // Resolved on every call so a key exported after startup is picked up.
    fn credential(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| InferenceError::MissingCredential(self.api_key_env.clone()))
    }
}

#[async_trait]
impl DocumentModel for ChatGatewayBackend {
    async fn extract(&self, image: &ImagePayload) -> Result<String> {
        let api_key = self.credential()?;

        info!(
            "Extracting quotation data with {} (type: {}, {} bytes)",
            self.model,
            image.mime_type(),
            image.len()
        );

        let body = build_request(&self.model, image);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("AI gateway error: {} {}", status.as_u16(), text);
            return Err(classify_status(status, text));
        }

        let text = response.text().await?;
        let content = parse_completion(&text)?;
        debug!("AI response: {}", content);
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Single user message: instruction text followed by the image.
pub(crate) fn build_request<'a>(model: &'a str, image: &ImagePayload) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text {
                    text: INSTRUCTION_PROMPT,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image.to_data_url(),
                    },
                },
            ],
        }],
    }
}

/// Map a non-success upstream status to an error.
pub fn classify_status(status: StatusCode, body: String) -> InferenceError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => InferenceError::QuotaExhausted,
        _ => InferenceError::Upstream {
            status: status.as_u16(),
            body,
        },
    }
}

/// Pull `choices[0].message.content` out of a completion body.
pub(crate) fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .ok_or(InferenceError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_body_shape() {
        let image = ImagePayload::new("image/png", b"hello".to_vec());
        let body = serde_json::to_value(build_request("test/model", &image)).unwrap();

        assert_eq!(body["model"], "test/model");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);

        let message = &body["messages"][0];
        assert_eq!(message["role"], "user");
        assert_eq!(message["content"][0]["type"], "text");
        assert_eq!(message["content"][0]["text"], INSTRUCTION_PROMPT);
        assert_eq!(message["content"][1]["type"], "image_url");
        assert_eq!(
            message["content"][1]["image_url"]["url"],
            "data:image/png;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, String::new()).to_string(),
            "Rate limit exceeded. Please try again in a moment."
        );
        assert_eq!(
            classify_status(StatusCode::PAYMENT_REQUIRED, String::new()).to_string(),
            "AI credits exhausted. Please add credits to your workspace."
        );
        assert_eq!(
            classify_status(StatusCode::BAD_GATEWAY, "upstream down".into()).to_string(),
            "AI gateway error: 502 - upstream down"
        );
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{\"CLIENT\":\"Acme\"}"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), r#"{"CLIENT":"Acme"}"#);
    }

    #[test]
    fn test_parse_completion_without_content() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(InferenceError::EmptyResponse)
        ));
        assert!(matches!(
            parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(InferenceError::EmptyResponse)
        ));
        assert!(matches!(
            parse_completion("<html>"),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_request() {
        let backend = ChatGatewayBackend::new()
            .unwrap()
            .with_api_key_env("QUOTR_TEST_UNSET_CREDENTIAL");
        let image = ImagePayload::new("image/png", vec![0]);

        let err = backend.extract(&image).await.unwrap_err();
        assert_eq!(err.to_string(), "QUOTR_TEST_UNSET_CREDENTIAL is not configured");
        assert!(err.is_input_error());
    }
}
