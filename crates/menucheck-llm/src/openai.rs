//! OpenAI Provider Implementation
//!
//! Chat-completions integration with `json_schema` response formatting, so
//! the service is asked to emit only schema-conforming JSON. Images travel
//! inline as base64 data URIs.
//!
//! There is deliberately no retry loop: one call per request, and a failed
//! call surfaces as a single error to the caller. Timeouts are enforced by the
//! HTTP client.
//!
//! # Examples
//!
//! ```no_run
//! use menucheck_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o-mini").unwrap();
//! ```

use crate::LlmError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use menucheck_domain::{LlmProvider, OutputSchema, Prompt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for a single request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a provider against a specific endpoint with a request timeout
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| LlmError::InvalidRequest(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature: DEFAULT_TEMPERATURE,
            client,
        })
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_messages(prompt: &Prompt) -> Vec<ChatMessage> {
        let user_content = match &prompt.image {
            Some(image) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.user.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!(
                            "data:{};base64,{}",
                            image.media_type,
                            STANDARD.encode(&image.data)
                        ),
                    },
                },
            ]),
            None => MessageContent::Text(prompt.user.clone()),
        };

        vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(prompt.system.clone()),
            },
            ChatMessage {
                role: "user",
                content: user_content,
            },
        ]
    }

    fn build_request<'a>(
        &'a self,
        prompt: &Prompt,
        schema: Option<&OutputSchema>,
    ) -> Result<ChatRequest<'a>, LlmError> {
        let response_format = match schema {
            Some(schema) => {
                let document: Value = serde_json::from_str(&schema.schema).map_err(|e| {
                    LlmError::InvalidRequest(format!("Schema is not valid JSON: {}", e))
                })?;
                Some(ResponseFormat {
                    kind: "json_schema",
                    json_schema: JsonSchemaFormat {
                        name: schema.name.clone(),
                        strict: true,
                        schema: document,
                    },
                })
            }
            None => None,
        };

        Ok(ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: Self::build_messages(prompt),
            response_format,
        })
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Communication(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Provider returned HTTP {}", status);
            return Err(match status {
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    LlmError::Authentication(error_text)
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
                reqwest::StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(self.model.clone()),
                _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        debug!("Provider response length: {} chars", content.len());
        Ok(content)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        let request = self.build_request(prompt, None)?;
        self.complete(&request).await
    }

    async fn generate_structured(
        &self,
        prompt: &Prompt,
        schema: &OutputSchema,
    ) -> Result<String, Self::Error> {
        let request = self.build_request(prompt, Some(schema))?;
        self.complete(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucheck_domain::ImageInput;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new("test-key", "test-model").unwrap()
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::with_endpoint("http://localhost:8000/v1/", "k", "m", 5)
            .unwrap()
            .with_temperature(0.3);
        assert_eq!(provider.endpoint, "http://localhost:8000/v1");
        assert_eq!(provider.model(), "m");
        assert_eq!(provider.temperature, 0.3);
    }

    #[test]
    fn test_text_request_body() {
        let provider = provider();
        let request = provider
            .build_request(&Prompt::new("rules", "menu text"), None)
            .unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "rules");
        assert_eq!(json["messages"][1]["content"], "menu text");
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_structured_request_with_image() {
        let provider = provider();
        let prompt = Prompt::new("rules", "read this").with_image(ImageInput {
            media_type: "image/png".to_string(),
            data: vec![0xde, 0xad],
        });
        let schema = OutputSchema {
            name: "menu_parse_result".to_string(),
            schema: r#"{"type":"object"}"#.to_string(),
        };
        let request = provider.build_request(&prompt, Some(&schema)).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["name"], "menu_parse_result");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);
        assert_eq!(json["response_format"]["json_schema"]["schema"]["type"], "object");

        let parts = &json["messages"][1]["content"];
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "read this");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"]["url"], "data:image/png;base64,3q0=");
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let provider = provider();
        let schema = OutputSchema {
            name: "bad".to_string(),
            schema: "not json".to_string(),
        };
        let result = provider.build_request(&Prompt::default(), Some(&schema));
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let provider = OpenAiProvider::with_endpoint("http://127.0.0.1:1", "k", "m", 5).unwrap();
        let result = provider.generate(&Prompt::new("s", "u")).await;

        match result {
            Err(LlmError::Communication(_)) | Err(LlmError::Timeout) => {} // Expected
            other => panic!("Expected communication error, got {:?}", other.map(|_| ())),
        }
    }
}
