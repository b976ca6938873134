//! Menucheck LLM Provider Layer
//!
//! Implementations of the `LlmProvider` port from `menucheck-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions with JSON-schema output
//!
//! # Examples
//!
//! ```
//! use menucheck_llm::MockProvider;
//!
//! let provider = MockProvider::new(r#"{"products":[],"warnings":[]}"#);
//! assert_eq!(provider.call_count(), 0);
//! ```

#![warn(missing_docs)]

pub mod openai;

use async_trait::async_trait;
use menucheck_domain::{LlmProvider, OutputSchema, Prompt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Request did not complete in time
    #[error("Request timed out")]
    Timeout,

    /// Credential rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded on the provider side
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Structured calls answer with the structured response, free-text calls
/// with the transcription. Specific responses can be keyed by the exact
/// user message.
///
/// # Examples
///
/// ```
/// use menucheck_llm::MockProvider;
///
/// let mut provider = MockProvider::new("{}").with_transcription("Schnitzel A,C");
/// provider.add_response("special", "[]");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    structured_response: String,
    transcription: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    failure: Option<String>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    schemas: Arc<Mutex<Vec<String>>>,
}

const ERROR_MARKER: &str = "ERROR";

impl MockProvider {
    /// Create a new MockProvider with a fixed structured response
    pub fn new(structured_response: impl Into<String>) -> Self {
        Self {
            structured_response: structured_response.into(),
            transcription: String::new(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            failure: None,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            schemas: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a provider whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        let mut provider = Self::default();
        provider.failure = Some(message.into());
        provider
    }

    /// Set the response to free-text (transcription) calls
    pub fn with_transcription(mut self, text: impl Into<String>) -> Self {
        self.transcription = text.into();
        self
    }

    /// Add a specific response for a given user message
    pub fn add_response(&mut self, user_message: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(user_message.into(), response.into());
    }

    /// Configure to return an error for a specific user message
    pub fn add_error(&mut self, user_message: impl Into<String>) {
        lock(&self.responses).insert(user_message.into(), ERROR_MARKER.to_string());
    }

    /// Get the number of calls made
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<Prompt> {
        lock(&self.prompts).clone()
    }

    /// Names of the schemas received by structured calls, in call order
    pub fn schema_names(&self) -> Vec<String> {
        lock(&self.schemas).clone()
    }

    fn respond(&self, prompt: &Prompt, fallback: &str) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        lock(&self.prompts).push(prompt.clone());

        if let Some(message) = &self.failure {
            return Err(LlmError::Other(message.clone()));
        }

        if let Some(response) = lock(&self.responses).get(&prompt.user) {
            if response == ERROR_MARKER {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(fallback.to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(r#"{"products":[],"warnings":[]}"#)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error> {
        self.respond(prompt, &self.transcription)
    }

    async fn generate_structured(
        &self,
        prompt: &Prompt,
        schema: &OutputSchema,
    ) -> Result<String, Self::Error> {
        lock(&self.schemas).push(schema.name.clone());
        self.respond(prompt, &self.structured_response)
    }
}
