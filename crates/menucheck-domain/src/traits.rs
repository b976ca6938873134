//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// An image passed inline to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// MIME type, e.g. `image/png`
    pub media_type: String,

    /// Raw image bytes
    pub data: Vec<u8>,
}

/// A provider prompt: instructions, user content and an optional image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prompt {
    /// System instructions
    pub system: String,

    /// User message
    pub user: String,

    /// Optional image attached to the user message
    pub image: Option<ImageInput>,
}

impl Prompt {
    /// Create a text-only prompt
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            image: None,
        }
    }

    /// Attach an image to the user message
    pub fn with_image(mut self, image: ImageInput) -> Self {
        self.image = Some(image);
        self
    }
}

/// Declarative output contract handed to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    /// Schema name as reported to the provider
    pub name: String,

    /// JSON Schema document (serialized)
    pub schema: String,
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (menucheck-llm). Exactly one call
/// per method invocation; implementations must not retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Generate free text (used for image transcription)
    async fn generate(&self, prompt: &Prompt) -> Result<String, Self::Error>;

    /// Generate output constrained to the given schema
    ///
    /// Returns the raw response body; validating it is the caller's job.
    async fn generate_structured(
        &self,
        prompt: &Prompt,
        schema: &OutputSchema,
    ) -> Result<String, Self::Error>;
}
