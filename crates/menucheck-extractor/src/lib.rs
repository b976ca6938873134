//! Menucheck Extractor
//!
//! Turns free text, menu photos and PDF menus into canonical products with
//! one schema-constrained call to an external provider.
//!
//! # Overview
//!
//! The extractor is the AI ingestion path. It is the only part of the system
//! that crosses a trust boundary, so everything the provider returns is
//! validated against a closed-vocabulary contract before it is used.
//!
//! # Architecture
//!
//! ```text
//! text / upload → InputAcquisition → SchemaConstrainedExtractor → contract → normalizer
//!                  (recognition,        (one provider call,
//!                   truncation)          no retry)
//! ```
//!
//! # Key Features
//!
//! - **Boundary classification**: uploads become [`UploadedArtifact`] once
//! - **Recognition**: image transcription via the provider, PDF text via `pdf-extract`
//! - **Bounded input**: combined text truncated before extraction
//! - **All-or-nothing contract**: any violation fails the whole extraction
//!
//! # Example Usage
//!
//! ```no_run
//! use menucheck_extractor::{ExtractorConfig, MenuService};
//! use menucheck_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"products":[],"warnings":[]}"#);
//! let service = MenuService::new(llm, ExtractorConfig::default())?;
//!
//! let result = service.parse_menu(Some("Gulasch (A, I)"), None).await?;
//! println!("{} products, {} warnings", result.products.len(), result.warnings.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod acquisition;
mod artifact;
mod config;
mod contract;
mod error;
mod extractor;
mod prompt;
mod schema;
mod service;


pub use acquisition::{
    truncate_chars, AcquiredInput, ArtifactRecognizer, InputAcquisition, LlmImageRecognizer,
    PdfTextExtractor, TextRecognizer, EMPTY_RECOGNITION_WARNING, TRUNCATION_WARNING,
};
pub use artifact::{DocumentMediaType, ImageMediaType, UploadedArtifact};
pub use config::ExtractorConfig;
pub use contract::{
    strip_code_fence, validate_menu_response, validate_suggestion_response, AllergenSuggestion,
    ContractViolation, ExtractionContract, MAX_NAME_CHARS, MAX_PRODUCTS, MAX_REASONING_CHARS,
    MAX_WARNINGS,
};
pub use error::{ExtractorError, RecognitionError};
pub use extractor::{SchemaConstrainedExtractor, MIN_SUGGESTION_NAME_CHARS};
pub use prompt::PromptBuilder;
pub use schema::{allergen_suggestion_schema, menu_parse_schema, MENU_SCHEMA_NAME, SUGGESTION_SCHEMA_NAME};
pub use service::{MenuParseResult, MenuService};
