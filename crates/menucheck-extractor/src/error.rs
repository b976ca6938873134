//! Error types for the Extractor

use crate::contract::ContractViolation;
use thiserror::Error;

/// Failure of a text recognition path (image transcription or PDF text)
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The provider call for an image transcription failed
    #[error("Image recognition failed: {0}")]
    Provider(String),

    /// The PDF could not be read
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    /// A recognizer was handed an artifact kind it does not read
    #[error("Recognizer cannot read {0} uploads")]
    Unsupported(&'static str),

    /// Blocking worker failed
    #[error("Recognition task failed: {0}")]
    Join(String),

    /// Recognition did not finish in time
    #[error("Recognition timeout")]
    Timeout,
}

/// Errors that can occur while acquiring input or extracting products
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Neither text nor an upload was supplied
    #[error("Please send text, an image or a PDF.")]
    EmptyInput,

    /// An image and a PDF were both uploaded
    #[error("Please upload either an image or a PDF, not both.")]
    ConflictingUploads,

    /// Declared media type outside the supported set
    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    /// Upload above the size ceiling
    #[error("File too large: {size} bytes (max: {max})")]
    ArtifactTooLarge {
        /// Upload size in bytes
        size: usize,
        /// Ceiling in bytes
        max: usize,
    },

    /// Recognition produced no text and no raw text was supplied
    #[error("No readable text was found in the uploaded file.")]
    NoTextRecognized,

    /// Suggestion requested for a name shorter than two characters
    #[error("Please send a valid product name.")]
    InvalidProductName,

    /// Recognition path failed
    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    /// The extraction call itself failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// The extraction call did not finish in time
    #[error("Extraction timeout")]
    Timeout,

    /// The provider answered, but not within the output contract
    #[error("Extraction contract violated: {0}")]
    Contract(#[from] ContractViolation),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether the caller sent something unusable (as opposed to a failure
    /// on this side or in the provider)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractorError::EmptyInput
                | ExtractorError::ConflictingUploads
                | ExtractorError::UnsupportedMediaType(_)
                | ExtractorError::ArtifactTooLarge { .. }
                | ExtractorError::NoTextRecognized
                | ExtractorError::InvalidProductName
        )
    }
}
