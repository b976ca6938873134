//! Input acquisition - one bounded text stream from text and uploads
//!
//! ```text
//! raw text ─────────────────────────────┐
//! image ─→ LlmImageRecognizer ──┐       ├─→ combine ─→ truncate ─→ text + warnings
//! PDF ───→ PdfTextExtractor ────┴───────┘
//! ```

use crate::artifact::UploadedArtifact;
use crate::error::{ExtractorError, RecognitionError};
use crate::prompt::transcription_prompt;
use async_trait::async_trait;
use menucheck_domain::{ImageInput, LlmProvider, WarningLog, WarningSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Warning added when the combined text was cut to the length limit
pub const TRUNCATION_WARNING: &str = "Very long input was shortened for analysis.";

/// Warning added when an upload yielded no text but raw text was supplied
pub const EMPTY_RECOGNITION_WARNING: &str =
    "No readable text was found in the uploaded file; continuing with the entered text.";

fn recognition_warning(artifact: &UploadedArtifact) -> String {
    format!(
        "Text was read from the uploaded {} via automated recognition.",
        artifact.kind()
    )
}

/// Reads text out of an uploaded artifact
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text of `artifact`; an empty string means nothing was found
    async fn recognize(&self, artifact: &UploadedArtifact) -> Result<String, RecognitionError>;
}

/// Transcribes menu images with one vision call to the provider
pub struct LlmImageRecognizer<L> {
    provider: Arc<L>,
}

impl<L: LlmProvider> LlmImageRecognizer<L> {
    /// Create a recognizer over a shared provider
    pub fn new(provider: Arc<L>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<L: LlmProvider> TextRecognizer for LlmImageRecognizer<L> {
    async fn recognize(&self, artifact: &UploadedArtifact) -> Result<String, RecognitionError> {
        let UploadedArtifact::Image { media_type, data } = artifact else {
            return Err(RecognitionError::Unsupported(artifact.kind()));
        };

        let prompt = transcription_prompt(ImageInput {
            media_type: media_type.mime().to_string(),
            data: data.clone(),
        });
        self.provider
            .generate(&prompt)
            .await
            .map_err(|e| RecognitionError::Provider(e.to_string()))
    }
}

/// Reads the text layer of PDF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

#[async_trait]
impl TextRecognizer for PdfTextExtractor {
    async fn recognize(&self, artifact: &UploadedArtifact) -> Result<String, RecognitionError> {
        let UploadedArtifact::Document { data, .. } = artifact else {
            return Err(RecognitionError::Unsupported(artifact.kind()));
        };

        let data = data.clone();
        tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&data).map_err(|e| RecognitionError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| RecognitionError::Join(e.to_string()))?
    }
}

/// Routes each artifact kind to its recognizer
pub struct ArtifactRecognizer<L> {
    image: LlmImageRecognizer<L>,
    document: PdfTextExtractor,
}

impl<L: LlmProvider> ArtifactRecognizer<L> {
    /// Create the default recognizer set over a shared provider
    pub fn new(provider: Arc<L>) -> Self {
        Self {
            image: LlmImageRecognizer::new(provider),
            document: PdfTextExtractor,
        }
    }
}

#[async_trait]
impl<L: LlmProvider> TextRecognizer for ArtifactRecognizer<L> {
    async fn recognize(&self, artifact: &UploadedArtifact) -> Result<String, RecognitionError> {
        match artifact {
            UploadedArtifact::Image { .. } => self.image.recognize(artifact).await,
            UploadedArtifact::Document { .. } => self.document.recognize(artifact).await,
        }
    }
}

/// Text ready for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredInput {
    /// Combined, length-bounded text
    pub text: String,

    /// Acquisition warnings in encounter order
    pub warnings: WarningLog,
}

/// Cut `text` to at most `max_chars` characters
///
/// Returns the prefix and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

/// Combines raw text and recognized upload text into one bounded stream
pub struct InputAcquisition<R> {
    recognizer: R,
    max_text_length: usize,
    recognition_timeout: Duration,
}

impl<R: TextRecognizer> InputAcquisition<R> {
    /// Create an acquisition stage
    pub fn new(recognizer: R, max_text_length: usize, recognition_timeout: Duration) -> Self {
        Self {
            recognizer,
            max_text_length,
            recognition_timeout,
        }
    }

    /// Produce the text handed to extraction
    ///
    /// Recognized text is appended after the raw text, separated by a blank
    /// line. Truncation happens last, on the combined text.
    ///
    /// # Errors
    ///
    /// - [`ExtractorError::EmptyInput`] if there is neither text nor an upload
    /// - [`ExtractorError::NoTextRecognized`] if the upload yielded nothing and
    ///   there is no raw text to fall back on
    /// - [`ExtractorError::Recognition`] if the recognition path failed
    pub async fn acquire(
        &self,
        raw_text: Option<&str>,
        artifact: Option<&UploadedArtifact>,
    ) -> Result<AcquiredInput, ExtractorError> {
        let raw = raw_text.map(str::trim).unwrap_or("");
        let mut warnings = WarningLog::new();

        let combined = match artifact {
            None if raw.is_empty() => return Err(ExtractorError::EmptyInput),
            None => raw.to_string(),
            Some(artifact) => {
                debug!("Recognizing {} upload ({} bytes)", artifact.kind(), artifact.len());
                let recognized = timeout(self.recognition_timeout, self.recognizer.recognize(artifact))
                    .await
                    .map_err(|_| RecognitionError::Timeout)??;
                let recognized = recognized.trim();

                if recognized.is_empty() {
                    if raw.is_empty() {
                        warn!("No text recognized in {} upload", artifact.kind());
                        return Err(ExtractorError::NoTextRecognized);
                    }
                    warnings.note(WarningSource::Acquisition, EMPTY_RECOGNITION_WARNING);
                    raw.to_string()
                } else {
                    info!(
                        "Recognized {} chars from {} upload",
                        recognized.chars().count(),
                        artifact.kind()
                    );
                    warnings.note(WarningSource::Acquisition, recognition_warning(artifact));
                    if raw.is_empty() {
                        recognized.to_string()
                    } else {
                        format!("{}\n\n{}", raw, recognized)
                    }
                }
            }
        };

        let (text, truncated) = truncate_chars(&combined, self.max_text_length);
        if truncated {
            info!("Input truncated to {} chars", self.max_text_length);
            warnings.note(WarningSource::Acquisition, TRUNCATION_WARNING);
        }

        Ok(AcquiredInput {
            text: text.to_string(),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucheck_llm::MockProvider;

    struct FixedRecognizer(Option<&'static str>);

    #[async_trait]
    impl TextRecognizer for FixedRecognizer {
        async fn recognize(&self, _artifact: &UploadedArtifact) -> Result<String, RecognitionError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| RecognitionError::Provider("down".to_string()))
        }
    }

    struct SlowRecognizer;

    #[async_trait]
    impl TextRecognizer for SlowRecognizer {
        async fn recognize(&self, _artifact: &UploadedArtifact) -> Result<String, RecognitionError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("late".to_string())
        }
    }

    fn acquisition(recognized: Option<&'static str>, max: usize) -> InputAcquisition<FixedRecognizer> {
        InputAcquisition::new(FixedRecognizer(recognized), max, Duration::from_secs(5))
    }

    fn image() -> UploadedArtifact {
        UploadedArtifact::image("image/png", vec![1, 2, 3], 1024).unwrap()
    }

    fn pdf() -> UploadedArtifact {
        UploadedArtifact::document("application/pdf", vec![1, 2, 3], 1024).unwrap()
    }

    #[test]
    fn test_truncate_chars_counts_characters() {
        assert_eq!(truncate_chars("äöüß", 2), ("äö", true));
        assert_eq!(truncate_chars("abc", 3), ("abc", false));
        assert_eq!(truncate_chars("", 0), ("", false));
    }

    #[tokio::test]
    async fn test_text_only() {
        let acquired = acquisition(None, 100)
            .acquire(Some("  Gulasch A,I  "), None)
            .await
            .unwrap();
        assert_eq!(acquired.text, "Gulasch A,I");
        assert!(acquired.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_supplied() {
        let result = acquisition(None, 100).acquire(Some("   "), None).await;
        assert!(matches!(result, Err(ExtractorError::EmptyInput)));

        let result = acquisition(None, 100).acquire(None, None).await;
        assert!(matches!(result, Err(ExtractorError::EmptyInput)));
    }

    #[tokio::test]
    async fn test_recognized_text_follows_raw_text() {
        let acquired = acquisition(Some(" Pizza G \n"), 100)
            .acquire(Some("Salat"), Some(&image()))
            .await
            .unwrap();

        assert_eq!(acquired.text, "Salat\n\nPizza G");
        assert_eq!(
            acquired.warnings.into_messages(),
            vec!["Text was read from the uploaded image via automated recognition."]
        );
    }

    #[tokio::test]
    async fn test_pdf_warning_names_the_pdf() {
        let acquired = acquisition(Some("Suppe"), 100)
            .acquire(None, Some(&pdf()))
            .await
            .unwrap();
        assert_eq!(acquired.text, "Suppe");
        assert_eq!(
            acquired.warnings.into_messages(),
            vec!["Text was read from the uploaded PDF via automated recognition."]
        );
    }

    #[tokio::test]
    async fn test_empty_recognition_without_raw_text_fails() {
        let result = acquisition(Some("  "), 100).acquire(None, Some(&image())).await;
        assert!(matches!(result, Err(ExtractorError::NoTextRecognized)));
    }

    #[tokio::test]
    async fn test_empty_recognition_falls_back_to_raw_text() {
        let acquired = acquisition(Some(""), 100)
            .acquire(Some("Brezel A"), Some(&image()))
            .await
            .unwrap();
        assert_eq!(acquired.text, "Brezel A");
        assert_eq!(acquired.warnings.into_messages(), vec![EMPTY_RECOGNITION_WARNING]);
    }

    #[tokio::test]
    async fn test_recognizer_failure_is_an_error() {
        let result = acquisition(None, 100).acquire(Some("text"), Some(&image())).await;
        assert!(matches!(
            result,
            Err(ExtractorError::Recognition(RecognitionError::Provider(_)))
        ));
    }

    #[tokio::test]
    async fn test_truncation_applies_to_combined_text() {
        let acquired = acquisition(Some("bbbbbbbbbb"), 15)
            .acquire(Some("aaaaaaaaaa"), Some(&image()))
            .await
            .unwrap();

        assert_eq!(acquired.text, "aaaaaaaaaa\n\nbbb");
        assert_eq!(
            acquired.warnings.into_messages(),
            vec![
                "Text was read from the uploaded image via automated recognition.".to_string(),
                TRUNCATION_WARNING.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_recognition_timeout() {
        let acquisition = InputAcquisition::new(SlowRecognizer, 100, Duration::from_millis(50));
        let result = acquisition.acquire(None, Some(&image())).await;
        assert!(matches!(
            result,
            Err(ExtractorError::Recognition(RecognitionError::Timeout))
        ));
    }

    #[tokio::test]
    async fn test_image_recognizer_sends_one_vision_call() {
        let provider = Arc::new(MockProvider::default().with_transcription("Currywurst J"));
        let recognizer = ArtifactRecognizer::new(Arc::clone(&provider));

        let text = recognizer.recognize(&image()).await.unwrap();
        assert_eq!(text, "Currywurst J");
        assert_eq!(provider.call_count(), 1);

        let prompt = &provider.prompts()[0];
        let attached = prompt.image.as_ref().unwrap();
        assert_eq!(attached.media_type, "image/png");
        assert_eq!(attached.data, vec![1, 2, 3]);
        assert!(provider.schema_names().is_empty());
    }

    #[tokio::test]
    async fn test_recognizers_reject_other_kinds() {
        let provider = Arc::new(MockProvider::default());
        let result = LlmImageRecognizer::new(provider).recognize(&pdf()).await;
        assert!(matches!(result, Err(RecognitionError::Unsupported("PDF"))));

        let result = PdfTextExtractor.recognize(&image()).await;
        assert!(matches!(result, Err(RecognitionError::Unsupported("image"))));
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_garbage() {
        let result = PdfTextExtractor.recognize(&pdf()).await;
        assert!(matches!(
            result,
            Err(RecognitionError::Pdf(_)) | Err(RecognitionError::Join(_))
        ));
    }
}
