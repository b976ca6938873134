//! Menu service - acquisition, extraction and normalization in one call

use crate::acquisition::{ArtifactRecognizer, InputAcquisition, TextRecognizer};
use crate::artifact::UploadedArtifact;
use crate::config::ExtractorConfig;
use crate::contract::AllergenSuggestion;
use crate::error::ExtractorError;
use crate::extractor::SchemaConstrainedExtractor;
use menucheck_domain::{normalize, CanonicalProduct, LlmProvider, WarningSource};
use std::sync::Arc;
use tracing::info;

/// Response envelope of a menu analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuParseResult {
    /// Canonical products
    pub products: Vec<CanonicalProduct>,

    /// Acquisition warnings first, then provider warnings
    pub warnings: Vec<String>,
}

/// Turns raw menu input into canonical products
pub struct MenuService<L, R = ArtifactRecognizer<L>> {
    acquisition: InputAcquisition<R>,
    extractor: SchemaConstrainedExtractor<L>,
    config: ExtractorConfig,
}

impl<L: LlmProvider> MenuService<L> {
    /// Create a service whose uploads are read by the default recognizers
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn new(provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        let provider = Arc::new(provider);
        let recognizer = ArtifactRecognizer::new(Arc::clone(&provider));
        Self::with_recognizer(provider, recognizer, config)
    }
}

impl<L: LlmProvider, R: TextRecognizer> MenuService<L, R> {
    /// Create a service with a specific recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid
    pub fn with_recognizer(provider: Arc<L>, recognizer: R, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        Ok(Self {
            acquisition: InputAcquisition::new(
                recognizer,
                config.max_text_length,
                config.recognition_timeout(),
            ),
            extractor: SchemaConstrainedExtractor::new(provider, &config),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Analyze a menu given as text, an upload, or both
    ///
    /// # Errors
    ///
    /// Returns error if the input is unusable, recognition fails, or the
    /// extraction fails. Errors carry no partial products.
    pub async fn parse_menu(
        &self,
        raw_text: Option<&str>,
        artifact: Option<&UploadedArtifact>,
    ) -> Result<MenuParseResult, ExtractorError> {
        let acquired = self.acquisition.acquire(raw_text, artifact).await?;
        let contract = self.extractor.extract(&acquired.text).await?;

        let mut warnings = acquired.warnings;
        for message in contract.warnings {
            warnings.note(WarningSource::Extraction, message);
        }

        let candidate_count = contract.products.len();
        let products = normalize(contract.products);
        info!(
            "Menu analysis: {} candidates, {} products, {} warnings",
            candidate_count,
            products.len(),
            warnings.len()
        );

        Ok(MenuParseResult {
            products,
            warnings: warnings.into_messages(),
        })
    }

    /// Suggest codes for a single product name
    ///
    /// # Errors
    ///
    /// See [`SchemaConstrainedExtractor::suggest`]
    pub async fn suggest_allergens(&self, product_name: &str) -> Result<AllergenSuggestion, ExtractorError> {
        self.extractor.suggest(product_name).await
    }
}
