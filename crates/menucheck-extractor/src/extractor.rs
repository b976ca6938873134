//! Schema-constrained extraction through the provider port

use crate::config::ExtractorConfig;
use crate::contract::{
    validate_menu_response, validate_suggestion_response, AllergenSuggestion, ExtractionContract,
};
use crate::error::ExtractorError;
use crate::prompt::{suggestion_prompt, PromptBuilder};
use crate::schema::{allergen_suggestion_schema, menu_parse_schema};
use menucheck_domain::{dedupe_codes, LlmProvider, OutputSchema, Prompt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Minimum product name length for suggestions (characters, after trimming)
pub const MIN_SUGGESTION_NAME_CHARS: usize = 2;

/// Issues exactly one structured call per operation and validates the answer
pub struct SchemaConstrainedExtractor<L> {
    provider: Arc<L>,
    timeout: Duration,
}

impl<L: LlmProvider> SchemaConstrainedExtractor<L> {
    /// Create an extractor over a shared provider
    pub fn new(provider: Arc<L>, config: &ExtractorConfig) -> Self {
        Self {
            provider,
            timeout: config.extraction_timeout(),
        }
    }

    async fn call(&self, prompt: &Prompt, schema: &OutputSchema) -> Result<String, ExtractorError> {
        debug!(
            "Calling provider with schema '{}' ({} chars of input)",
            schema.name,
            prompt.user.chars().count()
        );

        let response = timeout(self.timeout, self.provider.generate_structured(prompt, schema))
            .await
            .map_err(|_| {
                warn!("Provider call with schema '{}' timed out", schema.name);
                ExtractorError::Timeout
            })?
            .map_err(|e| {
                warn!("Provider call with schema '{}' failed: {}", schema.name, e);
                ExtractorError::Provider(e.to_string())
            })?;

        debug!("Provider response length: {} chars", response.len());
        Ok(response)
    }

    /// Extract products from menu text
    ///
    /// # Errors
    ///
    /// Returns error if the call fails, times out, or the response violates
    /// the contract. No partial result is ever returned.
    pub async fn extract(&self, text: &str) -> Result<ExtractionContract, ExtractorError> {
        let prompt = PromptBuilder::new(text).build();
        let response = self.call(&prompt, &menu_parse_schema()).await?;

        let contract = validate_menu_response(&response).map_err(|violation| {
            warn!("Menu extraction rejected: {}", violation);
            violation
        })?;

        info!(
            "Extracted {} products, {} provider warnings",
            contract.products.len(),
            contract.warnings.len()
        );
        Ok(contract)
    }

    /// Suggest allergen and additive codes for one product name
    ///
    /// Returned codes are unique, in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::InvalidProductName`] for names shorter than
    /// two characters, or an extraction error as for [`Self::extract`]
    pub async fn suggest(&self, product_name: &str) -> Result<AllergenSuggestion, ExtractorError> {
        let name = product_name.trim();
        if name.chars().count() < MIN_SUGGESTION_NAME_CHARS {
            return Err(ExtractorError::InvalidProductName);
        }

        let response = self
            .call(&suggestion_prompt(name), &allergen_suggestion_schema())
            .await?;

        let suggestion = validate_suggestion_response(&response).map_err(|violation| {
            warn!("Allergen suggestion rejected: {}", violation);
            violation
        })?;

        Ok(AllergenSuggestion {
            allergens: dedupe_codes(&suggestion.allergens),
            additives: dedupe_codes(&suggestion.additives),
            reasoning: suggestion.reasoning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractViolation;
    use menucheck_domain::{AdditiveCode, AllergenCode};
    use menucheck_llm::MockProvider;

    fn extractor(provider: MockProvider) -> (SchemaConstrainedExtractor<MockProvider>, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        let extractor = SchemaConstrainedExtractor::new(Arc::clone(&provider), &ExtractorConfig::default());
        (extractor, provider)
    }

    #[tokio::test]
    async fn test_extract_single_call_with_menu_schema() {
        let (extractor, provider) = extractor(MockProvider::new(
            r#"{"products":[{"name":"Gulasch","allergens":["i"],"additives":[]}],"warnings":[]}"#,
        ));

        let contract = extractor.extract("Gulasch (I)").await.unwrap();
        assert_eq!(contract.products.len(), 1);
        assert_eq!(contract.products[0].allergens, vec![AllergenCode::I]);

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.schema_names(), vec!["menu_parse_result"]);
        assert!(provider.prompts()[0].user.contains("Gulasch (I)"));
    }

    #[tokio::test]
    async fn test_extract_rejects_unknown_code() {
        let (extractor, _) = extractor(MockProvider::new(
            r#"{"products":[{"name":"Gulasch","allergens":["i"],"additives":["12"]}],"warnings":[]}"#,
        ));

        let result = extractor.extract("Gulasch").await;
        assert!(matches!(
            result,
            Err(ExtractorError::Contract(ContractViolation::UnknownAdditive { .. }))
        ));
    }

    #[tokio::test]
    async fn test_extract_empty_response_is_failure() {
        let (extractor, _) = extractor(MockProvider::new(""));
        let result = extractor.extract("Gulasch").await;
        assert!(matches!(
            result,
            Err(ExtractorError::Contract(ContractViolation::EmptyResponse))
        ));
    }

    #[tokio::test]
    async fn test_extract_provider_failure_not_retried() {
        let (extractor, provider) = extractor(MockProvider::failing("boom"));
        let result = extractor.extract("Gulasch").await;

        assert!(matches!(result, Err(ExtractorError::Provider(m)) if m.contains("boom")));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_suggest_dedupes_codes() {
        let (extractor, provider) = extractor(MockProvider::new(
            r#"{"allergens":["g","a","g"],"additives":["2","2"],"reasoning":"Cheese noodles."}"#,
        ));

        let suggestion = extractor.suggest("  Käsespätzle ").await.unwrap();
        assert_eq!(suggestion.allergens, vec![AllergenCode::G, AllergenCode::A]);
        assert_eq!(suggestion.additives, vec![AdditiveCode::Preservative]);
        assert_eq!(suggestion.reasoning, "Cheese noodles.");
        assert_eq!(provider.schema_names(), vec!["allergen_suggestion"]);
        assert!(provider.prompts()[0].user.starts_with("Product name: Käsespätzle\n"));
    }

    #[tokio::test]
    async fn test_suggest_rejects_short_names_without_calling() {
        let (extractor, provider) = extractor(MockProvider::default());

        assert!(matches!(
            extractor.suggest(" ä ").await,
            Err(ExtractorError::InvalidProductName)
        ));
        assert_eq!(provider.call_count(), 0);
    }
}
