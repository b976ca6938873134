//! Wire types and conversions from domain types

use menucheck_domain::{AdditiveCode, AllergenCode, CanonicalProduct, ImportWarning};
use menucheck_extractor::{AllergenSuggestion, MenuParseResult};
use menucheck_importer::ImportResult;
use serde::{Deserialize, Serialize};

/// A canonical product on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    /// Product identifier
    pub id: String,
    /// Product name
    pub name: String,
    /// Allergen keys (`"a"`..`"n"`)
    pub allergens: Vec<String>,
    /// Additive keys (`"1"`..`"10"`)
    pub additives: Vec<String>,
}

impl From<&CanonicalProduct> for ProductDto {
    fn from(product: &CanonicalProduct) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            allergens: product.allergens.iter().map(|c| c.key().to_string()).collect(),
            additives: product.additives.iter().map(|c| c.key().to_string()).collect(),
        }
    }
}

fn products(products: &[CanonicalProduct]) -> Vec<ProductDto> {
    products.iter().map(ProductDto::from).collect()
}

/// `{products, warnings}` envelope shared by analysis and import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsResponse {
    /// Canonical products
    pub products: Vec<ProductDto>,
    /// Warnings in encounter order
    pub warnings: Vec<String>,
}

impl From<MenuParseResult> for ProductsResponse {
    fn from(result: MenuParseResult) -> Self {
        Self {
            products: products(&result.products),
            warnings: result.warnings,
        }
    }
}

impl From<ImportResult> for ProductsResponse {
    fn from(result: ImportResult) -> Self {
        Self {
            products: products(&result.products),
            warnings: result.warnings.iter().map(ImportWarning::to_string).collect(),
        }
    }
}

/// Suggestion request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestRequest {
    /// Product to suggest codes for
    #[serde(rename = "productName", default)]
    pub product_name: Option<String>,
}

/// Suggestion response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    /// Allergen keys
    pub allergens: Vec<String>,
    /// Additive keys
    pub additives: Vec<String>,
    /// Explanation
    pub reasoning: String,
}

impl From<AllergenSuggestion> for SuggestResponse {
    fn from(suggestion: AllergenSuggestion) -> Self {
        Self {
            allergens: suggestion.allergens.iter().map(|c| c.key().to_string()).collect(),
            additives: suggestion.additives.iter().map(|c| c.key().to_string()).collect(),
            reasoning: suggestion.reasoning,
        }
    }
}

/// One vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// Wire key
    pub key: String,
    /// Code as printed on menus
    pub code: String,
    /// Human-readable label
    pub label: String,
}

/// The closed vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodesResponse {
    /// Allergen codes A-N
    pub allergens: Vec<CodeEntry>,
    /// Additive codes 1-10
    pub additives: Vec<CodeEntry>,
}

impl CodesResponse {
    /// Build the listing from the registry
    pub fn from_registry() -> Self {
        Self {
            allergens: AllergenCode::ALL
                .iter()
                .map(|code| CodeEntry {
                    key: code.key().to_string(),
                    code: code.display_code(),
                    label: code.label().to_string(),
                })
                .collect(),
            additives: AdditiveCode::ALL
                .iter()
                .map(|code| CodeEntry {
                    key: code.key().to_string(),
                    code: code.key().to_string(),
                    label: code.label().to_string(),
                })
                .collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall status
    pub status: String,
    /// Whether a provider credential is configured
    pub ai_enabled: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
