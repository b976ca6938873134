//! Product module - candidates from ingestion and their canonical form

use crate::codes::{AdditiveCode, AllergenCode};
use std::fmt;

/// Unique identifier for a canonical product based on UUIDv7
///
/// Opaque to consumers; chronologically sortable so products created by one
/// normalization pass keep a stable relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(u128);

impl ProductId {
    /// Generate a new UUIDv7-based ProductId
    ///
    /// # Examples
    ///
    /// ```
    /// use menucheck_domain::ProductId;
    ///
    /// let id = ProductId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Parse a ProductId from its string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid product id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// A product as produced by one ingestion path
///
/// Not yet deduplicated against its siblings. The name may be empty or padded
/// and the code lists may repeat entries; the normalizer cleans both up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductCandidate {
    /// Product name as found in the input
    pub name: String,

    /// Allergen codes (duplicates allowed)
    pub allergens: Vec<AllergenCode>,

    /// Additive codes (duplicates allowed)
    pub additives: Vec<AdditiveCode>,
}

impl ProductCandidate {
    /// Create a candidate without any codes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allergens: Vec::new(),
            additives: Vec::new(),
        }
    }

    /// Attach allergen codes
    pub fn with_allergens(mut self, allergens: impl IntoIterator<Item = AllergenCode>) -> Self {
        self.allergens.extend(allergens);
        self
    }

    /// Attach additive codes
    pub fn with_additives(mut self, additives: impl IntoIterator<Item = AdditiveCode>) -> Self {
        self.additives.extend(additives);
        self
    }
}

/// A deduplicated, validated menu item
///
/// Invariants: `name` is trimmed and non-empty; `allergens` and `additives`
/// contain no duplicates. Order inside the code lists carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalProduct {
    /// Opaque identifier
    pub id: ProductId,

    /// Trimmed, non-empty name
    pub name: String,

    /// Distinct allergen codes
    pub allergens: Vec<AllergenCode>,

    /// Distinct additive codes
    pub additives: Vec<AdditiveCode>,
}

impl CanonicalProduct {
    /// Whether neither allergens nor additives are declared
    pub fn has_missing_declarations(&self) -> bool {
        self.allergens.is_empty() && self.additives.is_empty()
    }
}

impl From<&CanonicalProduct> for ProductCandidate {
    fn from(product: &CanonicalProduct) -> Self {
        Self {
            name: product.name.clone(),
            allergens: product.allergens.clone(),
            additives: product.additives.clone(),
        }
    }
}
