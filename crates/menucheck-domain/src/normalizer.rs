//! Product normalization - from candidates to canonical products
//!
//! Names are trimmed and empty names dropped; each product's code lists are
//! deduplicated; products are then deduplicated by case-insensitive name.
//! The first occurrence wins and later duplicates are dropped whole. Their
//! codes are never merged into the kept product.

use crate::product::{CanonicalProduct, ProductCandidate, ProductId};
use std::collections::HashSet;

/// Drop repeated codes, keeping the first occurrence of each
pub fn dedupe_codes<T: PartialEq + Copy>(values: &[T]) -> Vec<T> {
    let mut unique = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(*value);
        }
    }
    unique
}

/// Merge candidates from any source into unique canonical products
///
/// # Examples
///
/// ```
/// use menucheck_domain::{normalize, AllergenCode, ProductCandidate};
///
/// let products = normalize(vec![
///     ProductCandidate::new("  Gulasch ").with_allergens([AllergenCode::I]),
///     ProductCandidate::new("gulasch").with_allergens([AllergenCode::A]),
///     ProductCandidate::new("   "),
/// ]);
///
/// assert_eq!(products.len(), 1);
/// assert_eq!(products[0].name, "Gulasch");
/// assert_eq!(products[0].allergens, vec![AllergenCode::I]);
/// ```
pub fn normalize(candidates: impl IntoIterator<Item = ProductCandidate>) -> Vec<CanonicalProduct> {
    let mut seen_names = HashSet::new();
    let mut products = Vec::new();

    for candidate in candidates {
        let name = candidate.name.trim();
        if name.is_empty() {
            continue;
        }

        if !seen_names.insert(name.to_lowercase()) {
            continue;
        }

        products.push(CanonicalProduct {
            id: ProductId::new(),
            name: name.to_string(),
            allergens: dedupe_codes(&candidate.allergens),
            additives: dedupe_codes(&candidate.additives),
        });
    }

    products
}
