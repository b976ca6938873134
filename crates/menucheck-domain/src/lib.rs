//! Menucheck Domain Layer
//!
//! Core vocabulary and pure business logic for turning menu input into
//! allergen- and additive-annotated products.
//!
//! ## Key Concepts
//!
//! - **Codes**: the closed allergen (`A`-`N`) and additive (`1`-`10`) vocabularies
//! - **Token resolution**: mapping human-entered codes or labels onto codes
//! - **Candidates**: products as produced by any ingestion path, not yet deduplicated
//! - **Canonical products**: trimmed, deduplicated products ready for consumers
//! - **Warnings**: advisory, source-tagged notes collected in encounter order
//!
//! ## Architecture
//!
//! This crate holds no I/O. Parsing, rate limiting, extraction and HTTP live in
//! other crates; the only external interaction is described by the
//! [`traits::LlmProvider`] port.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codes;
pub mod normalizer;
pub mod product;
pub mod resolver;
pub mod traits;
pub mod warning;

// Re-exports for convenience
pub use codes::{format_additives, format_allergens, AdditiveCode, AllergenCode, ExportMode};
pub use normalizer::{dedupe_codes, normalize};
pub use product::{CanonicalProduct, ProductCandidate, ProductId};
pub use resolver::{
    parse_additive_input, parse_allergen_input, resolve_additive_token, resolve_allergen_token,
    split_token_list, TokenParse,
};
pub use traits::{ImageInput, LlmProvider, OutputSchema, Prompt};
pub use warning::{ImportWarning, WarningLog, WarningSource};
