//! Menucheck Importer
//!
//! Deterministic import of product tables typed or exported by people.
//!
//! # Overview
//!
//! Two input shapes are supported:
//!
//! - **CSV with header**: columns are located by header aliases
//!   (`Name`/`Produkt`/`Gericht`, `Allergene`, `Zusatzstoffe`, ...)
//! - **Pasted rows**: tab- or semicolon-delimited rows copied from a
//!   spreadsheet, with columns in fixed order name, allergens, additives and
//!   an optional header row
//!
//! Both feed one row builder that trims the name, resolves the code fields
//! through the domain token resolver and records row-numbered warnings.
//! The results are normalized into canonical products.
//!
//! # Architecture
//!
//! ```text
//! CSV / paste → table reader → row builder → candidates → normalizer → products
//! ```
//!
//! # Example Usage
//!
//! ```
//! use menucheck_importer::import_paste;
//!
//! let result = import_paste("Caesar Salad;A,C,D;1,4\nTomatensuppe;I;2").unwrap();
//! assert_eq!(result.products.len(), 2);
//! assert!(result.warnings.is_empty());
//! ```

#![warn(missing_docs)]

mod error;
mod headers;
mod import;
mod reader;
mod rows;

pub use error::ImportError;
pub use headers::{
    normalize_header, ADDITIVE_HEADERS, ALLERGEN_HEADERS, NAME_HEADERS,
};
pub use import::{import_csv, import_paste, ImportResult};
pub use reader::{detect_delimiter, read_delimited, read_with_header, HeaderTable};
pub use rows::{build_candidate, parse_header_table, parse_headerless_rows, RowOutcome, TableParse};
