//! Error types for the Importer

use thiserror::Error;

/// Errors that stop an import before any row is looked at
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImportError {
    /// Nothing to import
    #[error("No data to import")]
    EmptyInput,
}
