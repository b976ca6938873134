//! Advisory warnings collected while ingesting a menu

use std::fmt;

/// Stage that produced a warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningSource {
    /// Deterministic table import (CSV or paste)
    Import,
    /// Input acquisition (truncation, recognition)
    Acquisition,
    /// External extraction service
    Extraction,
}

impl WarningSource {
    /// Get the source name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSource::Import => "import",
            WarningSource::Acquisition => "acquisition",
            WarningSource::Extraction => "extraction",
        }
    }
}

/// A human-readable note that never blocks processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// Message shown to the user
    pub message: String,

    /// One-based row number in the user's input, when the warning is row-bound
    pub source_row: Option<usize>,

    /// Stage that produced the warning
    pub source: WarningSource,
}

impl ImportWarning {
    /// Create a warning that is not bound to a row
    pub fn new(source: WarningSource, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_row: None,
            source,
        }
    }

    /// Create a warning bound to a row of tabular input
    pub fn for_row(row: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_row: Some(row),
            source: WarningSource::Import,
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered warning log shared by every stage of one request
///
/// Stages append; nothing is ever reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningLog {
    entries: Vec<ImportWarning>,
}

impl WarningLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single warning
    pub fn push(&mut self, warning: ImportWarning) {
        self.entries.push(warning);
    }

    /// Append a plain message from the given stage
    pub fn note(&mut self, source: WarningSource, message: impl Into<String>) {
        self.push(ImportWarning::new(source, message));
    }

    /// Append every warning from another stage, keeping their order
    pub fn extend(&mut self, warnings: impl IntoIterator<Item = ImportWarning>) {
        self.entries.extend(warnings);
    }

    /// Number of collected warnings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no warning was collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the collected warnings
    pub fn entries(&self) -> &[ImportWarning] {
        &self.entries
    }

    /// Finalize into the plain messages returned to clients
    pub fn into_messages(self) -> Vec<String> {
        self.entries.into_iter().map(|w| w.message).collect()
    }
}

impl FromIterator<ImportWarning> for WarningLog {
    fn from_iter<T: IntoIterator<Item = ImportWarning>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
