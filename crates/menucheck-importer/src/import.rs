//! Import entry points

use crate::error::ImportError;
use crate::reader::{detect_delimiter, read_delimited, read_with_header};
use crate::rows::{parse_header_table, parse_headerless_rows, TableParse};
use menucheck_domain::{normalize, CanonicalProduct, ImportWarning, WarningSource};
use tracing::{debug, info, warn};

/// Products and warnings from one import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Canonical products, unique by case-insensitive name
    pub products: Vec<CanonicalProduct>,

    /// Warnings in row order
    pub warnings: Vec<ImportWarning>,
}

impl ImportResult {
    fn from_table(table: TableParse) -> Self {
        let candidate_count = table.candidates.len();
        let products = normalize(table.candidates);
        debug!(
            "Normalized {} candidates into {} products",
            candidate_count,
            products.len()
        );
        Self {
            products,
            warnings: table.warnings,
        }
    }
}

/// Import a CSV file with a header row
///
/// A file the CSV reader rejects yields no products and one
/// `CSV error: ...` warning per reader error; it is not a hard failure.
///
/// # Examples
///
/// ```
/// use menucheck_importer::import_csv;
///
/// let result = import_csv("Name,Allergene,Zusatzstoffe\nWiener Schnitzel,\"A,C,G\",\n,X,2\n");
/// assert_eq!(result.products.len(), 1);
/// assert_eq!(result.warnings.len(), 1);
/// assert_eq!(result.warnings[0].message, "Row 3 skipped: product name is missing.");
/// ```
pub fn import_csv(text: &str) -> ImportResult {
    let (table, errors) = read_with_header(text);

    if !errors.is_empty() {
        warn!("CSV import rejected with {} reader errors", errors.len());
        return ImportResult {
            products: Vec::new(),
            warnings: errors
                .into_iter()
                .map(|e| ImportWarning::new(WarningSource::Import, format!("CSV error: {}", e)))
                .collect(),
        };
    }

    let result = ImportResult::from_table(parse_header_table(&table.headers, &table.rows));
    info!(
        "CSV import: {} rows, {} products, {} warnings",
        table.rows.len(),
        result.products.len(),
        result.warnings.len()
    );
    result
}

/// Import rows pasted from a spreadsheet
///
/// Columns are name, allergens, additives in that order. An optional header
/// row is recognized and skipped. Quoted cells may hold the delimiter or a
/// line break. Reader errors yield no products and one `Import error: ...`
/// warning each, as in [`import_csv`].
///
/// # Errors
///
/// Returns [`ImportError::EmptyInput`] if the text is blank
pub fn import_paste(text: &str) -> Result<ImportResult, ImportError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let (rows, errors) = read_delimited(text, detect_delimiter(text));

    if !errors.is_empty() {
        warn!("Paste import rejected with {} reader errors", errors.len());
        return Ok(ImportResult {
            products: Vec::new(),
            warnings: errors
                .into_iter()
                .map(|e| ImportWarning::new(WarningSource::Import, format!("Import error: {}", e)))
                .collect(),
        });
    }

    let result = ImportResult::from_table(parse_headerless_rows(&rows));
    info!(
        "Paste import: {} rows, {} products, {} warnings",
        rows.len(),
        result.products.len(),
        result.warnings.len()
    );
    Ok(result)
}
