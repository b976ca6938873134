//! Row builder and the two table shapes that feed it

use crate::headers::{
    find_column, looks_like_header_row, ADDITIVE_HEADERS, ALLERGEN_HEADERS, NAME_HEADERS,
};
use menucheck_domain::{parse_additive_input, parse_allergen_input, ImportWarning, ProductCandidate};

/// Result of building one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// The candidate, unless the row was skipped
    pub candidate: Option<ProductCandidate>,

    /// Warnings for this row, in order
    pub warnings: Vec<ImportWarning>,
}

/// Candidates and warnings from a whole table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableParse {
    /// Candidates in row order
    pub candidates: Vec<ProductCandidate>,

    /// Warnings in row order
    pub warnings: Vec<ImportWarning>,
}

impl TableParse {
    fn push(&mut self, outcome: RowOutcome) {
        self.warnings.extend(outcome.warnings);
        if let Some(candidate) = outcome.candidate {
            self.candidates.push(candidate);
        }
    }
}

/// Build a candidate from the three raw fields of one row
///
/// A row without a name is skipped before its code fields are resolved, so
/// it never produces unknown-token warnings. Unknown tokens in a named row
/// are reported but do not drop the row.
pub fn build_candidate(name: &str, allergens: &str, additives: &str, row_number: usize) -> RowOutcome {
    let name = name.trim();
    if name.is_empty() {
        return RowOutcome {
            candidate: None,
            warnings: vec![ImportWarning::for_row(
                row_number,
                format!("Row {} skipped: product name is missing.", row_number),
            )],
        };
    }

    let allergens = parse_allergen_input(allergens);
    let additives = parse_additive_input(additives);

    let mut warnings = Vec::new();
    if !allergens.invalid_tokens.is_empty() {
        warnings.push(ImportWarning::for_row(
            row_number,
            format!(
                "Row {}: unknown allergens ignored ({}).",
                row_number,
                allergens.invalid_tokens.join(", ")
            ),
        ));
    }
    if !additives.invalid_tokens.is_empty() {
        warnings.push(ImportWarning::for_row(
            row_number,
            format!(
                "Row {}: unknown additives ignored ({}).",
                row_number,
                additives.invalid_tokens.join(", ")
            ),
        ));
    }

    RowOutcome {
        candidate: Some(
            ProductCandidate::new(name)
                .with_allergens(allergens.keys)
                .with_additives(additives.keys),
        ),
        warnings,
    }
}

fn cell(row: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
}

/// Parse data rows whose columns are named by `headers`
///
/// Row numbers count the header as row 1, so the first data row is row 2.
pub fn parse_header_table(headers: &[String], rows: &[Vec<String>]) -> TableParse {
    let name_column = find_column(headers, NAME_HEADERS);
    let allergen_column = find_column(headers, ALLERGEN_HEADERS);
    let additive_column = find_column(headers, ADDITIVE_HEADERS);

    let mut table = TableParse::default();
    for (index, row) in rows.iter().enumerate() {
        table.push(build_candidate(
            cell(row, name_column),
            cell(row, allergen_column),
            cell(row, additive_column),
            index + 2,
        ));
    }
    table
}

/// Parse positional rows (name, allergens, additives)
///
/// When the first row contains a name alias it is treated as a header and
/// skipped; row numbers then start at 2, otherwise at 1.
pub fn parse_headerless_rows(rows: &[Vec<String>]) -> TableParse {
    let has_header = rows.first().is_some_and(|row| looks_like_header_row(row));
    let (data, offset) = if has_header { (&rows[1..], 2) } else { (rows, 1) };

    let mut table = TableParse::default();
    for (index, row) in data.iter().enumerate() {
        table.push(build_candidate(
            cell(row, Some(0)),
            cell(row, Some(1)),
            cell(row, Some(2)),
            index + offset,
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use menucheck_domain::{AdditiveCode, AllergenCode};

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_build_candidate_resolves_codes() {
        let outcome = build_candidate("  Gulasch ", "I, A", "4", 2);
        let candidate = outcome.candidate.unwrap();
        assert_eq!(candidate.name, "Gulasch");
        assert_eq!(candidate.allergens, vec![AllergenCode::I, AllergenCode::A]);
        assert_eq!(candidate.additives, vec![AdditiveCode::FlavourEnhancer]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_build_candidate_skips_missing_name_without_token_warnings() {
        let outcome = build_candidate("   ", "X", "99", 3);
        assert!(outcome.candidate.is_none());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].source_row, Some(3));
        assert_eq!(
            outcome.warnings[0].message,
            "Row 3 skipped: product name is missing."
        );
    }

    #[test]
    fn test_build_candidate_reports_unknown_tokens_but_keeps_row() {
        let outcome = build_candidate("Pommes", "A, Q", "1, 42, foo", 5);
        let candidate = outcome.candidate.unwrap();
        assert_eq!(candidate.allergens, vec![AllergenCode::A]);
        assert_eq!(candidate.additives, vec![AdditiveCode::Colouring]);

        let messages: Vec<_> = outcome.warnings.iter().map(|w| w.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Row 5: unknown allergens ignored (Q).",
                "Row 5: unknown additives ignored (42, foo).",
            ]
        );
    }

    #[test]
    fn test_header_table_locates_columns_by_alias() {
        let headers = row(&["Zusatzstoffe", "Gericht", "Allergen-Kürzel"]);
        let rows = vec![row(&["2", "Currywurst", "J"]), row(&["", "", "X"])];

        let table = parse_header_table(&headers, &rows);
        assert_eq!(table.candidates.len(), 1);
        assert_eq!(table.candidates[0].name, "Currywurst");
        assert_eq!(table.candidates[0].allergens, vec![AllergenCode::J]);
        assert_eq!(table.candidates[0].additives, vec![AdditiveCode::Preservative]);
        assert_eq!(table.warnings.len(), 1);
        assert_eq!(table.warnings[0].source_row, Some(3));
    }

    #[test]
    fn test_header_table_without_code_columns() {
        let headers = row(&["Name", "Preis"]);
        let rows = vec![row(&["Wasser", "2,50"])];

        let table = parse_header_table(&headers, &rows);
        assert_eq!(table.candidates.len(), 1);
        assert!(table.candidates[0].allergens.is_empty());
        assert!(table.warnings.is_empty());
    }

    #[test]
    fn test_header_table_short_rows() {
        let headers = row(&["Name", "Allergene", "Zusatzstoffe"]);
        let rows = vec![row(&["Brot"])];

        let table = parse_header_table(&headers, &rows);
        assert_eq!(table.candidates[0].name, "Brot");
    }

    #[test]
    fn test_headerless_rows_without_header() {
        let rows = vec![row(&["Caesar Salad", "A,C,D", "1,4"]), row(&["", "A", ""])];
        let table = parse_headerless_rows(&rows);

        assert_eq!(table.candidates.len(), 1);
        assert_eq!(table.warnings[0].source_row, Some(2));
    }

    #[test]
    fn test_headerless_rows_with_detected_header() {
        let rows = vec![
            row(&["Produkt", "Allergene", "Zusatzstoffe"]),
            row(&["Schnitzel", "A,C", ""]),
            row(&[" ", "", ""]),
        ];
        let table = parse_headerless_rows(&rows);

        assert_eq!(table.candidates.len(), 1);
        assert_eq!(table.candidates[0].name, "Schnitzel");
        assert_eq!(table.warnings.len(), 1);
        assert_eq!(table.warnings[0].source_row, Some(3));
    }

    #[test]
    fn test_headerless_empty() {
        let table = parse_headerless_rows(&[]);
        assert!(table.candidates.is_empty());
        assert!(table.warnings.is_empty());
    }
}
