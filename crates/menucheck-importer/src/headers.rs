//! Header aliases for locating columns

/// Headers that name the product column
pub const NAME_HEADERS: &[&str] = &["name", "produkt", "produktname", "gericht", "speise"];

/// Headers that name the allergen column
pub const ALLERGEN_HEADERS: &[&str] = &[
    "allergene",
    "allergen",
    "allergenekuerzel",
    "allergenekürzel",
    "allergenkurzel",
    "allergenkürzel",
    "allergenecodes",
];

/// Headers that name the additive column
pub const ADDITIVE_HEADERS: &[&str] = &[
    "zusatzstoffe",
    "zusatzstoff",
    "zusatzstoffcodes",
    "zusatzstoffkuerzel",
    "zusatzstoffkürzel",
    "zusatzstoffkurzel",
    "additives",
];

/// Normalize a header cell: trim, lowercase, drop spaces, underscores and hyphens
///
/// # Examples
///
/// ```
/// use menucheck_importer::normalize_header;
///
/// assert_eq!(normalize_header(" Allergene_Kürzel "), "allergenekürzel");
/// assert_eq!(normalize_header("Produkt-Name"), "produktname");
/// ```
pub fn normalize_header(value: &str) -> String {
    value
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .collect()
}

/// Index of the first header (left to right) matching one of `aliases`
pub(crate) fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| aliases.contains(&normalize_header(header).as_str()))
}

/// Whether a row looks like a header row (any cell is a name alias)
pub(crate) fn looks_like_header_row(row: &[String]) -> bool {
    row.iter()
        .any(|cell| NAME_HEADERS.contains(&normalize_header(cell).as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_header_variants() {
        assert_eq!(normalize_header("NAME"), "name");
        assert_eq!(normalize_header("Zusatz stoffe"), "zusatzstoffe");
        assert_eq!(normalize_header("allergen-codes"), "allergencodes");
        assert_eq!(normalize_header("\u{feff}Name"), "name");
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let row = headers(&["Preis", "Gericht", "Name", "Allergene"]);
        assert_eq!(find_column(&row, NAME_HEADERS), Some(1));
        assert_eq!(find_column(&row, ALLERGEN_HEADERS), Some(3));
        assert_eq!(find_column(&row, ADDITIVE_HEADERS), None);
    }

    #[test]
    fn test_looks_like_header_row() {
        assert!(looks_like_header_row(&headers(&["Produkt", "Allergene"])));
        assert!(!looks_like_header_row(&headers(&["Caesar Salad", "A,C"])));
    }
}
