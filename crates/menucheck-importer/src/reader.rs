//! Delimited table reading on top of the `csv` crate

use csv::{ReaderBuilder, StringRecord};

/// A table whose first non-blank line is a header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    /// Header cells, as written
    pub headers: Vec<String>,

    /// Data rows; only completely empty lines are removed
    pub rows: Vec<Vec<String>>,
}

/// Delimiter for pasted spreadsheet rows: tab if present, else `;`
pub fn detect_delimiter(text: &str) -> u8 {
    if text.contains('\t') {
        b'\t'
    } else {
        b';'
    }
}

/// Pick the CSV delimiter from the header line: the most frequent of
/// `,`, `;` and tab, defaulting to `,`
fn sniff_csv_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let count = |c: char| header.chars().filter(|&h| h == c).count();

    [(b';', count(';')), (b'\t', count('\t'))]
        .into_iter()
        .fold((b',', count(',')), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
        .0
}

fn to_row(record: &StringRecord) -> Vec<String> {
    record.iter().map(str::to_string).collect()
}

/// A line with no content at all; rows of empty cells (`,,`) still count
fn is_empty_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(str::is_empty)
}

fn collect_rows(
    records: impl Iterator<Item = csv::Result<StringRecord>>,
) -> (Vec<Vec<String>>, Vec<String>) {
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for record in records {
        match record {
            Ok(record) if is_empty_line(&record) => {}
            Ok(record) => rows.push(to_row(&record)),
            Err(e) => errors.push(e.to_string()),
        }
    }
    (rows, errors)
}

/// Read CSV text with a header row
///
/// Quoted fields are honored and rows may have any number of fields. Reader
/// errors do not abort the read; they are returned as messages alongside
/// whatever could be read.
pub fn read_with_header(text: &str) -> (HeaderTable, Vec<String>) {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(sniff_csv_delimiter(text))
        .from_reader(text.as_bytes());

    let mut errors = Vec::new();
    let headers = match reader.headers() {
        Ok(record) => to_row(record),
        Err(e) => {
            errors.push(e.to_string());
            Vec::new()
        }
    };

    let (rows, row_errors) = collect_rows(reader.records());
    errors.extend(row_errors);

    (HeaderTable { headers, rows }, errors)
}

/// Read headerless rows split on `delimiter`
///
/// Spreadsheets quote cells that contain the delimiter or a line break, so
/// quoted fields are honored. Reader errors are returned as messages, as in
/// [`read_with_header`].
pub fn read_delimited(text: &str, delimiter: u8) -> (Vec<Vec<String>>, Vec<String>) {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    collect_rows(reader.records())
}
