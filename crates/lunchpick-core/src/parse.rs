//! Place-list parsing.
//!
//! The source is a spreadsheet exported as CSV: one place per line, name in
//! the first column and an optional link in the second. Parsing never fails;
//! malformed quoting produces a best-effort split.

use csv::{ReaderBuilder, Trim};

use crate::place::{Place, PlaceSet};

const DELIMITER: u8 = b',';

/// Parse raw CSV text into places, in source order.
///
/// Blank lines and rows with an empty first column are dropped. The first
/// non-blank row is treated as a header when its first column mentions
/// "place" or "name" (case-insensitive). That is a heuristic: a real place
/// called "Name's Diner" in the first row would be dropped too.
#[must_use]
pub fn parse_places(raw: &str) -> PlaceSet {
    let rows = raw.lines().map(str::trim).filter(|line| !line.is_empty());

    let mut places = Vec::new();
    for (index, row) in rows.enumerate() {
        let fields = split_fields(row, DELIMITER);
        let name = fields.first().map_or("", |f| f.trim());

        if index == 0 && looks_like_header(name) {
            tracing::debug!(header = row, "skipping header row");
            continue;
        }
        if name.is_empty() {
            continue;
        }

        let url = fields.get(1).map_or("", |f| f.trim());
        places.push(Place::new(name, url));
    }
    places
}

fn looks_like_header(first_field: &str) -> bool {
    let lower = first_field.to_lowercase();
    lower.contains("place") || lower.contains("name")
}

/// Split one line into fields on `delimiter`.
///
/// A quote only opens a quoted field at the start of a field; elsewhere it is
/// a literal character. Inside quotes the delimiter is literal and `""` is one
/// quote character. An unterminated quote runs to the end of the line. Fields
/// come back trimmed.
#[must_use]
pub fn split_fields(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(Ok(record)) => record.iter().map(str::to_string).collect(),
        Some(Err(e)) => {
            tracing::debug!(line, error = %e, "unreadable row");
            Vec::new()
        }
        None => Vec::new(),
    }
}
