//! CSV Codec
//!
//! Parses CSV text into records and serializes records back to CSV.
//!
//! ## Parsing Rules
//! - Blank lines are ignored; a header plus at least one data line is required
//! - The header is split on every comma (not quote-aware)
//! - Data lines are split quote-aware: `"` toggles quoting, `""` inside quotes
//!   is a literal quote, commas inside quotes do not split
//! - Rows whose field count differs from the header are dropped
//!
//! ## Output Format
//! ```text
//! ID,Lead Name,Stage
//! "1","Lead Smith","NEW"
//! "2","Say ""hi""","CUSTOMER"
//! ```

use crate::error::{LeadError, Result};
use crate::record::Record;

/// Outcome of parsing a CSV payload
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Header field names
    pub headers: Vec<String>,

    /// Accepted rows
    pub records: Vec<Record>,

    /// Data rows dropped for arity mismatch
    pub dropped_rows: usize,
}

/// Parse CSV text into records
///
/// Returns an empty vector when there is no header plus data line.
pub fn parse(text: &str) -> Vec<Record> {
    parse_with_report(text).records
}

/// Parse CSV text, also reporting the header and dropped row count
pub fn parse_with_report(text: &str) -> ParseReport {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = match lines.next() {
        Some(line) => line,
        None => return ParseReport::default(),
    };
    let data: Vec<&str> = lines.collect();
    if data.is_empty() {
        return ParseReport::default();
    }

    let headers: Vec<String> = header_line
        .split(',')
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect();

    let mut report = ParseReport {
        headers,
        records: Vec::with_capacity(data.len()),
        dropped_rows: 0,
    };

    for (line_no, line) in data.into_iter().enumerate() {
        let values = parse_line(line);
        if values.len() != report.headers.len() {
            tracing::debug!(
                "Dropping CSV row {}: {} fields, header has {}",
                line_no + 2,
                values.len(),
                report.headers.len()
            );
            report.dropped_rows += 1;
            continue;
        }

        let record = Record::from_pairs(report.headers.iter().cloned().zip(values));
        report.records.push(record);
    }

    report
}

/// Split one CSV line, honoring double quotes
///
/// `a,"b,c",d` → `["a", "b,c", "d"]`. Every field is trimmed.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

/// Serialize records to CSV text
///
/// The header comes from the first record's field names; every value is
/// quoted with embedded quotes doubled.
pub fn serialize(records: &[Record]) -> Result<String> {
    let first = records.first().ok_or(LeadError::EmptyExport)?;
    let headers: Vec<&str> = first.names().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));

    for record in records {
        let line = headers
            .iter()
            .map(|name| quote(record.get(name).unwrap_or("")))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
