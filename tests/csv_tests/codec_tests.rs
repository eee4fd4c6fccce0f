//! Codec Tests
//!
//! Tests for CSV parsing and serialization.

use leadtable::csv::{parse, parse_line, parse_with_report, serialize};
use leadtable::{LeadError, Record};

// =============================================================================
// Helper Functions
// =============================================================================

fn lead(id: &str, name: &str, stage: &str) -> Record {
    Record::new()
        .with("ID", id)
        .with("Lead Name", name)
        .with("Stage", stage)
}

// =============================================================================
// parse_line Tests
// =============================================================================

#[test]
fn test_parse_line_quoted_comma() {
    assert_eq!(parse_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
}

#[test]
fn test_parse_line_trims_fields() {
    assert_eq!(parse_line("  a , b ,c  "), vec!["a", "b", "c"]);
}

#[test]
fn test_parse_line_doubled_quote_is_literal() {
    assert_eq!(parse_line(r#""say ""hi""",x"#), vec![r#"say "hi""#, "x"]);
}

#[test]
fn test_parse_line_empty_fields() {
    assert_eq!(parse_line(",,"), vec!["", "", ""]);
    assert_eq!(parse_line(r#""",x"#), vec!["", "x"]);
}

// =============================================================================
// parse Tests
// =============================================================================

#[test]
fn test_parse_basic() {
    let text = "ID,Lead Name,Stage\n1,Lead Smith,NEW\n2,Bob,CUSTOMER\n";
    let records = parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "1");
    assert_eq!(records[0].lead_name(), "Lead Smith");
    assert_eq!(records[1].stage(), "CUSTOMER");
    assert_eq!(
        records[0].names().collect::<Vec<_>>(),
        vec!["ID", "Lead Name", "Stage"]
    );
}

#[test]
fn test_parse_header_quotes_stripped() {
    let records = parse("\"ID\", \"Lead Name\"\n1,Alice\n");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Lead Name"), Some("Alice"));
}

#[test]
fn test_parse_skips_blank_lines_and_crlf() {
    let text = "\r\nID,Stage\r\n\r\n1,NEW\r\n   \r\n2,ATTEMPT\r\n";
    let records = parse(text);

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].stage(), "ATTEMPT");
}

#[test]
fn test_parse_requires_header_and_data() {
    assert!(parse("").is_empty());
    assert!(parse("\n\n").is_empty());
    assert!(parse("ID,Stage\n").is_empty());
}

#[test]
fn test_parse_drops_arity_mismatch() {
    let text = "ID,Lead Name,Stage\n1,Alice,NEW\n2,Bob\n3,Carol,NEW,extra\n4,\"Dan, Jr\",ATTEMPT\n";
    let report = parse_with_report(text);

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.dropped_rows, 2);
    assert_eq!(report.records[0].id(), "1");
    assert_eq!(report.records[1].lead_name(), "Dan, Jr");
}

#[test]
fn test_parse_preserves_unknown_columns() {
    let records = parse("ID,Phone,Notes\n7,555-0100,\"call back, urgent\"\n");

    assert_eq!(records[0].get("Phone"), Some("555-0100"));
    assert_eq!(records[0].get("Notes"), Some("call back, urgent"));
}

// =============================================================================
// serialize Tests
// =============================================================================

#[test]
fn test_serialize_format() {
    let text = serialize(&[lead("1", "Say \"hi\"", "NEW")]).unwrap();

    assert_eq!(text, "ID,Lead Name,Stage\n\"1\",\"Say \"\"hi\"\"\",\"NEW\"");
}

#[test]
fn test_serialize_empty_fails() {
    let result = serialize(&[]);

    assert!(matches!(result, Err(LeadError::EmptyExport)));
}

#[test]
fn test_serialize_missing_field_is_empty() {
    let records = vec![lead("1", "A", "NEW"), Record::new().with("ID", "2")];
    let text = serialize(&records).unwrap();

    assert_eq!(text.lines().nth(2), Some("\"2\",\"\",\"\""));
}

#[test]
fn test_round_trip() {
    let records = vec![
        lead("1", "Lead Smith", "NEW"),
        lead("2", "Comma, Inc", "ATTEMPT"),
        lead("3", "The \"Best\" Co", "CUSTOMER"),
        lead("4", "", "NEW"),
    ];

    let parsed = parse(&serialize(&records).unwrap());

    assert_eq!(parsed, records);
}
