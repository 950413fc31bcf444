use super::RecordingSink;
use crate::error::ParseError;
use crate::parser::statement::locate;
use crate::parser::{parse, parse_table_name, ParseMode, SchemaParser};

#[test]
fn test_table_name_forms() {
    assert_eq!(parse_table_name("CREATE TABLE users (id int)").unwrap(), "users");
    assert_eq!(parse_table_name("create table `job_applications`(id int)").unwrap(), "job_applications");
    assert_eq!(
        parse_table_name("CREATE TABLE IF NOT EXISTS  `notes`\n(\n id int\n)").unwrap(),
        "notes"
    );
}

#[test]
fn test_missing_create_table() {
    assert_eq!(parse_table_name("").unwrap_err(), ParseError::NoCreateTable);
    assert_eq!(parse_table_name("hello world").unwrap_err(), ParseError::NoCreateTable);
    assert_eq!(parse_table_name("CREATE TABLE users").unwrap_err(), ParseError::NoCreateTable);
    assert_eq!(parse("SELECT 1").unwrap_err(), ParseError::NoCreateTable);
}

#[test]
fn test_unterminated_body() {
    assert_eq!(parse("CREATE TABLE t (id int, name text").unwrap_err(), ParseError::NoBody);
}

#[test]
fn test_empty_body_has_no_columns() {
    assert_eq!(parse("CREATE TABLE t ()").unwrap_err(), ParseError::NoColumns);
}

#[test]
fn test_statement_text_stops_at_semicolon() {
    let sql = "CREATE TABLE a (id int) ENGINE=InnoDB; CREATE TABLE b (x int, KEY k (x))";
    let stmt = locate(sql).unwrap();
    assert_eq!(stmt.name, "a");
    assert_eq!(stmt.body, Some("id int"));
    assert_eq!(stmt.text, "CREATE TABLE a (id int) ENGINE=InnoDB");
    assert_eq!(stmt.trailing, "CREATE TABLE b (x int, KEY k (x))");

    // Indexes of the second statement do not leak into the first.
    let table = parse(sql).unwrap();
    assert!(table.indexes.is_empty());
}

#[test]
fn test_create_inside_literal_is_ignored() {
    let sql = "CREATE TABLE t (note varchar(50) DEFAULT 'create table x (', id int)";
    let table = parse(sql).unwrap();
    assert_eq!(table.name, "t");
    assert_eq!(table.columns.len(), 2);
}

#[test]
fn test_unknown_trailing_text_is_reported() {
    let sink = RecordingSink::default();
    let parser = SchemaParser::with_sink(ParseMode::Lenient, &sink);
    let table = parser
        .parse("CREATE TABLE t (id int) PARTITION BY HASH(id)")
        .unwrap();

    assert_eq!(table.columns.len(), 1);
    assert!(sink
        .events
        .borrow()
        .contains(&"trailing:PARTITION BY HASH(id)".to_string()));
}

#[test]
fn test_table_options_are_not_reported() {
    let sink = RecordingSink::default();
    let parser = SchemaParser::with_sink(ParseMode::Lenient, &sink);
    parser
        .parse("CREATE TABLE t (id int) ENGINE=InnoDB AUTO_INCREMENT=5 DEFAULT CHARSET=utf8mb4;")
        .unwrap();

    assert!(!sink.events.borrow().iter().any(|e| e.starts_with("trailing:")));
}
