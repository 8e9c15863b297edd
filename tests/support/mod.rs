#![allow(dead_code)]

use std::path::PathBuf;

use sqli_tautology::detector::analyzer::{analyze_sql, AnalysisReport};
use sqli_tautology::detector::condition::ParsedStatement;
use sqli_tautology::detector::result::DetectionResult;
use sqli_tautology::detector::tautology::detect_tautology;
use sqli_tautology::parser::sql_parser::{self, SqlDialect};

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("input.sql");
    std::fs::read_to_string(path).expect("fixture SQL should be readable")
}

pub(crate) fn analyze_fixture(fixture: &str) -> AnalysisReport {
    analyze_sql(&read_fixture_sql(fixture), SqlDialect::MySql).expect("fixture SQL should parse")
}

/// Parse a single statement with the MySQL dialect.
pub(crate) fn parse_one(sql: &str) -> ParsedStatement {
    let mut statements =
        sql_parser::parse_statements(sql, SqlDialect::MySql).expect("SQL should parse");
    assert_eq!(statements.len(), 1, "expected exactly one statement in {sql:?}");
    statements.remove(0)
}

/// Run the detector on a single statement with a fresh result.
pub(crate) fn detect(sql: &str) -> DetectionResult {
    let stmt = parse_one(sql);
    let mut result = DetectionResult::new();
    detect_tautology(&stmt, &mut result);
    result
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}
