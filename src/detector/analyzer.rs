use serde::Serialize;
use tracing::{debug, warn};

use crate::detector::condition::ParsedStatement;
use crate::detector::result::{DetectionResult, InjectionDetail};
use crate::detector::tautology::detect_tautology;
use crate::parser::sql_parser::{parse_statements, ParseError, SqlDialect};

/// Detection outcome of a single statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementReport {
    /// 0-based index of the statement in the analyzed text.
    pub index: usize,
    /// Statement kind, e.g. `SELECT`.
    pub kind: String,
    /// Whether the statement has a `WHERE` clause.
    pub filtered: bool,
    /// Findings for this statement alone.
    pub result: DetectionResult,
}

/// Detection outcome of a whole SQL text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Per-statement outcomes, in source order.
    pub statements: Vec<StatementReport>,
    /// Every finding of every statement, in source order.
    pub result: DetectionResult,
}

impl AnalysisReport {
    /// Findings paired with the index of the statement they belong to.
    pub fn findings(&self) -> impl Iterator<Item = (usize, &InjectionDetail)> + '_ {
        self.statements
            .iter()
            .flat_map(|s| s.result.details().iter().map(move |d| (s.index, d)))
    }
}

/// Detection outcome of one named input (a file or inline SQL).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceReport {
    /// Input name, e.g. a file path.
    pub source: String,
    /// Dialect the input was parsed with.
    pub dialect: SqlDialect,
    /// Analysis of the input.
    #[serde(flatten)]
    pub report: AnalysisReport,
}

/// Run tautology detection over already-parsed statements.
pub fn analyze_statements(statements: &[ParsedStatement]) -> AnalysisReport {
    let mut report = AnalysisReport::default();

    for (index, stmt) in statements.iter().enumerate() {
        let mut result = DetectionResult::new();
        detect_tautology(stmt, &mut result);

        debug!(
            index,
            kind = %stmt.kind,
            filtered = stmt.filter.is_some(),
            detected = result.is_detected(),
            "Analyzed statement"
        );
        for detail in result.details() {
            warn!(
                index,
                pattern = %detail.pattern,
                position = detail.position,
                fragment = %detail.fragment,
                "Tautological WHERE clause detected"
            );
        }

        report.result.absorb(&result);
        report.statements.push(StatementReport {
            index,
            kind: stmt.kind.clone(),
            filtered: stmt.filter.is_some(),
            result,
        });
    }

    report
}

/// Parse `sql` with `dialect` and run tautology detection on every statement.
pub fn analyze_sql(sql: &str, dialect: SqlDialect) -> Result<AnalysisReport, ParseError> {
    let statements = parse_statements(sql, dialect)?;
    debug!(statements = statements.len(), %dialect, "Parsed SQL");
    Ok(analyze_statements(&statements))
}
