//! Detect tautological `WHERE` clauses, the `OR 1=1` family of SQL injection, by static analysis.
//!
//! ```text
//! SQL text -> parser (sqlparser + lowering) -> ParsedStatement
//!          -> detector::tautology (uses detector::value::compare_equal)
//!          -> DetectionResult
//! ```
#![warn(missing_docs)]

/// Constant comparison, tautology folding, findings, and the SQL analysis pipeline.
pub mod detector;
/// Text, JSON and Markdown rendering of findings.
pub mod output;
/// SQL parsing over `sqlparser`, expression lowering and source-text recovery.
pub mod parser;

pub use detector::analyzer::{analyze_sql, analyze_statements, AnalysisReport};
pub use detector::condition::{ComparisonOp, ConditionExpr, LogicalOp, ParsedStatement, WhereClause};
pub use detector::result::{DetectionResult, InjectionDetail, Severity};
pub use detector::tautology::{detect_tautology, evaluate, is_tautology, Verdict};
pub use detector::value::{compare_equal, ComparisonResult, ConstantValue};
pub use parser::sql_parser::{parse_statements, ParseError, SqlDialect};
