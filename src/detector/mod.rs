/// SQL-text analysis pipeline and per-statement reports.
pub mod analyzer;
/// Condition trees and parsed statements handed over by the parser.
pub mod condition;
/// Findings and the caller-owned detection result.
pub mod result;
/// Tautology folding of `WHERE` clauses.
pub mod tautology;
/// SQL constants and the type-aware equality comparator.
pub mod value;
