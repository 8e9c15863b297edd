/// Text, JSON and on-disk rendering of analysis results.
pub mod formatter;
/// Builds a Markdown findings report.
pub mod report;
