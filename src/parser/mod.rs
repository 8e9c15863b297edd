/// Lowering of `sqlparser` expressions into condition trees.
pub mod expr;
/// Identifier normalization helpers (quoted vs unquoted, qualified names).
pub mod names;
/// Mapping of parser spans back to character offsets and original SQL text.
pub mod source;
/// SQL text to [`crate::detector::condition::ParsedStatement`] conversion over `sqlparser`.
pub mod sql_parser;
