use serde::{Deserialize, Serialize};
use sqlparser::ast::{Expr, Query, SetExpr, Spanned, Statement};
use sqlparser::dialect::{Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::{Parser, ParserError};
use std::fmt;

use crate::detector::condition::ParsedStatement;
use crate::parser::expr::lower_condition;
use crate::parser::source::SourceMap;

/// SQL dialect used to parse the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// ANSI-ish generic dialect.
    Generic,
    /// MySQL, the default.
    #[default]
    MySql,
    /// `PostgreSQL`.
    PostgreSql,
    /// `SQLite`.
    Sqlite,
}

impl SqlDialect {
    fn dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::Generic => write!(f, "generic"),
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::PostgreSql => write!(f, "postgresql"),
            SqlDialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for SqlDialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(SqlDialect::Generic),
            "mysql" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" => Ok(SqlDialect::PostgreSql),
            "sqlite" => Ok(SqlDialect::Sqlite),
            _ => Err(format!("Invalid SQL dialect: {s}")),
        }
    }
}

/// Failure to turn SQL text into statements.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The text is not valid SQL for the selected dialect.
    #[error("{dialect} SQL parse error: {source}")]
    Syntax {
        /// Dialect the text was parsed with.
        dialect: SqlDialect,
        /// Underlying parser error.
        source: ParserError,
    },
}

/// Parse `sql` and lower every statement into a [`ParsedStatement`].
///
/// Each `SELECT` branch of a set operation (`UNION`, `EXCEPT`, ...) and each
/// common table expression body becomes its own statement, CTEs first. `UPDATE` and `DELETE` carry their filter; every other
/// statement is returned without one.
pub fn parse_statements(sql: &str, dialect: SqlDialect) -> Result<Vec<ParsedStatement>, ParseError> {
    let parser_dialect = dialect.dialect();
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|source| ParseError::Syntax { dialect, source })?;

    let source = SourceMap::new(sql)
        .with_backslash_escapes(parser_dialect.supports_string_literal_backslash_escape());
    let mut parsed = Vec::with_capacity(statements.len());
    for statement in &statements {
        lower_statement(statement, &source, &mut parsed);
    }
    Ok(parsed)
}

fn lower_statement(statement: &Statement, source: &SourceMap, out: &mut Vec<ParsedStatement>) {
    match statement {
        Statement::Query(query) => lower_query(query, source, out),
        Statement::Delete(delete) => {
            out.push(filtered_statement("DELETE", delete.selection.as_ref(), source));
        }
        Statement::Update { selection, .. } => {
            out.push(filtered_statement("UPDATE", selection.as_ref(), source));
        }
        other => out.push(ParsedStatement::unfiltered(statement_kind(other))),
    }
}

fn lower_query(query: &Query, source: &SourceMap, out: &mut Vec<ParsedStatement>) {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            lower_query(&cte.query, source, out);
        }
    }
    lower_set_expr(&query.body, source, out);
}

fn lower_set_expr(body: &SetExpr, source: &SourceMap, out: &mut Vec<ParsedStatement>) {
    match body {
        SetExpr::Select(select) => {
            out.push(filtered_statement("SELECT", select.selection.as_ref(), source));
        }
        SetExpr::Query(query) => lower_query(query, source, out),
        SetExpr::SetOperation { left, right, .. } => {
            lower_set_expr(left, source, out);
            lower_set_expr(right, source, out);
        }
        _ => out.push(ParsedStatement::unfiltered("SELECT")),
    }
}

fn filtered_statement(kind: &str, selection: Option<&Expr>, source: &SourceMap) -> ParsedStatement {
    let Some(expr) = selection else {
        return ParsedStatement::unfiltered(kind);
    };
    let condition = lower_condition(expr);
    let (position, text) = source.where_clause(expr.span()).unwrap_or_default();
    ParsedStatement::filtered(kind, condition, position, text)
}

/// Leading keyword of a statement, e.g. `INSERT` or `CREATE`.
fn statement_kind(statement: &Statement) -> String {
    statement
        .to_string()
        .split_whitespace()
        .next()
        .map_or_else(|| "UNKNOWN".to_string(), str::to_ascii_uppercase)
}
