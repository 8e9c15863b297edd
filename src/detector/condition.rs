use serde::{Deserialize, Serialize};
use std::fmt;

use crate::detector::value::ConstantValue;

/// Relational operator of a [`ConditionExpr::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// `=`
    Equals,
    /// `<>` or `!=`
    NotEquals,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOp::Equals => "=",
            ComparisonOp::NotEquals => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::GtEq => ">=",
        };
        f.write_str(symbol)
    }
}

/// Boolean connective of a [`ConditionExpr::Logical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    /// Every operand must hold.
    And,
    /// At least one operand must hold.
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// Boolean expression tree of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionExpr {
    /// `left <op> right`.
    Comparison {
        /// Relational operator.
        op: ComparisonOp,
        /// Left operand.
        left: Box<ConditionExpr>,
        /// Right operand.
        right: Box<ConditionExpr>,
    },
    /// `AND` / `OR` over two or more operands.
    Logical {
        /// Connective shared by all operands.
        op: LogicalOp,
        /// Operands in source order.
        operands: Vec<ConditionExpr>,
    },
    /// `NOT operand`.
    Not(Box<ConditionExpr>),
    /// Column reference, by normalized name.
    ColumnRef {
        /// Dotted column path, unquoted parts lowercased.
        name: String,
    },
    /// Constant literal.
    Literal(ConstantValue),
    /// Parenthesized expression.
    Paren(Box<ConditionExpr>),
    /// Any construct the lowering does not model (functions, subqueries,
    /// placeholders, `IN`, `LIKE`, ...).
    Opaque {
        /// SQL rendering of the construct, for diagnostics.
        sql: String,
    },
}

impl ConditionExpr {
    /// Build a comparison node.
    pub fn comparison(op: ComparisonOp, left: ConditionExpr, right: ConditionExpr) -> Self {
        ConditionExpr::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a column reference.
    pub fn column(name: impl Into<String>) -> Self {
        ConditionExpr::ColumnRef { name: name.into() }
    }

    /// Build a literal node.
    pub fn literal(value: ConstantValue) -> Self {
        ConditionExpr::Literal(value)
    }

    /// Build an `AND` node.
    pub fn and(operands: Vec<ConditionExpr>) -> Self {
        ConditionExpr::Logical {
            op: LogicalOp::And,
            operands,
        }
    }

    /// Build an `OR` node.
    pub fn or(operands: Vec<ConditionExpr>) -> Self {
        ConditionExpr::Logical {
            op: LogicalOp::Or,
            operands,
        }
    }

    /// Build a `NOT` node.
    pub fn negate(operand: ConditionExpr) -> Self {
        ConditionExpr::Not(Box::new(operand))
    }

    /// Build a parenthesized node.
    pub fn paren(inner: ConditionExpr) -> Self {
        ConditionExpr::Paren(Box::new(inner))
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparenthesized(&self) -> &ConditionExpr {
        match self {
            ConditionExpr::Paren(inner) => inner.unparenthesized(),
            other => other,
        }
    }
}

/// The filter of one statement, together with its recovered source text.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    /// Lowered boolean condition.
    pub condition: ConditionExpr,
    /// Character offset of the clause start in the analyzed SQL text.
    pub position: usize,
    /// Original clause text as written, or empty when no span was recoverable.
    pub text: String,
}

/// One analyzable statement, as handed over by the parser.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStatement {
    /// Statement kind, e.g. `SELECT`, `UPDATE`, `DELETE`.
    pub kind: String,
    /// `WHERE` clause, if the statement has one.
    pub filter: Option<WhereClause>,
}

impl ParsedStatement {
    /// Statement without a filter clause.
    pub fn unfiltered(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            filter: None,
        }
    }

    /// Statement filtered by `condition`, whose source text is `text` starting at `position`.
    pub fn filtered(
        kind: impl Into<String>,
        condition: ConditionExpr,
        position: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            filter: Some(WhereClause {
                condition,
                position,
                text: text.into(),
            }),
        }
    }
}
