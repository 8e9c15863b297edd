use sqlparser::ast::{BinaryOperator, Expr, UnaryOperator, Value};

use crate::detector::condition::{ComparisonOp, ConditionExpr, LogicalOp};
use crate::detector::value::ConstantValue;
use crate::parser::names::{column_path, normalize_ident};

/// Lower a parsed `sqlparser` expression into a [`ConditionExpr`].
///
/// Chains of the same boolean connective are flattened into one
/// [`ConditionExpr::Logical`] node; anything without a counterpart in
/// `ConditionExpr` becomes [`ConditionExpr::Opaque`].
pub fn lower_condition(expr: &Expr) -> ConditionExpr {
    match expr {
        Expr::BinaryOp { left, op, right } => match op {
            BinaryOperator::And => lower_logical(LogicalOp::And, expr),
            BinaryOperator::Or => lower_logical(LogicalOp::Or, expr),
            _ => match comparison_op(op) {
                Some(cmp) => ConditionExpr::comparison(
                    cmp,
                    lower_condition(left),
                    lower_condition(right),
                ),
                None => opaque(expr),
            },
        },
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: inner,
        } => ConditionExpr::negate(lower_condition(inner)),
        Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: inner,
        } => match lower_condition(inner) {
            ConditionExpr::Literal(value) => match negate_numeric(&value) {
                Some(negated) => ConditionExpr::literal(negated),
                None => opaque(expr),
            },
            _ => opaque(expr),
        },
        Expr::UnaryOp {
            op: UnaryOperator::Plus,
            expr: inner,
        } => match lower_condition(inner) {
            literal @ ConditionExpr::Literal(ConstantValue::Integer(_) | ConstantValue::Float(_)) => {
                literal
            }
            _ => opaque(expr),
        },
        Expr::Nested(inner) => ConditionExpr::paren(lower_condition(inner)),
        Expr::Identifier(ident) => ConditionExpr::column(normalize_ident(ident)),
        Expr::CompoundIdentifier(parts) => ConditionExpr::column(column_path(parts)),
        Expr::Value(v) => match constant_value(&v.value) {
            Some(value) => ConditionExpr::literal(value),
            None => opaque(expr),
        },
        _ => opaque(expr),
    }
}

fn lower_logical(op: LogicalOp, expr: &Expr) -> ConditionExpr {
    let mut operands = Vec::new();
    collect_operands(op, expr, &mut operands);
    ConditionExpr::Logical { op, operands }
}

fn collect_operands(op: LogicalOp, expr: &Expr, out: &mut Vec<ConditionExpr>) {
    let wanted = match op {
        LogicalOp::And => BinaryOperator::And,
        LogicalOp::Or => BinaryOperator::Or,
    };
    match expr {
        Expr::BinaryOp {
            left,
            op: found,
            right,
        } if *found == wanted => {
            collect_operands(op, left, out);
            collect_operands(op, right, out);
        }
        other => out.push(lower_condition(other)),
    }
}

fn comparison_op(op: &BinaryOperator) -> Option<ComparisonOp> {
    match op {
        BinaryOperator::Eq => Some(ComparisonOp::Equals),
        BinaryOperator::NotEq => Some(ComparisonOp::NotEquals),
        BinaryOperator::Lt => Some(ComparisonOp::Lt),
        BinaryOperator::Gt => Some(ComparisonOp::Gt),
        BinaryOperator::LtEq => Some(ComparisonOp::LtEq),
        BinaryOperator::GtEq => Some(ComparisonOp::GtEq),
        _ => None,
    }
}

/// Convert a SQL literal into a [`ConstantValue`], or `None` for literals
/// without a constant meaning (placeholders, hex/bit strings, ...).
pub fn constant_value(value: &Value) -> Option<ConstantValue> {
    match value {
        Value::Number(n, _) => parse_number(n),
        Value::SingleQuotedString(s)
        | Value::DoubleQuotedString(s)
        | Value::NationalStringLiteral(s)
        | Value::EscapedStringLiteral(s) => Some(ConstantValue::String(s.clone())),
        Value::Boolean(b) => Some(ConstantValue::Boolean(*b)),
        Value::Null => Some(ConstantValue::Null),
        _ => None,
    }
}

/// Parse a numeric literal: `i64` when it fits, `f64` otherwise.
pub fn parse_number(text: &str) -> Option<ConstantValue> {
    let is_integer_literal = text.chars().all(|c| c.is_ascii_digit());
    if is_integer_literal {
        if let Ok(i) = text.parse::<i64>() {
            return Some(ConstantValue::Integer(i));
        }
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(ConstantValue::Float)
}

fn negate_numeric(value: &ConstantValue) -> Option<ConstantValue> {
    match value {
        ConstantValue::Integer(i) => Some(
            i.checked_neg()
                .map_or(ConstantValue::Float(-(*i as f64)), ConstantValue::Integer),
        ),
        ConstantValue::Float(f) => Some(ConstantValue::Float(-f)),
        _ => None,
    }
}

fn opaque(expr: &Expr) -> ConditionExpr {
    ConditionExpr::Opaque {
        sql: expr.to_string(),
    }
}
