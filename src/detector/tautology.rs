use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::detector::condition::{ComparisonOp, ConditionExpr, LogicalOp, ParsedStatement};
use crate::detector::result::{DetectionResult, InjectionDetail};
use crate::detector::value::{compare_equal, ComparisonResult, ConstantValue};

/// Classification tag of findings produced by this rule.
pub const TAUTOLOGY_PATTERN: &str = "tautology_injection";

/// Fragment reported when a filter exists but its source text could not be recovered.
pub const WHERE_TEXT_UNAVAILABLE: &str = "<where clause source text unavailable>";

/// Three-valued outcome of folding a condition without row data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// True for every row.
    AlwaysTrue,
    /// False (or unknown) for every row.
    AlwaysFalse,
    /// Cannot be decided statically.
    DependsOnData,
}

impl Verdict {
    /// Logical negation; `DependsOnData` stays undecided.
    pub fn negate(self) -> Self {
        match self {
            Verdict::AlwaysTrue => Verdict::AlwaysFalse,
            Verdict::AlwaysFalse => Verdict::AlwaysTrue,
            Verdict::DependsOnData => Verdict::DependsOnData,
        }
    }

    fn from_bool(value: bool) -> Self {
        if value {
            Verdict::AlwaysTrue
        } else {
            Verdict::AlwaysFalse
        }
    }
}

/// Operand of a comparison after stripping parentheses.
enum Operand<'a> {
    Constant(&'a ConstantValue),
    Column(&'a str),
    Other,
}

fn operand(expr: &ConditionExpr) -> Operand<'_> {
    match expr.unparenthesized() {
        ConditionExpr::Literal(value) => Operand::Constant(value),
        ConditionExpr::ColumnRef { name } => Operand::Column(name),
        _ => Operand::Other,
    }
}

/// Fold `expr` into a [`Verdict`] without looking at any data.
pub fn evaluate(expr: &ConditionExpr) -> Verdict {
    match expr {
        ConditionExpr::Literal(ConstantValue::Boolean(value)) => Verdict::from_bool(*value),
        ConditionExpr::Literal(_) => Verdict::DependsOnData,
        ConditionExpr::Comparison { op, left, right } => evaluate_comparison(*op, left, right),
        ConditionExpr::Logical { op, operands } => evaluate_logical(*op, operands),
        ConditionExpr::Not(operand) => evaluate(operand).negate(),
        ConditionExpr::Paren(inner) => evaluate(inner),
        ConditionExpr::ColumnRef { .. } | ConditionExpr::Opaque { .. } => Verdict::DependsOnData,
    }
}

fn evaluate_comparison(op: ComparisonOp, left: &ConditionExpr, right: &ConditionExpr) -> Verdict {
    match (operand(left), operand(right)) {
        (Operand::Constant(a), Operand::Constant(b)) => compare_constants(op, a, b),
        // `x = x` is the canonical self-reference tautology.
        (Operand::Column(a), Operand::Column(b)) if a == b => match op {
            ComparisonOp::Equals => Verdict::AlwaysTrue,
            ComparisonOp::NotEquals => Verdict::AlwaysFalse,
            _ => Verdict::DependsOnData,
        },
        _ => Verdict::DependsOnData,
    }
}

fn compare_constants(op: ComparisonOp, a: &ConstantValue, b: &ConstantValue) -> Verdict {
    let ordering: &[Ordering] = match op {
        ComparisonOp::Equals | ComparisonOp::NotEquals => {
            let verdict = match compare_equal(a, b) {
                ComparisonResult::Equal => Verdict::AlwaysTrue,
                ComparisonResult::NotEqual => Verdict::AlwaysFalse,
                ComparisonResult::Incomparable => Verdict::DependsOnData,
            };
            return if op == ComparisonOp::NotEquals {
                verdict.negate()
            } else {
                verdict
            };
        }
        ComparisonOp::Lt => &[Ordering::Less],
        ComparisonOp::Gt => &[Ordering::Greater],
        ComparisonOp::LtEq => &[Ordering::Less, Ordering::Equal],
        ComparisonOp::GtEq => &[Ordering::Greater, Ordering::Equal],
    };

    let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
        return Verdict::DependsOnData;
    };
    match x.partial_cmp(&y) {
        Some(actual) => Verdict::from_bool(ordering.contains(&actual)),
        None => Verdict::DependsOnData,
    }
}

fn evaluate_logical(op: LogicalOp, operands: &[ConditionExpr]) -> Verdict {
    // An empty operand list carries no information.
    if operands.is_empty() {
        return Verdict::DependsOnData;
    }

    let (absorbing, identity) = match op {
        LogicalOp::And => (Verdict::AlwaysFalse, Verdict::AlwaysTrue),
        LogicalOp::Or => (Verdict::AlwaysTrue, Verdict::AlwaysFalse),
    };

    let mut all_identity = true;
    for operand in operands {
        let verdict = evaluate(operand);
        if verdict == absorbing {
            return absorbing;
        }
        all_identity &= verdict == identity;
    }

    if all_identity {
        identity
    } else {
        Verdict::DependsOnData
    }
}

/// Whether `expr` holds for every row.
pub fn is_tautology(expr: &ConditionExpr) -> bool {
    evaluate(expr) == Verdict::AlwaysTrue
}

/// Analyze the filter of `stmt` and record one finding in `result` when it is a tautology.
///
/// Statements without a filter leave `result` untouched. At most one detail is
/// recorded per call, covering the whole `WHERE` clause.
pub fn detect_tautology(stmt: &ParsedStatement, result: &mut DetectionResult) {
    let Some(filter) = &stmt.filter else {
        return;
    };
    if !is_tautology(&filter.condition) {
        return;
    }

    let where_text = if filter.text.is_empty() {
        WHERE_TEXT_UNAVAILABLE
    } else {
        filter.text.as_str()
    };
    result.record(InjectionDetail::new(
        TAUTOLOGY_PATTERN,
        filter.position,
        where_text,
    ));
}
