use serde::{Deserialize, Serialize};
use std::fmt;

/// A SQL literal as produced by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    /// Integer literal that fits in an `i64`.
    Integer(i64),
    /// Decimal or exponent literal, or an integer too large for `i64`.
    Float(f64),
    /// Quoted string literal, unescaped.
    String(String),
    /// `TRUE` / `FALSE`.
    Boolean(bool),
    /// `NULL`.
    Null,
}

impl ConstantValue {
    /// Returns the value as `f64` when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConstantValue::Integer(i) => Some(*i as f64),
            ConstantValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Integer(i) => write!(f, "{i}"),
            ConstantValue::Float(v) => write!(f, "{v}"),
            ConstantValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            ConstantValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            ConstantValue::Null => write!(f, "NULL"),
        }
    }
}

/// Outcome of comparing two constants for equality.
///
/// `Incomparable` is never folded into `NotEqual`: callers must decide what an
/// undetermined comparison means for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonResult {
    /// Both values are equal under SQL comparison rules.
    Equal,
    /// Both values are known and differ.
    NotEqual,
    /// No defined coercion between the two values, or `NULL = NULL`.
    Incomparable,
}

/// Decide whether two constants are equal.
///
/// Rules, first match wins:
/// 1. `NULL` against `NULL` is `Incomparable`; `NULL` against anything else is `NotEqual`.
/// 2. Same kind compares by exact value.
/// 3. `Integer` against `Float` promotes the integer and compares exactly.
/// 4. Every other pairing is `Incomparable`.
pub fn compare_equal(a: &ConstantValue, b: &ConstantValue) -> ComparisonResult {
    use ConstantValue::{Boolean, Float, Integer, Null, String};

    let equal = match (a, b) {
        (Null, Null) => return ComparisonResult::Incomparable,
        (Null, _) | (_, Null) => return ComparisonResult::NotEqual,
        (Integer(x), Integer(y)) => x == y,
        (Float(x), Float(y)) => x == y,
        (String(x), String(y)) => x.as_bytes() == y.as_bytes(),
        (Boolean(x), Boolean(y)) => x == y,
        (Integer(i), Float(f)) | (Float(f), Integer(i)) => (*i as f64) == *f,
        _ => return ComparisonResult::Incomparable,
    };

    if equal {
        ComparisonResult::Equal
    } else {
        ComparisonResult::NotEqual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<ConstantValue> {
        vec![
            ConstantValue::Integer(3),
            ConstantValue::Integer(-7),
            ConstantValue::Float(3.0),
            ConstantValue::Float(3.1),
            ConstantValue::String("1".to_string()),
            ConstantValue::String("abc".to_string()),
            ConstantValue::Boolean(true),
            ConstantValue::Boolean(false),
            ConstantValue::Null,
        ]
    }

    #[test]
    fn compare_equal_is_symmetric_over_all_samples() {
        let values = samples();
        for a in &values {
            for b in &values {
                assert_eq!(
                    compare_equal(a, b),
                    compare_equal(b, a),
                    "asymmetric comparison for {a:?} / {b:?}"
                );
            }
        }
    }

    #[test]
    fn null_never_compares_equal() {
        assert_eq!(
            compare_equal(&ConstantValue::Null, &ConstantValue::Null),
            ComparisonResult::Incomparable
        );
        for other in samples().iter().filter(|v| **v != ConstantValue::Null) {
            assert_eq!(
                compare_equal(&ConstantValue::Null, other),
                ComparisonResult::NotEqual
            );
        }
    }

    #[test]
    fn integer_promotes_to_float_without_tolerance() {
        assert_eq!(
            compare_equal(&ConstantValue::Integer(3), &ConstantValue::Float(3.0)),
            ComparisonResult::Equal
        );
        assert_eq!(
            compare_equal(&ConstantValue::Integer(3), &ConstantValue::Float(3.1)),
            ComparisonResult::NotEqual
        );
        assert_eq!(
            compare_equal(
                &ConstantValue::Integer(1),
                &ConstantValue::Float(1.0 + f64::EPSILON)
            ),
            ComparisonResult::NotEqual
        );
    }

    #[test]
    fn strings_compare_byte_for_byte() {
        let lower = ConstantValue::String("admin".to_string());
        let upper = ConstantValue::String("ADMIN".to_string());
        assert_eq!(compare_equal(&lower, &lower.clone()), ComparisonResult::Equal);
        assert_eq!(compare_equal(&lower, &upper), ComparisonResult::NotEqual);
    }

    #[test]
    fn display_renders_sql_literals() {
        assert_eq!(ConstantValue::String("o'k".to_string()).to_string(), "'o''k'");
        assert_eq!(ConstantValue::Boolean(true).to_string(), "TRUE");
        assert_eq!(ConstantValue::Null.to_string(), "NULL");
        assert_eq!(ConstantValue::Integer(-4).to_string(), "-4");
    }
}
