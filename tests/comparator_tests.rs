use sqli_tautology::detector::value::{compare_equal, ComparisonResult, ConstantValue};

use ComparisonResult::{Equal, Incomparable, NotEqual};

fn int(i: i64) -> ConstantValue {
    ConstantValue::Integer(i)
}

fn float(f: f64) -> ConstantValue {
    ConstantValue::Float(f)
}

fn string(s: &str) -> ConstantValue {
    ConstantValue::String(s.to_string())
}

fn boolean(b: bool) -> ConstantValue {
    ConstantValue::Boolean(b)
}

const NULL: ConstantValue = ConstantValue::Null;

/// Every `(kind, kind)` pairing, with an equal and an unequal payload where the
/// pairing has a defined coercion.
fn matrix() -> Vec<(ConstantValue, ConstantValue, ComparisonResult)> {
    vec![
        // Integer row
        (int(7), int(7), Equal),
        (int(7), int(8), NotEqual),
        (int(3), float(3.0), Equal),
        (int(3), float(3.1), NotEqual),
        (int(1), string("1"), Incomparable),
        (int(1), boolean(true), Incomparable),
        (int(0), NULL, NotEqual),
        // Float row
        (float(2.5), float(2.5), Equal),
        (float(2.5), float(2.6), NotEqual),
        (float(-0.0), float(0.0), Equal),
        (float(1.0), string("1.0"), Incomparable),
        (float(1.0), boolean(true), Incomparable),
        (float(1.0), NULL, NotEqual),
        // String row
        (string("abc"), string("abc"), Equal),
        (string("abc"), string("abd"), NotEqual),
        (string(""), string(" "), NotEqual),
        (string("true"), boolean(true), Incomparable),
        (string(""), NULL, NotEqual),
        // Boolean row
        (boolean(true), boolean(true), Equal),
        (boolean(true), boolean(false), NotEqual),
        (boolean(false), NULL, NotEqual),
        // Null row
        (NULL, NULL, Incomparable),
    ]
}

#[test]
fn comparator_matrix_matches_sql_rules() {
    for (a, b, expected) in matrix() {
        assert_eq!(compare_equal(&a, &b), expected, "compare_equal({a:?}, {b:?})");
    }
}

#[test]
fn comparator_matrix_is_symmetric() {
    for (a, b, expected) in matrix() {
        assert_eq!(compare_equal(&b, &a), expected, "compare_equal({b:?}, {a:?})");
    }
}

#[test]
fn null_semantics() {
    assert_eq!(compare_equal(&NULL, &NULL), Incomparable);
    assert_eq!(compare_equal(&NULL, &int(5)), NotEqual);
}

#[test]
fn numeric_coercion() {
    assert_eq!(compare_equal(&int(3), &float(3.0)), Equal);
    assert_eq!(compare_equal(&int(3), &float(3.1)), NotEqual);
    assert_eq!(compare_equal(&int(-2), &float(-2.0)), Equal);
}

#[test]
fn cross_type_conservatism() {
    assert_eq!(compare_equal(&string("1"), &int(1)), Incomparable);
    assert_eq!(compare_equal(&boolean(true), &string("t")), Incomparable);
    assert_eq!(compare_equal(&boolean(false), &int(0)), Incomparable);
}
