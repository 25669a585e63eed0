use std::collections::BTreeSet;

use crate::value::{Number, Value};

#[test]
fn test_number_parse_accepts_canonical_forms() {
    for input in ["0", "5", "-3.25", "0.1", "12345678901234567890", "-7"] {
        let n = Number::parse(input).unwrap();
        assert_eq!(n.as_str(), input);
    }
}

#[test]
fn test_number_parse_rejects_non_canonical_forms() {
    for input in [
        "00", "042", "+1", "1e5", "1E5", ".5", "1.", "1.50", "-0", "-0.0", " 7", "7 ", "", "-",
        "1.2.3", "abc",
    ] {
        assert!(
            Number::parse(input).is_err(),
            "expected '{input}' to be rejected"
        );
    }
}

#[test]
fn test_number_from_f64_plain_forms() {
    assert_eq!(Number::from_f64(0.5).unwrap().as_str(), "0.5");
    assert_eq!(Number::from_f64(30.0).unwrap().as_str(), "30");
    assert_eq!(Number::from_f64(-2.75).unwrap().as_str(), "-2.75");
    assert_eq!(Number::from_f64(0.0).unwrap().as_str(), "0");
    assert_eq!(Number::from_f64(-0.0).unwrap().as_str(), "0");
}

#[test]
fn test_number_from_f64_expands_exponents() {
    let large = Number::from_f64(1e300).unwrap();
    assert_eq!(large.as_str().len(), 301);
    assert!(large.as_str().starts_with('1'));
    assert!(large.as_str().chars().skip(1).all(|c| c == '0'));

    assert_eq!(Number::from_f64(1.5e-3).unwrap().as_str(), "0.0015");
    assert_eq!(Number::from_f64(-2.5e-7).unwrap().as_str(), "-0.00000025");
    assert_eq!(Number::from_f64(1.2345e4).unwrap().as_str(), "12345");
}

#[test]
fn test_number_from_f64_rejects_non_finite() {
    assert!(Number::from_f64(f64::NAN).is_err());
    assert!(Number::from_f64(f64::INFINITY).is_err());
    assert!(Number::from_f64(f64::NEG_INFINITY).is_err());
}

#[test]
fn test_number_round_trips_floats() {
    for f in [0.1, -0.1, 3.141592653589793, 1e300, 5e-324, 42.0] {
        let n = Number::from_f64(f).unwrap();
        assert_eq!(n.to_f64(), f, "float {f} did not survive the round trip");
    }
}

#[test]
fn test_number_ordering_is_numeric() {
    let mut values: Vec<Number> = ["10", "-3", "2", "0.5", "-10.25", "0"]
        .iter()
        .map(|s| Number::parse(s).unwrap())
        .collect();
    values.sort();
    let sorted: Vec<&str> = values.iter().map(|n| n.as_str()).collect();
    assert_eq!(sorted, vec!["-10.25", "-3", "0", "0.5", "2", "10"]);
}

#[test]
fn test_number_as_i64() {
    assert_eq!(Number::parse("42").unwrap().as_i64(), Some(42));
    assert_eq!(Number::parse("-7").unwrap().as_i64(), Some(-7));
    assert_eq!(Number::parse("0.5").unwrap().as_i64(), None);
    assert_eq!(
        Number::parse("12345678901234567890").unwrap().as_i64(),
        None
    );
}

#[test]
fn test_value_numeric_equality_across_variants() {
    assert_eq!(Value::Int(5), Value::Float(5.0));
    assert_eq!(Value::Int(5), Value::Decimal(Number::from_i64(5)));
    assert_eq!(
        Value::Float(0.5),
        Value::Decimal(Number::parse("0.5").unwrap())
    );
    assert_ne!(Value::Int(5), Value::Int(6));
    assert_ne!(Value::Int(5), Value::Text("5".to_string()));
    // NaN is never equal, even to itself.
    assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn test_value_primitive_comparisons() {
    assert_eq!(Value::Text("hello".to_string()), "hello");
    assert_eq!(Value::Int(42), 42);
    assert_eq!(Value::Bool(true), true);
    assert_eq!(Value::Float(42.0), 42);
    assert_ne!(Value::Text("42".to_string()), 42);
}

#[test]
fn test_value_blankness() {
    assert!(Value::Null.is_blank());
    assert!(Value::Text(String::new()).is_blank());
    assert!(Value::List(vec![]).is_blank());
    assert!(Value::StringSet(BTreeSet::new()).is_blank());
    assert!(!Value::Bool(false).is_blank());
    assert!(!Value::Int(0).is_blank());
    assert!(!Value::Text("x".to_string()).is_blank());
}

#[test]
fn test_value_from_option() {
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
    assert_eq!(Value::from(None::<i64>), Value::Null);
}
