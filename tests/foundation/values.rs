//! Integration tests for Value and Key types
//!
//! Tests construction, equality, hashing, display, and conversions.

use std::collections::HashSet;
use std::sync::Arc;

use tagstore_foundation::{Complex, ErrorKind, Key, Type, Value};

// =============================================================================
// Value Construction
// =============================================================================

#[test]
fn scalar_accessors() {
    assert_eq!(Value::Int(42).as_int(), Some(42));
    assert_eq!(Value::Int(42).as_float(), None);
    assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::from("hi").as_str(), Some("hi"));
    assert_eq!(
        Value::Complex(Complex::new(1.0, 2.0)).as_complex(),
        Some(Complex::new(1.0, 2.0))
    );
}

#[test]
fn composite_accessors() {
    let list = Value::list([1, 2, 3]);
    assert_eq!(list.as_list().map(|v| v.len()), Some(3));
    assert!(list.as_tuple().is_none());

    let tuple = Value::tuple([1.5, 2.5]);
    assert_eq!(tuple.as_tuple().and_then(|t| t.get(1)), Some(&Value::Float(2.5)));

    let set = Value::set(["a", "b", "a"]);
    assert_eq!(set.as_set().map(|s| s.len()), Some(2));

    let map = Value::map([("a", 1)]);
    assert_eq!(
        map.as_map().and_then(|m| m.get(&Key::from("a"))),
        Some(&Value::Int(1))
    );
}

#[test]
fn value_types() {
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Value::from("x").value_type(), Type::Text);
    assert_eq!(Value::list([1]).value_type(), Type::List);
    assert_eq!(Value::tuple([1]).value_type(), Type::Tuple);
    assert_eq!(Value::set([1]).value_type(), Type::Set);
    assert_eq!(Value::map([("a", 1)]).value_type(), Type::Map);
    assert!(Value::Int(1).is_scalar());
    assert!(!Value::list([1]).is_scalar());
}

#[test]
fn list_and_tuple_are_distinct() {
    assert_ne!(Value::list([1, 2]), Value::tuple([1, 2]));
}

#[test]
fn set_equality_ignores_order() {
    assert_eq!(Value::set([1, 2, 3]), Value::set([3, 1, 2]));
}

#[test]
fn map_equality_ignores_order() {
    assert_eq!(
        Value::map([("a", 1), ("b", 2)]),
        Value::map([("b", 2), ("a", 1)])
    );
}

#[test]
fn equal_values_hash_equal() {
    let mut seen = HashSet::new();
    seen.insert(Value::set([1, 2]));
    assert!(seen.contains(&Value::set([2, 1])));
    seen.insert(Value::Float(f64::NAN));
    assert!(seen.contains(&Value::Float(f64::NAN)));
}

#[test]
fn display_forms() {
    assert_eq!(Value::from("x").to_string(), "x");
    assert_eq!(Value::tuple([1.5, 2.5]).to_string(), "(1.5, 2.5)");
    assert_eq!(
        Value::map([("a", Value::Int(1)), ("b", Value::list([2, 3]))]).to_string(),
        "{a: 1, b: [2, 3]}"
    );
}

// =============================================================================
// Keys
// =============================================================================

#[test]
fn keys_of_different_types_are_distinct() {
    assert_ne!(Key::from("1"), Key::Int(1));
    assert_ne!(Key::Int(1), Key::Float(1.0));
    assert_ne!(Key::Bool(true), Key::from("true"));
}

#[test]
fn key_types() {
    assert_eq!(Key::from("a").key_type(), Type::Text);
    assert_eq!(Key::Int(1).key_type(), Type::Int);
    assert_eq!(Key::Complex(Complex::new(0.0, 1.0)).key_type(), Type::Complex);
    assert_eq!(Key::Text(Arc::from("a")).as_str(), Some("a"));
}

#[test]
fn scalar_value_converts_to_key() {
    assert_eq!(Key::try_from(Value::Int(3)).unwrap(), Key::Int(3));
    assert_eq!(Key::try_from(Value::from("s")).unwrap(), Key::from("s"));
}

#[test]
fn composite_value_is_not_a_key() {
    let err = Key::try_from(Value::list([1])).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnsupportedValueType {
            actual: Type::List,
            ..
        }
    ));
}
