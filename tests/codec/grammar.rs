//! Integration tests for the encoded line grammar
//!
//! Tests the exact line layout produced for each kind of entry.

use tagstore_codec::{Marker, encode};
use tagstore_foundation::{Key, Mapping, Value};

fn single(key: &str, value: Value) -> Vec<String> {
    let mut mapping = Mapping::new();
    mapping.insert(Key::from(key), value);
    encode(&mapping).unwrap()
}

#[test]
fn every_line_is_one_token_or_payload() {
    let lines = single(
        "m",
        Value::map([("a", Value::Int(1)), ("b", Value::list([2, 3]))]),
    );
    assert_eq!(
        lines,
        vec![
            "<dict>", "@str", "m", "<int>", "@str", "a", "1", "</int>", "<list>", "@str", "b",
            "<int>", "2", "</int>", "<int>", "3", "</int>", "</list>", "</dict>",
        ]
    );
}

#[test]
fn opens_and_closes_balance() {
    let value = Value::list([
        Value::tuple([Value::set([1]), Value::map([("k", Value::list([true]))])]),
        Value::from("x"),
    ]);
    let lines = single("deep", value);

    let mut depth = 0i32;
    for line in &lines {
        match Marker::parse(line) {
            Some(Marker::Tag(_)) | None => {}
            Some(marker) if marker.is_close() => depth -= 1,
            Some(_) => depth += 1,
        }
        assert!(depth >= 0);
    }
    assert_eq!(depth, 0);
}

#[test]
fn every_key_follows_a_tag() {
    let mut mapping = Mapping::new();
    mapping.insert(Key::Int(1), Value::Int(1));
    mapping.insert(Key::Bool(false), Value::map([(2.5, "f")]));
    let lines = encode(&mapping).unwrap();
    let tags: Vec<_> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| matches!(Marker::parse(l), Some(Marker::Tag(_))))
        .map(|(i, l)| (l.as_str(), lines[i + 1].as_str()))
        .collect();
    assert_eq!(tags, vec![("@int", "1"), ("@bool", "false"), ("@float", "2.5")]);
}
