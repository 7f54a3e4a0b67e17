//! Integration tests for the collection wrappers
//!
//! Tests ordering, uniqueness, and persistence of `TsVec`, `TsSet`, `TsMap`.

use tagstore_foundation::{Key, Mapping, TsMap, TsSet, TsVec, Value};

// =============================================================================
// TsVec
// =============================================================================

#[test]
fn vec_push_back_is_persistent() {
    let v1: TsVec<i32> = (0..3).collect();
    let v2 = v1.push_back(3);
    assert_eq!(v1.len(), 3);
    assert_eq!(v2.len(), 4);
    assert_eq!(v2.last(), Some(&3));
    assert_eq!(v1.first(), Some(&0));
}

#[test]
fn vec_iterates_in_order() {
    let v: TsVec<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(v.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
}

// =============================================================================
// TsSet
// =============================================================================

#[test]
fn set_rejects_duplicates() {
    let mut s = TsSet::new();
    assert!(s.insert("a"));
    assert!(!s.insert("a"));
    assert_eq!(s.len(), 1);
}

#[test]
fn set_keeps_first_insertion_order() {
    let s: TsSet<i32> = [5, 1, 5, 3].into_iter().collect();
    assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![5, 1, 3]);
}

#[test]
fn set_remove() {
    let mut s: TsSet<i32> = (0..4).collect();
    assert!(s.remove(&1));
    assert!(!s.remove(&1));
    assert_eq!(s.iter().copied().collect::<Vec<_>>(), vec![0, 2, 3]);
}

// =============================================================================
// TsMap
// =============================================================================

#[test]
fn map_preserves_insertion_order() {
    let mut m = TsMap::new();
    m.insert("z", 1);
    m.insert("a", 2);
    m.insert("m", 3);
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["z", "a", "m"]);
}

#[test]
fn map_insert_returns_previous() {
    let mut m = TsMap::new();
    assert_eq!(m.insert(1, "a"), None);
    assert_eq!(m.insert(1, "b"), Some("a"));
    assert_eq!(m.len(), 1);
}

#[test]
fn map_remove_keeps_remaining_order() {
    let mut m: Mapping = [("a", 1), ("b", 2), ("c", 3)]
        .into_iter()
        .map(|(k, v)| (Key::from(k), Value::Int(v)))
        .collect();
    assert_eq!(m.remove(&Key::from("b")), Some(Value::Int(2)));
    let keys: Vec<_> = m.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from("a"), Key::from("c")]);
}

#[test]
fn map_clear() {
    let mut m: TsMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
    m.clear();
    assert!(m.is_empty());
}
