//! End-to-end scenarios: add, flush, reopen, read.

use std::path::PathBuf;

use tagstore::{Key, Store, Value};
use tempfile::TempDir;

fn scratch() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.ts");
    (dir, path)
}

#[test]
fn integer_survives_reopen() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("n", 5).unwrap();
    store.flush().unwrap();

    let fresh = Store::open(&path).unwrap();
    assert_eq!(fresh.get("n").unwrap(), &Value::Int(5));
}

#[test]
fn tuple_of_floats_survives_reopen() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("pt", Value::tuple([1.5, 2.5])).unwrap();
    store.flush().unwrap();

    let fresh = Store::open(&path).unwrap();
    let pt = fresh.get("pt").unwrap();
    assert_eq!(pt, &Value::tuple([1.5, 2.5]));
    assert!(pt.as_tuple().is_some());
}

#[test]
fn nested_mapping_survives_reopen() {
    let (_dir, path) = scratch();
    let m = Value::map([("a", Value::Int(1)), ("b", Value::list([2, 3]))]);
    let mut store = Store::open(&path).unwrap();
    store.add("m", m.clone()).unwrap();
    store.flush().unwrap();

    let fresh = Store::open(&path).unwrap();
    let loaded = fresh.get("m").unwrap();
    assert_eq!(loaded, &m);
    let inner = loaded.as_map().unwrap();
    assert_eq!(inner.get(&Key::from("b")), Some(&Value::list([2, 3])));
}

#[test]
fn all_three_in_one_store() {
    let (_dir, path) = scratch();
    {
        let mut store = Store::open(&path).unwrap();
        store.add("n", 5).unwrap();
        store.add("pt", Value::tuple([1.5, 2.5])).unwrap();
        store
            .add(
                "m",
                Value::map([("a", Value::Int(1)), ("b", Value::list([2, 3]))]),
            )
            .unwrap();
    }
    let fresh = Store::open(&path).unwrap();
    let keys: Vec<_> = fresh.keys().cloned().collect();
    assert_eq!(keys, vec![Key::from("n"), Key::from("pt"), Key::from("m")]);
    assert_eq!(fresh.to_string(), "{n: 5, pt: (1.5, 2.5), m: {a: 1, b: [2, 3]}}");
}
