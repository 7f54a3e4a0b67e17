//! Tests for the backing file: creation, layout, reset, and sync modes.

use std::fs;
use std::path::PathBuf;

use tagstore::codec::Marker;
use tagstore::{ErrorKind, Key, Store, StoreConfig, Value};
use tempfile::TempDir;

fn scratch() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("persist.ts");
    (dir, path)
}

#[test]
fn missing_file_is_created_empty() {
    let (_dir, path) = scratch();
    assert!(!path.exists());
    let store = Store::open(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn uncreatable_file_fails() {
    let (dir, _) = scratch();
    let path = dir.path().join("missing-dir").join("store.ts");
    let err = Store::open(&path).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MissingBackingFile { .. }));
}

#[test]
fn file_layout_is_vocabulary_blank_body() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("n", 5).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    let lines: Vec<_> = text.lines().collect();
    let blank = lines.iter().position(|l| l.is_empty()).unwrap();
    assert_eq!(blank, Marker::ALL.len() + 2);
    assert_eq!(lines[blank + 1..], ["0", "26", "31", "32", "1"]);
}

#[test]
fn reset_empties_file_and_store() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("a", Value::list([1, 2])).unwrap();
    store.reset().unwrap();
    assert!(store.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(Store::open(&path).unwrap().is_empty());
}

#[test]
fn removing_last_name_leaves_empty_file() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("a", 1).unwrap();
    store.remove("a").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn batched_mutations_need_explicit_flush() {
    let (_dir, path) = scratch();
    let config = StoreConfig::new(&path).with_auto_sync(false);
    let mut store = Store::with_config(config).unwrap();
    for i in 0..10 {
        store.add(i, Value::Int(i * i)).unwrap();
    }
    store.remove(3).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");

    store.flush().unwrap();
    let fresh = Store::open(&path).unwrap();
    assert_eq!(fresh.len(), 9);
    assert_eq!(fresh.get(9).unwrap(), &Value::Int(81));
    assert!(!fresh.contains(3));
}

#[test]
fn nan_elements_and_keys_survive_reopen() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    let set = Value::set([f64::NAN, -f64::NAN, 1.0]);
    assert!(matches!(&set, Value::Set(s) if s.len() == 2));
    store.add("s", set).unwrap();
    store
        .add(Key::Float(-f64::NAN), Value::tuple([-f64::NAN, f64::INFINITY, -0.0]))
        .unwrap();
    assert!(store.add(Key::Float(f64::NAN), 0).is_err());

    let reopened = Store::open(&path).unwrap();
    assert_eq!(reopened.mapping(), store.mapping());
    assert!(matches!(reopened.get("s").unwrap(), Value::Set(s) if s.len() == 2));
}

#[test]
fn corrupted_file_fails_to_open() {
    let (_dir, path) = scratch();
    let mut store = Store::open(&path).unwrap();
    store.add("n", 5).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::write(&path, text.replace("\n\n0\n", "\n\n999\n")).unwrap();
    assert!(Store::open(&path).unwrap_err().is_malformed());
}

#[test]
fn compression_report_tracks_last_flush() {
    let (_dir, path) = scratch();
    let config = StoreConfig::new(&path).with_report_compression(true);
    let mut store = Store::with_config(config).unwrap();
    assert!(store.last_compression().is_none());
    for i in 0..200 {
        store
            .add(format!("name-{i}"), Value::list(["repeated", "repeated"]))
            .unwrap();
    }
    let stats = store.last_compression().unwrap();
    assert_eq!(stats.compressed_bytes, fs::read_to_string(&path).unwrap().len());
    assert!(stats.delta_percent() > 0.0);
}
