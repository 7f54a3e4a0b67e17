//! Property tests for store invariants.

use proptest::prelude::*;
use tagstore::{ErrorKind, Key, Store, StoreConfig, Value};

#[derive(Debug, Clone)]
enum Op {
    Add(u8, i64),
    Remove(u8),
    Replace(u8, i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, any::<i64>()).prop_map(|(k, v)| Op::Add(k, v)),
        (0u8..8).prop_map(Op::Remove),
        (0u8..8, any::<i64>()).prop_map(|(k, v)| Op::Replace(k, v)),
    ]
}

fn key(k: u8) -> Key {
    Key::from(format!("k{k}"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn names_stay_unique_and_match_a_model(ops in prop::collection::vec(op(), 0..40)) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.ts");
        let config = StoreConfig::new(&path).with_auto_sync(false);
        let mut store = Store::with_config(config).unwrap();
        let mut model = std::collections::HashMap::new();

        for op in ops {
            match op {
                Op::Add(k, v) => {
                    let result = store.add(key(k), v);
                    if model.contains_key(&k) {
                        prop_assert!(matches!(result.unwrap_err().kind, ErrorKind::DuplicateName(_)));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(k, v);
                    }
                }
                Op::Remove(k) => match model.remove(&k) {
                    Some(v) => prop_assert_eq!(store.remove(key(k)).unwrap(), Value::Int(v)),
                    None => prop_assert!(store.remove(key(k)).is_err()),
                },
                Op::Replace(k, v) => {
                    let result = store.replace(key(k), v);
                    match model.insert(k, v) {
                        Some(old) => prop_assert_eq!(result.unwrap(), Value::Int(old)),
                        None => {
                            model.remove(&k);
                            prop_assert!(result.is_err());
                        }
                    }
                }
            }
        }

        let mut keys: Vec<_> = store.keys().cloned().collect();
        let total = keys.len();
        keys.sort_by_key(ToString::to_string);
        keys.dedup();
        prop_assert_eq!(keys.len(), total);
        prop_assert_eq!(total, model.len());

        store.flush().unwrap();
        let reopened = Store::open(&path).unwrap();
        prop_assert_eq!(reopened.mapping(), store.mapping());
    }
}
