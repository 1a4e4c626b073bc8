//! Property tests for the traversal invariants

use nspath_core::{from_json, from_mapping, traverse, Flattener, GenericValue, Terminal};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Scalar JSON leaves
fn arb_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z0-9 ]{0,8}".prop_map(serde_json::Value::from),
    ]
}

/// Nested JSON documents; keys avoid the separator so paths stay unique
fn arb_json() -> impl Strategy<Value = serde_json::Value> {
    arb_leaf().prop_recursive(5, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[A-Za-z_][A-Za-z0-9_]{0,6}", inner, 0..6)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = serde_json::Map<String, serde_json::Value>> {
    prop::collection::btree_map("[A-Za-z_][A-Za-z0-9_]{0,6}", arb_json(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

fn depth(value: &GenericValue) -> usize {
    match value {
        GenericValue::Mapping(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        GenericValue::Sequence(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        GenericValue::Record(record) => {
            1 + record.fields.iter().map(|f| depth(&f.value)).max().unwrap_or(0)
        }
        GenericValue::Terminal(_) => 0,
    }
}

proptest! {
    #[test]
    fn prop_one_path_per_leaf(doc in arb_json()) {
        let value = GenericValue::from(doc);
        let mut ns: Vec<String> = Vec::new();
        traverse(&value, "root", &mut ns);

        prop_assert_eq!(ns.len(), value.leaf_count());
        let unique: BTreeSet<&String> = ns.iter().collect();
        prop_assert_eq!(unique.len(), ns.len());
        prop_assert!(ns.iter().all(|p| p == "root" || p.starts_with("root/")));
    }

    #[test]
    fn prop_idempotent(doc in arb_json()) {
        let data = serde_json::to_vec(&doc).unwrap();

        let mut first: Vec<String> = Vec::new();
        from_json(&data, "root", &mut first).unwrap();
        let mut second: Vec<String> = Vec::new();
        from_json(&data, "root", &mut second).unwrap();

        let first: BTreeSet<String> = first.into_iter().collect();
        let second: BTreeSet<String> = second.into_iter().collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_bytes_and_mapping_agree(object in arb_object()) {
        let data = serde_json::to_vec(&object).unwrap();

        let mut from_bytes: BTreeSet<String> = BTreeSet::new();
        from_json(&data, "ns", &mut from_bytes).unwrap();
        let mut from_map: BTreeSet<String> = BTreeSet::new();
        from_mapping(&object, "ns", &mut from_map);

        prop_assert_eq!(from_bytes, from_map);
    }

    #[test]
    fn prop_depth_limit_matches_nesting(doc in arb_json()) {
        let value = GenericValue::from(doc);
        let needed = depth(&value);

        let mut ns: Vec<String> = Vec::new();
        prop_assert!(Flattener::new().max_depth(needed).flatten(&value, "r", &mut ns).is_ok());
        prop_assert_eq!(ns.len(), value.leaf_count());

        if needed > 0 {
            let mut rejected: Vec<String> = Vec::new();
            prop_assert!(Flattener::new()
                .max_depth(needed - 1)
                .flatten(&value, "r", &mut rejected)
                .is_err());
            prop_assert!(rejected.is_empty());
        }
    }

    #[test]
    fn prop_sequence_indices_are_decimal(len in 0usize..40) {
        let value = GenericValue::Sequence(vec![GenericValue::Terminal(Terminal::Null); len]);
        let mut ns: Vec<String> = Vec::new();
        traverse(&value, "s", &mut ns);

        let expected: Vec<String> = (0..len).map(|i| format!("s/{}", i)).collect();
        prop_assert_eq!(ns, expected);
    }
}
