//! Differ Tests
//!
//! This test suite verifies the changes produced by `diff` for every shape.
//!
//! ## Scenarios Covered
//!
//! 1. Struct fields and positional sequence changes
//! 2. Map additions and removals in key order
//! 3. Pointer presence transitions
//! 4. Type mismatches and unsupported leaves fail fast
//! 5. Trace hook and change-set serialization

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{counts, doc, doc_type, sample_doc, strings};
use objdiff_core::{
    diff, diff_with_options, Change, ChangeSet, DiffOptions, ObjDiffError, Path, TraceEvent,
    Value, ValueType,
};
use objdiff_core_types::{OpaqueKind, ScalarKind, Shape};
use std::sync::{Arc, Mutex};

fn name_and_tags(name: &str, tags: &[&str]) -> Value {
    Value::record("Doc", [("name", Value::from(name)), ("tags", strings(tags))])
}

#[test]
fn test_struct_field_and_appended_element() {
    // GIVEN two records differing in name and one appended tag
    let a = name_and_tags("x", &["a", "b"]);
    let b = name_and_tags("y", &["a", "b", "c"]);

    // WHEN diffing
    let cs = diff(&a, &b).expect("diff should succeed");

    // THEN the changes are the renamed field then the appended tag
    assert_eq!(cs.base_type(), &a.value_type());
    assert_eq!(
        cs.changes(),
        &[
            Change::Value {
                path: Path::root().field(0, "name"),
                value: Value::from("y"),
            },
            Change::Value {
                path: Path::root().field(1, "tags").index(2),
                value: Value::from("c"),
            },
        ]
    );
}

#[test]
fn test_map_key_removed_and_added() {
    // GIVEN {"k1": 1} and {"k2": 2}
    let a = counts(&[("k1", 1)]);
    let b = counts(&[("k2", 2)]);

    // WHEN diffing
    let cs = diff(&a, &b).unwrap();

    // THEN the removal precedes the addition
    assert_eq!(
        cs.changes(),
        &[
            Change::Deleted {
                path: Path::root().key("k1"),
            },
            Change::Value {
                path: Path::root().key("k2"),
                value: Value::from(2i64),
            },
        ]
    );
}

#[test]
fn test_shared_map_keys_are_compared_in_place() {
    let a = counts(&[("a", 1), ("b", 2), ("c", 3)]);
    let b = counts(&[("a", 1), ("b", 20), ("c", 3)]);

    let cs = diff(&a, &b).unwrap();

    assert_eq!(cs.len(), 1);
    assert_eq!(cs.changes()[0].path(), &Path::root().key("b"));
}

#[test]
fn test_map_changes_follow_key_order() {
    // GIVEN maps whose insertion order differs from key order
    let a = counts(&[("m", 1), ("b", 1), ("z", 1)]);
    let b = counts(&[("z", 2), ("b", 2), ("m", 2)]);

    // WHEN diffing repeatedly
    let first = diff(&a, &b).unwrap();
    let second = diff(&a, &b).unwrap();

    // THEN ordering is reproducible and sorted by key
    assert!(first.equals(&second));
    let keys: Vec<String> = first.iter().map(|c| c.path().to_string()).collect();
    assert_eq!(keys, vec!["[\"b\"]", "[\"m\"]", "[\"z\"]"]);
}

#[test]
fn test_identical_values_produce_empty_change_set() {
    let a = sample_doc();

    let cs = diff(&a, &a.clone()).unwrap();

    assert!(cs.is_empty());
    assert_eq!(cs.base_type(), &doc_type());
}

#[test]
fn test_nested_doc_changes_in_visitation_order() {
    // GIVEN docs differing in every field
    let a = sample_doc();
    let b = doc("y", &["a"], &[("k2", 5)], [1, 9, 3], Some(("dev", 0.5)));

    // WHEN diffing
    let cs = diff(&a, &b).unwrap();

    // THEN changes follow field order, then per-shape order
    let rendered: Vec<String> = cs.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "set .name = \"y\"",
            "delete .tags[1]",
            "delete .counts[\"k1\"]",
            "set .counts[\"k2\"] = 5",
            "set .grid[1] = 9",
            "set .meta*.owner = \"dev\"",
        ]
    );
}

#[test]
fn test_pointer_becoming_present_captures_whole_pointee() {
    let a = doc("x", &[], &[], [0, 0, 0], None);
    let b = doc("x", &[], &[], [0, 0, 0], Some(("ops", 1.5)));

    let cs = diff(&a, &b).unwrap();

    assert_eq!(cs.len(), 1);
    assert_eq!(cs.changes()[0].path(), &Path::root().field(4, "meta").indirection());
    assert_eq!(
        cs.changes()[0].value(),
        Some(&Value::record(
            "Meta",
            [("owner", Value::from("ops")), ("score", Value::from(1.5f64))]
        ))
    );
}

#[test]
fn test_pointer_becoming_absent_is_a_delete() {
    let a = sample_doc();
    let b = doc("x", &["a", "b"], &[("k1", 1), ("k2", 2)], [1, 2, 3], None);

    let cs = diff(&a, &b).unwrap();

    assert_eq!(
        cs.changes(),
        &[Change::Deleted {
            path: Path::root().field(4, "meta").indirection(),
        }]
    );
}

#[test]
fn test_nan_leaf_is_always_reported() {
    let a = Value::from(f64::NAN);

    let cs = diff(&a, &a.clone()).unwrap();

    assert_eq!(cs.len(), 1);
    assert!(cs.changes()[0].path().is_empty());
}

#[test]
fn test_integer_widths_are_preserved_in_captures() {
    let a = Value::from(7u16);
    let b = Value::from(9u16);

    let cs = diff(&a, &b).unwrap();

    assert_eq!(cs.base_type(), &ValueType::scalar(ScalarKind::U16));
    assert_eq!(cs.changes()[0].value(), Some(&Value::from(9u16)));
}

#[test]
fn test_mismatched_root_types_fail() {
    // GIVEN an i32 and an i64
    let a = Value::from(1i32);
    let b = Value::from(1i64);

    // WHEN diffing
    let err = diff(&a, &b).unwrap_err();

    // THEN the error names both types
    assert_eq!(
        err,
        ObjDiffError::TypeMismatch {
            expected: ValueType::scalar(ScalarKind::I32),
            found: ValueType::scalar(ScalarKind::I64),
        }
    );
}

#[test]
fn test_opaque_field_fails_without_change_set() {
    let a = Value::record(
        "Job",
        [
            ("id", Value::from(1u32)),
            ("run", Value::opaque(OpaqueKind::Function, "func()")),
        ],
    );
    let b = Value::record(
        "Job",
        [
            ("id", Value::from(2u32)),
            ("run", Value::opaque(OpaqueKind::Function, "func()")),
        ],
    );

    let result = diff(&a, &b);

    assert_eq!(
        result,
        Err(ObjDiffError::UnsupportedKind {
            kind: OpaqueKind::Function
        })
    );
}

#[test]
fn test_captured_values_are_isolated_from_later_mutation() {
    // GIVEN a diff capturing a nested pointee
    let a = doc("x", &[], &[], [0, 0, 0], None);
    let mut b = doc("x", &[], &[], [0, 0, 0], Some(("ops", 1.0)));
    let cs = diff(&a, &b).unwrap();
    let before = cs.clone();

    // WHEN the source of the captured value is mutated
    if let Value::Ptr(p) = b.field_mut("meta").unwrap() {
        p.target = None;
    }

    // THEN the change set is unaffected
    assert!(cs.equals(&before));
    assert!(cs.changes()[0].value().is_some());
}

#[test]
fn test_trace_hook_observes_every_node() {
    // GIVEN a trace hook counting node visits and changes
    let shapes = Arc::new(Mutex::new(Vec::new()));
    let changes = Arc::new(Mutex::new(0usize));
    let (shape_sink, change_sink) = (shapes.clone(), changes.clone());
    let options = DiffOptions::new().with_trace(move |event| match event {
        TraceEvent::Enter { shape, .. } => shape_sink.lock().unwrap().push(*shape),
        TraceEvent::Change(_) => *change_sink.lock().unwrap() += 1,
    });

    // WHEN diffing two small records
    let a = name_and_tags("x", &["a"]);
    let b = name_and_tags("y", &["a"]);
    let cs = diff_with_options(&a, &b, &options).unwrap();

    // THEN every node was entered once and each change was reported
    assert_eq!(
        *shapes.lock().unwrap(),
        vec![
            Shape::Struct,
            Shape::Scalar(ScalarKind::Str),
            Shape::Seq,
            Shape::Scalar(ScalarKind::Str),
        ]
    );
    assert_eq!(*changes.lock().unwrap(), cs.len());
}

#[test]
fn test_describe_lists_base_type_and_changes() {
    let cs = diff(&counts(&[("k1", 1)]), &counts(&[("k2", 2)])).unwrap();

    let text = cs.describe();

    assert!(text.starts_with("BaseType: map[string]i64\n"));
    assert!(text.contains("1. delete [\"k1\"]"));
    assert!(text.contains("2. set [\"k2\"] = 2"));
    assert_eq!(cs.to_string(), text);
}

#[test]
fn test_change_set_survives_json_round_trip() {
    let a = sample_doc();
    let b = doc("y", &["a", "b", "c"], &[("k9", 9)], [3, 2, 1], None);
    let cs = diff(&a, &b).unwrap();

    let json = serde_json::to_string(&cs).unwrap();
    let back: ChangeSet = serde_json::from_str(&json).unwrap();

    assert!(back.equals(&cs));
}
