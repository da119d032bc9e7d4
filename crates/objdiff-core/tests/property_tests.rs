//! Property Tests
//!
//! This test suite verifies the identity, round-trip, idempotence and copy
//! properties over randomly generated types and values.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use objdiff_core::{deep_copy, diff, FieldType, MapKey, Value, ValueType};
use objdiff_core_types::ScalarKind;
use proptest::prelude::*;

prop_compose! {
    fn arb_doc()(
        name in "[a-z]{0,6}",
        tags in prop::collection::vec("[a-z]{1,3}", 0..6),
        entries in prop::collection::btree_map("[a-z]{1,2}", any::<i64>(), 0..5),
        grid in prop::array::uniform3(any::<u8>()),
        meta in prop::option::of(("[a-z]{0,4}", -1.0e6f64..1.0e6)),
    ) -> Value {
        let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
        let entries: Vec<(&str, i64)> = entries.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        let meta = meta.as_ref().map(|(owner, score)| (owner.as_str(), *score));
        common::doc(&name, &tags, &entries, grid, meta)
    }
}

fn arb_key_kind() -> impl Strategy<Value = ScalarKind> {
    prop_oneof![
        Just(ScalarKind::Bool),
        Just(ScalarKind::I32),
        Just(ScalarKind::U8),
        Just(ScalarKind::Str),
    ]
}

/// Runtime types nested up to three levels deep through every container shape
fn arb_type() -> impl Strategy<Value = ValueType> {
    let leaf = prop_oneof![
        Just(ScalarKind::Bool),
        Just(ScalarKind::I64),
        Just(ScalarKind::U8),
        Just(ScalarKind::F64),
        Just(ScalarKind::Str),
    ]
    .prop_map(ValueType::scalar);

    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(ValueType::seq_of),
            inner.clone().prop_map(ValueType::ptr_to),
            (arb_key_kind(), inner.clone()).prop_map(|(k, v)| ValueType::map_of(k, v)),
            (inner.clone(), 0usize..3).prop_map(|(e, n)| ValueType::array_of(e, n)),
            prop::collection::vec(inner, 1..4).prop_map(|tys| {
                let fields = tys
                    .into_iter()
                    .enumerate()
                    .map(|(i, ty)| FieldType::new(format!("f{i}"), ty))
                    .collect();
                ValueType::struct_of("Node", fields)
            }),
        ]
    })
}

fn arb_key(kind: ScalarKind) -> BoxedStrategy<MapKey> {
    match kind {
        ScalarKind::Bool => any::<bool>().prop_map(MapKey::from).boxed(),
        ScalarKind::I32 => (-3i32..3).prop_map(MapKey::from).boxed(),
        ScalarKind::U8 => (0u8..6).prop_map(MapKey::from).boxed(),
        _ => "[a-c]{1,2}".prop_map(MapKey::from).boxed(),
    }
}

fn arb_scalar(kind: ScalarKind) -> BoxedStrategy<Value> {
    match kind {
        ScalarKind::Bool => any::<bool>().prop_map(Value::from).boxed(),
        ScalarKind::I64 => (-5i64..5).prop_map(Value::from).boxed(),
        ScalarKind::U8 => any::<u8>().prop_map(Value::from).boxed(),
        ScalarKind::F64 => (-1.0e3f64..1.0e3).prop_map(Value::from).boxed(),
        _ => "[a-z]{0,3}".prop_map(Value::from).boxed(),
    }
}

/// Values whose runtime type is exactly `ty`
fn arb_value(ty: &ValueType) -> BoxedStrategy<Value> {
    match ty {
        ValueType::Scalar(kind) => arb_scalar(*kind),
        ValueType::Seq { elem } => {
            let elem_type = (**elem).clone();
            prop::collection::vec(arb_value(elem), 0..4)
                .prop_map(move |items| Value::seq(elem_type.clone(), items))
                .boxed()
        }
        ValueType::Array { elem, len } => {
            let elem_type = (**elem).clone();
            prop::collection::vec(arb_value(elem), *len)
                .prop_map(move |items| Value::array(elem_type.clone(), items))
                .boxed()
        }
        ValueType::Ptr { elem } => {
            let elem_type = (**elem).clone();
            prop::option::of(arb_value(elem))
                .prop_map(move |target| match target {
                    Some(v) => Value::ptr(v),
                    None => Value::null_ptr(elem_type.clone()),
                })
                .boxed()
        }
        ValueType::Map { key, value } => {
            let (key_kind, value_type) = (*key, (**value).clone());
            prop::collection::btree_map(arb_key(key_kind), arb_value(value), 0..4)
                .prop_map(move |entries| {
                    Value::map(key_kind, value_type.clone(), entries).expect("orderable key")
                })
                .boxed()
        }
        ValueType::Struct { name, fields } => {
            let name = name.clone();
            let names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
            let values: Vec<_> = fields.iter().map(|f| arb_value(&f.ty)).collect();
            values
                .prop_map(move |values| {
                    Value::record(name.clone(), names.clone().into_iter().zip(values))
                })
                .boxed()
        }
        other => Just(other.zero_value()).boxed(),
    }
}

/// Two values sharing one generated type
fn arb_pair() -> impl Strategy<Value = (ValueType, Value, Value)> {
    arb_type().prop_flat_map(|ty| (Just(ty.clone()), arb_value(&ty), arb_value(&ty)))
}

proptest! {
    #[test]
    fn prop_diff_of_self_is_empty(a in arb_doc()) {
        prop_assert!(diff(&a, &a.clone()).unwrap().is_empty());
    }

    #[test]
    fn prop_patch_round_trips(a in arb_doc(), b in arb_doc()) {
        let cs = diff(&a, &b).unwrap();
        let mut target = deep_copy(&a).unwrap();
        cs.patch(&mut target).unwrap();
        prop_assert_eq!(target, b);
    }

    #[test]
    fn prop_patch_is_idempotent(a in arb_doc(), b in arb_doc()) {
        let cs = diff(&a, &b).unwrap();
        let mut target = a.clone();
        cs.patch(&mut target).unwrap();
        let once = target.clone();
        cs.patch(&mut target).unwrap();
        prop_assert_eq!(target, once);
    }

    #[test]
    fn prop_copy_is_equal(a in arb_doc()) {
        prop_assert_eq!(deep_copy(&a).unwrap(), a);
    }

    #[test]
    fn prop_nested_diff_of_self_is_empty((_ty, a, _b) in arb_pair()) {
        prop_assert!(diff(&a, &a.clone()).unwrap().is_empty());
    }

    #[test]
    fn prop_nested_patch_round_trips((_ty, a, b) in arb_pair()) {
        let cs = diff(&a, &b).unwrap();
        let mut target = deep_copy(&a).unwrap();
        cs.patch(&mut target).unwrap();
        prop_assert_eq!(target, b);
    }

    #[test]
    fn prop_nested_patch_is_idempotent((_ty, a, b) in arb_pair()) {
        let cs = diff(&a, &b).unwrap();
        let mut target = a.clone();
        cs.patch(&mut target).unwrap();
        let once = target.clone();
        cs.patch(&mut target).unwrap();
        prop_assert_eq!(target, once);
    }

    #[test]
    fn prop_patch_materializes_missing_locations((ty, a, b) in arb_pair()) {
        // Every intermediate location must be created on a zero target.
        let cs = diff(&a, &b).unwrap();
        let mut target = ty.zero_value();
        prop_assert!(cs.patch(&mut target).is_ok());
        prop_assert_eq!(target.value_type(), ty);
    }
}
