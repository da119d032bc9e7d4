//! Deep copier.
//!
//! Produces a structurally independent copy of a value graph. The dispatch
//! follows the same shapes as the differ, so every shape the differ can
//! capture is a shape the copier can isolate.

use crate::errors::{ObjDiffError, Result};
use crate::value::{ArrayValue, Field, MapValue, PtrValue, SeqValue, StructValue, Value};
use std::collections::BTreeMap;

/// Copy `value` so that the result shares no storage with it at any depth.
///
/// # Errors
///
/// * `UnsupportedKind` - an opaque leaf was found anywhere in the graph
///
/// # Example
///
/// ```
/// use objdiff_core::{deep_copy, Value};
///
/// let original = Value::ptr(Value::from("shared?"));
/// let copy = deep_copy(&original).unwrap();
/// assert_eq!(copy, original);
/// ```
pub fn deep_copy(value: &Value) -> Result<Value> {
    match value {
        Value::Struct(s) => {
            let fields = s
                .fields
                .iter()
                .map(|f| {
                    Ok(Field {
                        name: f.name.clone(),
                        value: deep_copy(&f.value)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Struct(StructValue {
                name: s.name.clone(),
                fields,
            }))
        }
        Value::Map(m) => {
            let mut entries = BTreeMap::new();
            for (key, entry) in &m.entries {
                entries.insert(key.clone(), deep_copy(entry)?);
            }
            Ok(Value::Map(MapValue {
                key_kind: m.key_kind,
                value_type: m.value_type.clone(),
                entries,
            }))
        }
        Value::Array(a) => Ok(Value::Array(ArrayValue {
            elem_type: a.elem_type.clone(),
            items: copy_items(&a.items)?,
        })),
        Value::Seq(s) => Ok(Value::Seq(SeqValue {
            elem_type: s.elem_type.clone(),
            items: copy_items(&s.items)?,
        })),
        Value::Ptr(p) => {
            let target = match &p.target {
                Some(pointee) => Some(Box::new(deep_copy(pointee)?)),
                None => None,
            };
            Ok(Value::Ptr(PtrValue {
                elem_type: p.elem_type.clone(),
                target,
            }))
        }
        // Scalars own their data; the variant carries kind and bit width.
        Value::Scalar(s) => Ok(Value::Scalar(s.clone())),
        Value::Opaque(o) => Err(ObjDiffError::UnsupportedKind { kind: o.kind }),
    }
}

fn copy_items(items: &[Value]) -> Result<Vec<Value>> {
    let mut copied = Vec::with_capacity(items.len());
    for item in items {
        copied.push(deep_copy(item)?);
    }
    Ok(copied)
}
