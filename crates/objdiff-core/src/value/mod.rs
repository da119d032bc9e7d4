//! Value graph model.
//!
//! A [`Value`] is a closed tagged union over the shapes the differ, the deep
//! copier and the navigator understand:
//!
//! - [`StructValue`] - aggregate with named fields in declaration order
//! - [`MapValue`] - keyed mapping, entries kept in key order
//! - [`ArrayValue`] - fixed-length sequence (the length is part of the type)
//! - [`SeqValue`] - resizable sequence
//! - [`PtrValue`] - single-owner indirection, present or absent
//! - [`Scalar`] - supported leaf
//! - [`OpaqueValue`] - leaf of a kind outside the supported scalar set
//!
//! Containers carry their declared element types so that empty containers and
//! absent pointers still have a complete [`ValueType`].

pub mod scalar;
pub mod types;

pub use scalar::{Complex, MapKey, Scalar};
pub use types::{FieldType, ValueType};

use objdiff_core_types::{OpaqueKind, ScalarKind, Shape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of a value graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Struct(StructValue),
    Map(MapValue),
    Array(ArrayValue),
    Seq(SeqValue),
    Ptr(PtrValue),
    Scalar(Scalar),
    Opaque(OpaqueValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructValue {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    pub key_kind: ScalarKind,
    pub value_type: ValueType,
    #[serde(with = "entry_pairs")]
    pub entries: BTreeMap<MapKey, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    pub elem_type: ValueType,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeqValue {
    pub elem_type: ValueType,
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PtrValue {
    pub elem_type: ValueType,
    pub target: Option<Box<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpaqueValue {
    pub kind: OpaqueKind,
    pub type_name: String,
}

impl Value {
    /// Build a struct from `(field name, value)` pairs in declaration order.
    pub fn record<N, I>(name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        Value::Struct(StructValue {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| Field {
                    name: name.into(),
                    value,
                })
                .collect(),
        })
    }

    /// A mapping keyed by `key_kind`.
    ///
    /// # Errors
    ///
    /// Returns `key_kind` back when it cannot key a mapping (floats and
    /// complex numbers).
    pub fn map<K, I>(
        key_kind: ScalarKind,
        value_type: ValueType,
        entries: I,
    ) -> std::result::Result<Self, ScalarKind>
    where
        K: Into<MapKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        if !key_kind.is_key_kind() {
            return Err(key_kind);
        }
        Ok(Value::Map(MapValue {
            key_kind,
            value_type,
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }))
    }

    pub fn array(elem_type: ValueType, items: Vec<Value>) -> Self {
        Value::Array(ArrayValue { elem_type, items })
    }

    pub fn seq(elem_type: ValueType, items: Vec<Value>) -> Self {
        Value::Seq(SeqValue { elem_type, items })
    }

    /// A present pointer whose declared pointee type is taken from `target`.
    pub fn ptr(target: Value) -> Self {
        Value::Ptr(PtrValue {
            elem_type: target.value_type(),
            target: Some(Box::new(target)),
        })
    }

    pub fn null_ptr(elem_type: ValueType) -> Self {
        Value::Ptr(PtrValue {
            elem_type,
            target: None,
        })
    }

    pub fn opaque(kind: OpaqueKind, type_name: impl Into<String>) -> Self {
        Value::Opaque(OpaqueValue {
            kind,
            type_name: type_name.into(),
        })
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Struct(_) => Shape::Struct,
            Value::Map(_) => Shape::Map,
            Value::Array(_) => Shape::Array,
            Value::Seq(_) => Shape::Seq,
            Value::Ptr(_) => Shape::Ptr,
            Value::Scalar(s) => Shape::Scalar(s.kind()),
            Value::Opaque(o) => Shape::Opaque(o.kind),
        }
    }

    /// Compute the runtime type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Struct(s) => ValueType::Struct {
                name: s.name.clone(),
                fields: s
                    .fields
                    .iter()
                    .map(|f| FieldType::new(f.name.clone(), f.value.value_type()))
                    .collect(),
            },
            Value::Map(m) => ValueType::map_of(m.key_kind, m.value_type.clone()),
            Value::Array(a) => ValueType::array_of(a.elem_type.clone(), a.items.len()),
            Value::Seq(s) => ValueType::seq_of(s.elem_type.clone()),
            Value::Ptr(p) => ValueType::ptr_to(p.elem_type.clone()),
            Value::Scalar(s) => ValueType::Scalar(s.kind()),
            Value::Opaque(o) => ValueType::Opaque {
                kind: o.kind,
                name: o.type_name.clone(),
            },
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Scalar::as_str)
    }

    /// Look up a struct field by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct(s) => s.fields.iter().find(|f| f.name == name).map(|f| &f.value),
            _ => None,
        }
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self {
            Value::Struct(s) => s
                .fields
                .iter_mut()
                .find(|f| f.name == name)
                .map(|f| &mut f.value),
            _ => None,
        }
    }

    /// Look up a mapping entry
    pub fn entry(&self, key: &MapKey) -> Option<&Value> {
        match self {
            Value::Map(m) => m.entries.get(key),
            _ => None,
        }
    }

    /// Items of an array or a sequence
    pub fn items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(&a.items),
            Value::Seq(s) => Some(&s.items),
            _ => None,
        }
    }

    pub fn items_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(a) => Some(&mut a.items),
            Value::Seq(s) => Some(&mut s.items),
            _ => None,
        }
    }

    /// Pointee of a present pointer
    pub fn pointee(&self) -> Option<&Value> {
        match self {
            Value::Ptr(p) => p.target.as_deref(),
            _ => None,
        }
    }
}

impl From<Scalar> for Value {
    fn from(v: Scalar) -> Self {
        Value::Scalar(v)
    }
}

/// Serialize mapping entries as a sequence of `(key, value)` pairs so that
/// non-string keys survive formats with string-only object keys.
mod entry_pairs {
    use super::{MapKey, Value};
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        entries: &BTreeMap<MapKey, Value>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(entries.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<MapKey, Value>, D::Error> {
        let pairs = Vec::<(MapKey, Value)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
