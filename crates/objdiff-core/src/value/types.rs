//! Runtime type descriptors.
//!
//! A [`ValueType`] is computed from a value and is the unit of the
//! "identical runtime type" check performed by the differ and the patch
//! driver. It also knows how to build the zero value of the type, which the
//! navigator uses when it auto-creates containers.

use crate::value::{
    ArrayValue, Field, MapValue, OpaqueValue, PtrValue, Scalar, SeqValue, StructValue, Value,
};
use objdiff_core_types::{OpaqueKind, ScalarKind, Shape};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declared type of one struct field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldType {
    pub name: String,
    pub ty: ValueType,
}

impl FieldType {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Runtime type of a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Struct { name: String, fields: Vec<FieldType> },
    Map { key: ScalarKind, value: Box<ValueType> },
    Array { elem: Box<ValueType>, len: usize },
    Seq { elem: Box<ValueType> },
    Ptr { elem: Box<ValueType> },
    Scalar(ScalarKind),
    Opaque { kind: OpaqueKind, name: String },
}

impl ValueType {
    pub fn scalar(kind: ScalarKind) -> Self {
        ValueType::Scalar(kind)
    }

    pub fn string() -> Self {
        ValueType::Scalar(ScalarKind::Str)
    }

    pub fn struct_of(name: impl Into<String>, fields: Vec<FieldType>) -> Self {
        ValueType::Struct {
            name: name.into(),
            fields,
        }
    }

    pub fn map_of(key: ScalarKind, value: ValueType) -> Self {
        ValueType::Map {
            key,
            value: Box::new(value),
        }
    }

    pub fn array_of(elem: ValueType, len: usize) -> Self {
        ValueType::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn seq_of(elem: ValueType) -> Self {
        ValueType::Seq {
            elem: Box::new(elem),
        }
    }

    pub fn ptr_to(elem: ValueType) -> Self {
        ValueType::Ptr {
            elem: Box::new(elem),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            ValueType::Struct { .. } => Shape::Struct,
            ValueType::Map { .. } => Shape::Map,
            ValueType::Array { .. } => Shape::Array,
            ValueType::Seq { .. } => Shape::Seq,
            ValueType::Ptr { .. } => Shape::Ptr,
            ValueType::Scalar(kind) => Shape::Scalar(*kind),
            ValueType::Opaque { kind, .. } => Shape::Opaque(*kind),
        }
    }

    /// Build the zero value of this type.
    ///
    /// Containers are empty, pointers absent, scalars zeroed, struct fields
    /// and array elements recursively zeroed.
    pub fn zero_value(&self) -> Value {
        match self {
            ValueType::Struct { name, fields } => Value::Struct(StructValue {
                name: name.clone(),
                fields: fields
                    .iter()
                    .map(|f| Field {
                        name: f.name.clone(),
                        value: f.ty.zero_value(),
                    })
                    .collect(),
            }),
            ValueType::Map { key, value } => Value::Map(MapValue {
                key_kind: *key,
                value_type: (**value).clone(),
                entries: BTreeMap::new(),
            }),
            ValueType::Array { elem, len } => Value::Array(ArrayValue {
                elem_type: (**elem).clone(),
                items: (0..*len).map(|_| elem.zero_value()).collect(),
            }),
            ValueType::Seq { elem } => Value::Seq(SeqValue {
                elem_type: (**elem).clone(),
                items: Vec::new(),
            }),
            ValueType::Ptr { elem } => Value::Ptr(PtrValue {
                elem_type: (**elem).clone(),
                target: None,
            }),
            ValueType::Scalar(kind) => Value::Scalar(Scalar::zero(*kind)),
            ValueType::Opaque { kind, name } => Value::Opaque(OpaqueValue {
                kind: *kind,
                type_name: name.clone(),
            }),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Struct { name, .. } => f.write_str(name),
            ValueType::Map { key, value } => write!(f, "map[{}]{}", key, value),
            ValueType::Array { elem, len } => write!(f, "[{}]{}", len, elem),
            ValueType::Seq { elem } => write!(f, "[]{}", elem),
            ValueType::Ptr { elem } => write!(f, "*{}", elem),
            ValueType::Scalar(kind) => write!(f, "{}", kind),
            ValueType::Opaque { kind, name } => write!(f, "{} ({})", name, kind),
        }
    }
}
