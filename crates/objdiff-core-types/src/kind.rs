//! Kind taxonomy for value graphs
//!
//! A value graph is built from a closed set of shapes. Scalar leaves carry a
//! [`ScalarKind`] that fixes their representation (including bit width);
//! leaves the engine cannot compare or copy carry an [`OpaqueKind`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported scalar leaf kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    /// Complex number with two `f32` components
    C64,
    /// Complex number with two `f64` components
    C128,
    Str,
}

impl ScalarKind {
    /// Every supported scalar kind, in declaration order
    pub const ALL: [ScalarKind; 14] = [
        ScalarKind::Bool,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::C64,
        ScalarKind::C128,
        ScalarKind::Str,
    ];

    /// Stable lowercase name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::C64 => "c64",
            ScalarKind::C128 => "c128",
            ScalarKind::Str => "string",
        }
    }

    pub fn is_signed_int(&self) -> bool {
        matches!(
            self,
            ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64
        )
    }

    pub fn is_unsigned_int(&self) -> bool {
        matches!(
            self,
            ScalarKind::U8 | ScalarKind::U16 | ScalarKind::U32 | ScalarKind::U64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, ScalarKind::F32 | ScalarKind::F64)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ScalarKind::C64 | ScalarKind::C128)
    }

    /// Whether values of this kind may be used as mapping keys.
    ///
    /// Keys must be totally ordered, which rules out floats and complex numbers.
    pub fn is_key_kind(&self) -> bool {
        !self.is_float() && !self.is_complex()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Leaf kinds outside the supported scalar set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OpaqueKind {
    Channel,
    Function,
    Interface,
    UnsafePointer,
}

impl OpaqueKind {
    pub fn name(&self) -> &'static str {
        match self {
            OpaqueKind::Channel => "chan",
            OpaqueKind::Function => "func",
            OpaqueKind::Interface => "interface",
            OpaqueKind::UnsafePointer => "unsafe pointer",
        }
    }
}

impl fmt::Display for OpaqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The shape of a node in a value graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// Aggregate with named fields
    Struct,
    /// Keyed mapping
    Map,
    /// Fixed-length sequence
    Array,
    /// Resizable sequence
    Seq,
    /// Single-owner indirection
    Ptr,
    Scalar(ScalarKind),
    Opaque(OpaqueKind),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Struct => f.write_str("struct"),
            Shape::Map => f.write_str("map"),
            Shape::Array => f.write_str("array"),
            Shape::Seq => f.write_str("seq"),
            Shape::Ptr => f.write_str("ptr"),
            Shape::Scalar(kind) => write!(f, "{}", kind),
            Shape::Opaque(kind) => write!(f, "{}", kind),
        }
    }
}
