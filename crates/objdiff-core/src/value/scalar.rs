//! Scalar leaves and mapping keys.

use crate::value::Value;
use objdiff_core_types::ScalarKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complex number made of two components of the same float type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: fmt::Display> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re, self.im)
    }
}

/// A scalar leaf value. The variant fixes the kind and bit width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    C64(Complex<f32>),
    C128(Complex<f64>),
    Str(String),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
            Scalar::C64(_) => ScalarKind::C64,
            Scalar::C128(_) => ScalarKind::C128,
            Scalar::Str(_) => ScalarKind::Str,
        }
    }

    /// The zero value of a scalar kind
    pub fn zero(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => Scalar::Bool(false),
            ScalarKind::I8 => Scalar::I8(0),
            ScalarKind::I16 => Scalar::I16(0),
            ScalarKind::I32 => Scalar::I32(0),
            ScalarKind::I64 => Scalar::I64(0),
            ScalarKind::U8 => Scalar::U8(0),
            ScalarKind::U16 => Scalar::U16(0),
            ScalarKind::U32 => Scalar::U32(0),
            ScalarKind::U64 => Scalar::U64(0),
            ScalarKind::F32 => Scalar::F32(0.0),
            ScalarKind::F64 => Scalar::F64(0.0),
            ScalarKind::C64 => Scalar::C64(Complex::default()),
            ScalarKind::C128 => Scalar::C128(Complex::default()),
            ScalarKind::Str => Scalar::Str(String::new()),
        }
    }

    /// Signed integers widened to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::I8(v) => Some(i64::from(*v)),
            Scalar::I16(v) => Some(i64::from(*v)),
            Scalar::I32(v) => Some(i64::from(*v)),
            Scalar::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Unsigned integers widened to `u64`
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Scalar::U8(v) => Some(u64::from(*v)),
            Scalar::U16(v) => Some(u64::from(*v)),
            Scalar::U32(v) => Some(u64::from(*v)),
            Scalar::U64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::C64(v) => write!(f, "{}", v),
            Scalar::C128(v) => write!(f, "{}", v),
            Scalar::Str(v) => write!(f, "{:?}", v),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::$variant(v))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex<f32> => C64,
    Complex<f64> => C128,
    String => Str,
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Scalar(Scalar::Str(v.to_string()))
    }
}

/// A mapping key.
///
/// Keys are restricted to totally ordered scalar kinds so mappings can keep
/// their entries in a deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MapKey {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Str(String),
}

impl MapKey {
    pub fn kind(&self) -> ScalarKind {
        match self {
            MapKey::Bool(_) => ScalarKind::Bool,
            MapKey::I8(_) => ScalarKind::I8,
            MapKey::I16(_) => ScalarKind::I16,
            MapKey::I32(_) => ScalarKind::I32,
            MapKey::I64(_) => ScalarKind::I64,
            MapKey::U8(_) => ScalarKind::U8,
            MapKey::U16(_) => ScalarKind::U16,
            MapKey::U32(_) => ScalarKind::U32,
            MapKey::U64(_) => ScalarKind::U64,
            MapKey::Str(_) => ScalarKind::Str,
        }
    }

    pub fn to_scalar(&self) -> Scalar {
        match self {
            MapKey::Bool(v) => Scalar::Bool(*v),
            MapKey::I8(v) => Scalar::I8(*v),
            MapKey::I16(v) => Scalar::I16(*v),
            MapKey::I32(v) => Scalar::I32(*v),
            MapKey::I64(v) => Scalar::I64(*v),
            MapKey::U8(v) => Scalar::U8(*v),
            MapKey::U16(v) => Scalar::U16(*v),
            MapKey::U32(v) => Scalar::U32(*v),
            MapKey::U64(v) => Scalar::U64(*v),
            MapKey::Str(v) => Scalar::Str(v.clone()),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_scalar())
    }
}

impl TryFrom<Scalar> for MapKey {
    type Error = ScalarKind;

    /// Fails with the offending kind for floats and complex numbers.
    fn try_from(scalar: Scalar) -> Result<Self, Self::Error> {
        match scalar {
            Scalar::Bool(v) => Ok(MapKey::Bool(v)),
            Scalar::I8(v) => Ok(MapKey::I8(v)),
            Scalar::I16(v) => Ok(MapKey::I16(v)),
            Scalar::I32(v) => Ok(MapKey::I32(v)),
            Scalar::I64(v) => Ok(MapKey::I64(v)),
            Scalar::U8(v) => Ok(MapKey::U8(v)),
            Scalar::U16(v) => Ok(MapKey::U16(v)),
            Scalar::U32(v) => Ok(MapKey::U32(v)),
            Scalar::U64(v) => Ok(MapKey::U64(v)),
            Scalar::Str(v) => Ok(MapKey::Str(v)),
            other => Err(other.kind()),
        }
    }
}

macro_rules! key_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for MapKey {
                fn from(v: $ty) -> Self {
                    MapKey::$variant(v)
                }
            }
        )*
    };
}

key_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    String => Str,
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        MapKey::Str(v.to_string())
    }
}
