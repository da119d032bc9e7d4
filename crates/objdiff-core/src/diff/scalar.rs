//! Leaf comparison.

use crate::errors::{ObjDiffError, Result};
use crate::value::{Scalar, ValueType};

/// Returns `true` when two scalars of the same kind differ.
///
/// Integers are compared after widening (signed to `i64`, unsigned to
/// `u64`); floats and complex numbers use IEEE-754 `!=`, so `NaN` always
/// differs from itself.
///
/// # Errors
///
/// * `TypeMismatch` - the scalars have different kinds
pub(crate) fn scalars_differ(a: &Scalar, b: &Scalar) -> Result<bool> {
    let (ka, kb) = (a.kind(), b.kind());
    if ka != kb {
        return Err(ObjDiffError::TypeMismatch {
            expected: ValueType::Scalar(ka),
            found: ValueType::Scalar(kb),
        });
    }

    let differ = match (a, b) {
        (Scalar::Str(x), Scalar::Str(y)) => x != y,
        (Scalar::Bool(x), Scalar::Bool(y)) => x != y,
        (Scalar::F32(x), Scalar::F32(y)) => x != y,
        (Scalar::F64(x), Scalar::F64(y)) => x != y,
        (Scalar::C64(x), Scalar::C64(y)) => x != y,
        (Scalar::C128(x), Scalar::C128(y)) => x != y,
        _ if ka.is_signed_int() => a.as_i64() != b.as_i64(),
        _ if ka.is_unsigned_int() => a.as_u64() != b.as_u64(),
        _ => a != b,
    };
    Ok(differ)
}
