//! objdiff core - path-addressed structural diff and patch
//!
//! This crate compares two values of the same runtime type and records the
//! differences as an ordered, typed change set that can later be replayed onto
//! a third value of that type. It provides:
//! - A closed value model (`value`) with runtime type descriptors
//! - Paths made of field, key, index and indirection steps (`path`)
//! - The structural differ and change-set model (`diff`)
//! - A deep copier that isolates captured values (`copy`)
//! - The patch driver and path navigator (`patch`)
//! - Structured errors and logging (`errors`, `logging_facility`)
//!
//! # Example
//!
//! ```
//! use objdiff_core::{diff, Value};
//!
//! let a = Value::record("Doc", [("name", Value::from("x"))]);
//! let b = Value::record("Doc", [("name", Value::from("y"))]);
//!
//! let changes = diff(&a, &b).unwrap();
//! let mut target = a.clone();
//! changes.patch(&mut target).unwrap();
//! assert_eq!(target, b);
//! ```

pub mod copy;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod patch;
pub mod path;
pub mod value;

// Re-export commonly used types
pub use copy::deep_copy;
pub use diff::{diff, diff_with_options, Change, ChangeSet, DiffOptions, TraceEvent, TraceHook};
pub use errors::{ExError, ExErrorKind, NavigationError, ObjDiffError, PatchError, Result};
pub use patch::{patch, Navigator, NavigatorConfig, PatchOptions, Target, ValueNavigator};
pub use path::{Path, PathStep};
pub use value::{Complex, FieldType, MapKey, Scalar, Value, ValueType};
