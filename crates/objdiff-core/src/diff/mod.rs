//! Structural diff.
//!
//! Compares two values of the same runtime type and produces a [`ChangeSet`]
//! whose replay turns the first into the second.
//!
//! ## Entry point
//!
//! ```
//! use objdiff_core::{diff, Value, ValueType};
//!
//! let a = Value::seq(ValueType::string(), vec!["a".into()]);
//! let b = Value::seq(ValueType::string(), vec!["a".into(), "b".into()]);
//! let changes = diff(&a, &b).unwrap();
//! println!("{}", changes.describe());
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: map entries are visited in key order, so identical inputs
//!   produce identical change sets.
//! - **Isolation**: captured values are deep copies; later mutation of the
//!   compared values does not alter the change set.
//! - **Fail-fast**: the first error aborts the walk and no change set is
//!   returned.
//! - **Positional sequences**: no alignment search is performed, so an
//!   insertion near the front shows up as a change at every later index.

pub mod describe;
pub mod engine;
pub mod model;
pub mod options;
pub(crate) mod scalar;

pub use describe::render_change_set;
pub use engine::{diff, diff_with_options};
pub use model::{Change, ChangeSet};
pub use options::{DiffOptions, TraceEvent, TraceHook};
