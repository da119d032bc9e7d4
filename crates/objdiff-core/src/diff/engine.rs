//! Structural diff engine.
//!
//! The core entry point is [`diff`], which walks two values of the same
//! runtime type in lock-step and produces a [`ChangeSet`].

use crate::copy::deep_copy;
use crate::diff::model::ChangeSet;
use crate::diff::options::{DiffOptions, TraceEvent, TraceHook};
use crate::diff::scalar::scalars_differ;
use crate::errors::{ObjDiffError, Result};
use crate::path::{Path, PathStep};
use crate::value::{MapValue, PtrValue, SeqValue, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Compute the changes that turn `a` into `b`.
///
/// # Errors
///
/// - `TypeMismatch` - `a` and `b` have different runtime types
/// - `UnsupportedKind` - an opaque leaf was reached
///
/// # Example
///
/// ```
/// use objdiff_core::{diff, Value};
///
/// let cs = diff(&Value::from("x"), &Value::from("y")).unwrap();
/// assert_eq!(cs.len(), 1);
/// ```
pub fn diff(a: &Value, b: &Value) -> Result<ChangeSet> {
    diff_with_options(a, b, &DiffOptions::default())
}

/// Compute the changes that turn `a` into `b`, reporting progress to the
/// trace hook configured in `options`.
///
/// # Errors
///
/// Same as [`diff`].
pub fn diff_with_options(a: &Value, b: &Value, options: &DiffOptions) -> Result<ChangeSet> {
    let start = Instant::now();
    log_op_start!("diff", base_type = %a.value_type());

    match compute(a, b, options) {
        Ok(change_set) => {
            log_op_end!(
                "diff",
                duration_ms = start.elapsed().as_millis() as u64,
                change_count = change_set.len() as u64
            );
            Ok(change_set)
        }
        Err(err) => {
            log_op_error!(
                "diff",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn compute(a: &Value, b: &Value, options: &DiffOptions) -> Result<ChangeSet> {
    let base_type = a.value_type();
    let other = b.value_type();
    if base_type != other {
        return Err(ObjDiffError::TypeMismatch {
            expected: base_type,
            found: other,
        });
    }

    let mut differ = Differ {
        change_set: ChangeSet::new(base_type),
        trace: options.trace(),
    };
    differ.walk(a, b, &Path::root())?;
    Ok(differ.change_set)
}

struct Differ<'o> {
    change_set: ChangeSet,
    trace: Option<&'o TraceHook>,
}

impl Differ<'_> {
    fn walk(&mut self, a: &Value, b: &Value, path: &Path) -> Result<()> {
        if let Some(hook) = self.trace {
            hook(&TraceEvent::Enter {
                path,
                shape: a.shape(),
            });
        }

        match (a, b) {
            (Value::Struct(x), Value::Struct(y)) => {
                if x.fields.len() != y.fields.len() {
                    return Err(mismatch(a, b));
                }
                for (index, (fa, fb)) in x.fields.iter().zip(&y.fields).enumerate() {
                    let child = path.child(PathStep::field(index, fa.name.clone()));
                    self.walk(&fa.value, &fb.value, &child)?;
                }
                Ok(())
            }
            (Value::Map(x), Value::Map(y)) => self.walk_map(x, y, path),
            (Value::Array(x), Value::Array(y)) => {
                if x.items.len() != y.items.len() {
                    return Err(mismatch(a, b));
                }
                for (i, (ea, eb)) in x.items.iter().zip(&y.items).enumerate() {
                    self.walk(ea, eb, &path.child(PathStep::Index(i)))?;
                }
                Ok(())
            }
            (Value::Seq(x), Value::Seq(y)) => self.walk_seq(x, y, path),
            (Value::Ptr(x), Value::Ptr(y)) => self.walk_ptr(x, y, path),
            (Value::Scalar(x), Value::Scalar(y)) => {
                if scalars_differ(x, y)? {
                    self.record_value(path.clone(), b)?;
                }
                Ok(())
            }
            (Value::Opaque(o), Value::Opaque(_)) => {
                Err(ObjDiffError::UnsupportedKind { kind: o.kind })
            }
            _ => Err(mismatch(a, b)),
        }
    }

    fn walk_map(&mut self, a: &MapValue, b: &MapValue, path: &Path) -> Result<()> {
        for (key, va) in &a.entries {
            let child = path.child(PathStep::Key(key.clone()));
            match b.entries.get(key) {
                Some(vb) => self.walk(va, vb, &child)?,
                None => self.record_delete(child),
            }
        }

        for (key, vb) in &b.entries {
            if !a.entries.contains_key(key) {
                self.record_value(path.child(PathStep::Key(key.clone())), vb)?;
            }
        }
        Ok(())
    }

    fn walk_seq(&mut self, a: &SeqValue, b: &SeqValue, path: &Path) -> Result<()> {
        let common = a.items.len().min(b.items.len());
        for i in 0..common {
            self.walk(&a.items[i], &b.items[i], &path.child(PathStep::Index(i)))?;
        }

        // Positional only: an insertion or reorder cascades into per-index changes.
        for i in common..a.items.len() {
            self.record_delete(path.child(PathStep::Index(i)));
        }
        for (i, item) in b.items.iter().enumerate().skip(common) {
            self.record_value(path.child(PathStep::Index(i)), item)?;
        }
        Ok(())
    }

    fn walk_ptr(&mut self, a: &PtrValue, b: &PtrValue, path: &Path) -> Result<()> {
        let child = path.child(PathStep::Indirection);
        match (a.target.as_deref(), b.target.as_deref()) {
            (None, None) => Ok(()),
            (None, Some(pb)) => self.record_value(child, pb),
            (Some(_), None) => {
                self.record_delete(child);
                Ok(())
            }
            (Some(pa), Some(pb)) => self.walk(pa, pb, &child),
        }
    }

    fn record_value(&mut self, path: Path, new: &Value) -> Result<()> {
        let isolated = deep_copy(new)?;
        tracing::trace!(path = %path, "value change");
        self.change_set.append_value(path, isolated);
        self.emit_last();
        Ok(())
    }

    fn record_delete(&mut self, path: Path) {
        tracing::trace!(path = %path, "delete change");
        self.change_set.append_delete(path);
        self.emit_last();
    }

    fn emit_last(&self) {
        if let (Some(hook), Some(change)) = (self.trace, self.change_set.changes().last()) {
            hook(&TraceEvent::Change(change));
        }
    }
}

fn mismatch(a: &Value, b: &Value) -> ObjDiffError {
    ObjDiffError::TypeMismatch {
        expected: a.value_type(),
        found: b.value_type(),
    }
}
