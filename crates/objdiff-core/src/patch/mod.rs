//! Change-set replay.
//!
//! A [`ChangeSet`] is applied to a mutable target by replaying each change in
//! order through a [`Navigator`].
//!
//! ## Guarantees
//!
//! - **Pre-checks**: a read-only target or a target of the wrong type is
//!   rejected before anything is mutated.
//! - **Ordered replay**: changes are applied in change-set order.
//! - **Not atomic**: when a change fails, the changes before it stay applied
//!   and the error names the failing change index and path.

pub mod navigator;

pub use navigator::{Navigator, NavigatorConfig, ValueNavigator};

use crate::diff::model::{Change, ChangeSet};
use crate::errors::{NavigationError, ObjDiffError, PatchError, Result};
use crate::value::Value;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Handle to the value a change set is applied to.
#[derive(Debug)]
pub enum Target<'a> {
    /// A settable location
    Mutable(&'a mut Value),
    /// A read-only view; patching it fails with `NotSettable`
    ReadOnly(&'a Value),
}

impl Target<'_> {
    fn value(&self) -> &Value {
        match self {
            Target::Mutable(v) => v,
            Target::ReadOnly(v) => v,
        }
    }
}

impl<'a> From<&'a mut Value> for Target<'a> {
    fn from(value: &'a mut Value) -> Self {
        Target::Mutable(value)
    }
}

impl<'a> From<&'a Value> for Target<'a> {
    fn from(value: &'a Value) -> Self {
        Target::ReadOnly(value)
    }
}

/// Options for [`ChangeSet::patch_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    pub navigator: NavigatorConfig,
}

impl PatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_navigator(mut self, navigator: NavigatorConfig) -> Self {
        self.navigator = navigator;
        self
    }
}

impl ChangeSet {
    /// Apply every change to `target` with default options.
    ///
    /// Sequence deletes truncate at the recorded index. On a target longer
    /// than the diff source this also drops the elements past that index.
    ///
    /// # Errors
    ///
    /// - `NotSettable` - `target` is read-only
    /// - `TypeMismatch` - `target` is not of the change set's base type
    /// - `Patch` - a change could not be replayed; earlier changes stay applied
    ///
    /// # Example
    ///
    /// ```
    /// use objdiff_core::{diff, Value};
    ///
    /// let a = Value::from("x");
    /// let b = Value::from("y");
    /// let mut target = a.clone();
    /// diff(&a, &b).unwrap().patch(&mut target).unwrap();
    /// assert_eq!(target, b);
    /// ```
    pub fn patch<'t>(&self, target: impl Into<Target<'t>>) -> Result<()> {
        self.patch_with(target, &PatchOptions::default())
    }

    /// Apply every change to `target` using `options`.
    ///
    /// # Errors
    ///
    /// Same as [`ChangeSet::patch`].
    pub fn patch_with<'t>(
        &self,
        target: impl Into<Target<'t>>,
        options: &PatchOptions,
    ) -> Result<()> {
        let start = Instant::now();
        log_op_start!(
            "patch",
            base_type = %self.base_type(),
            change_count = self.len() as u64
        );

        match self.replay_all(target.into(), options) {
            Ok(()) => {
                log_op_end!(
                    "patch",
                    duration_ms = start.elapsed().as_millis() as u64,
                    change_count = self.len() as u64
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "patch",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn replay_all(&self, target: Target<'_>, options: &PatchOptions) -> Result<()> {
        let found = target.value().value_type();
        let root = match target {
            Target::Mutable(root) => root,
            Target::ReadOnly(_) => {
                return Err(ObjDiffError::NotSettable {
                    type_name: found.to_string(),
                })
            }
        };

        if &found != self.base_type() {
            return Err(ObjDiffError::TypeMismatch {
                expected: self.base_type().clone(),
                found,
            });
        }

        for (change_index, change) in self.iter().enumerate() {
            let mut navigator = ValueNavigator::new(&mut *root, change.path(), options.navigator);
            replay(&mut navigator, change).map_err(|source| PatchError {
                change_index,
                path: change.path().clone(),
                source,
            })?;
            tracing::trace!(change_index, path = %change.path(), "change applied");
        }
        Ok(())
    }
}

/// Apply `change_set` to `target` with default options.
///
/// # Errors
///
/// Same as [`ChangeSet::patch`].
pub fn patch<'t>(change_set: &ChangeSet, target: impl Into<Target<'t>>) -> Result<()> {
    change_set.patch(target)
}

/// Drive one change through any navigator.
fn replay<N: Navigator>(
    navigator: &mut N,
    change: &Change,
) -> std::result::Result<(), NavigationError> {
    while navigator.advance()? {}

    match change {
        Change::Deleted { .. } => navigator.delete_at_current(),
        Change::Value { value, .. } => navigator.set_at_current(value.clone()),
    }
}
