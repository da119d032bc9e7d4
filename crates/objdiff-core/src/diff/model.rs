//! Change and change-set types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! No wire format is owned here; callers pick a serde format if they need to
//! persist or transport a change set.

use crate::path::Path;
use crate::value::{Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded edit at a path.
///
/// The payload is exactly one of a new isolated value or a deletion marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Change {
    /// Set the location to an isolated copy of the new content
    Value { path: Path, value: Value },
    /// Remove (or zero) the location
    Deleted { path: Path },
}

impl Change {
    pub fn path(&self) -> &Path {
        match self {
            Change::Value { path, .. } | Change::Deleted { path } => path,
        }
    }

    /// Captured value, `None` for deletions
    pub fn value(&self) -> Option<&Value> {
        match self {
            Change::Value { value, .. } => Some(value),
            Change::Deleted { .. } => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Change::Deleted { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Value { path, value } => {
                write!(f, "set {} = {}", path, super::describe::render_value(value))
            }
            Change::Deleted { path } => write!(f, "delete {}", path),
        }
    }
}

/// The ordered, typed collection of changes produced by comparing two values.
///
/// Order equals visitation order of the differ. Two change sets are equal iff
/// their base types match and their changes are equal element-wise, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    base_type: ValueType,
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Create an empty change set for values of `base_type`
    pub fn new(base_type: ValueType) -> Self {
        Self {
            base_type,
            changes: Vec::new(),
        }
    }

    /// Append a value change.
    ///
    /// `value` must already be isolated from caller-owned data; no copy is
    /// made here.
    pub fn append_value(&mut self, path: Path, value: Value) {
        self.changes.push(Change::Value { path, value });
    }

    pub fn append_delete(&mut self, path: Path) {
        self.changes.push(Change::Deleted { path });
    }

    pub fn base_type(&self) -> &ValueType {
        &self.base_type
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Order-sensitive equality (same as `==`)
    pub fn equals(&self, other: &ChangeSet) -> bool {
        self == other
    }

    /// Human-readable rendering for diagnostics. Not a parseable format.
    pub fn describe(&self) -> String {
        super::describe::render_change_set(self)
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
