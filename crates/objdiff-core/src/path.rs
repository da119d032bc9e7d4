//! Path model for addressing locations inside a value graph.
//!
//! A [`Path`] is an ordered sequence of [`PathStep`]s from the root of a value
//! to a unique location. Paths render as `.field`, `[key]`, `[index]` and `*`
//! segments, e.g. `.tags[2]` or `.owner*.name`.

use crate::value::MapKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathStep {
    /// Struct field, addressed by declaration position and name
    Field { index: usize, name: String },
    /// Mapping entry
    Key(MapKey),
    /// Array or sequence element
    Index(usize),
    /// Pointee of a pointer
    Indirection,
}

impl PathStep {
    #[inline]
    pub fn field(index: usize, name: impl Into<String>) -> Self {
        PathStep::Field {
            index,
            name: name.into(),
        }
    }

    #[inline]
    pub fn key(key: impl Into<MapKey>) -> Self {
        PathStep::Key(key.into())
    }

    #[inline]
    pub fn index(index: usize) -> Self {
        PathStep::Index(index)
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Field { name, .. } => write!(f, ".{}", name),
            PathStep::Key(key) => write!(f, "[{}]", key),
            PathStep::Index(i) => write!(f, "[{}]", i),
            PathStep::Indirection => f.write_str("*"),
        }
    }
}

/// A location in a value graph.
///
/// # Examples
///
/// ```
/// use objdiff_core::path::{Path, PathStep};
///
/// let path = Path::root().field(1, "tags").index(2);
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.last(), Some(&PathStep::Index(2)));
/// assert_eq!(path.to_string(), ".tags[2]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path(Vec<PathStep>);

impl Path {
    /// The empty path, addressing the root itself
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn from_steps(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    /// A new path extended by one step. The receiver is left untouched.
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.0.len() + 1);
        steps.extend_from_slice(&self.0);
        steps.push(step);
        Self(steps)
    }

    #[inline]
    pub fn field(mut self, index: usize, name: impl Into<String>) -> Self {
        self.0.push(PathStep::field(index, name));
        self
    }

    #[inline]
    pub fn key(mut self, key: impl Into<MapKey>) -> Self {
        self.0.push(PathStep::key(key));
        self
    }

    #[inline]
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathStep::Index(index));
        self
    }

    #[inline]
    pub fn indirection(mut self) -> Self {
        self.0.push(PathStep::Indirection);
        self
    }

    #[inline]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<&PathStep> {
        self.0.last()
    }

    /// The path without its last step, `None` at the root
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.0.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for step in &self.0 {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromIterator<PathStep> for Path {
    fn from_iter<I: IntoIterator<Item = PathStep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
