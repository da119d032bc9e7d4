//! Differ configuration.

use crate::diff::model::Change;
use crate::path::Path;
use objdiff_core_types::Shape;
use std::fmt;
use std::sync::Arc;

/// Event passed to a trace hook while the differ walks a value graph.
#[derive(Debug)]
pub enum TraceEvent<'a> {
    /// The differ reached a node
    Enter { path: &'a Path, shape: Shape },
    /// The differ recorded a change
    Change(&'a Change),
}

/// Injectable trace callback
pub type TraceHook = Arc<dyn Fn(&TraceEvent<'_>) + Send + Sync>;

/// Options for [`diff_with_options`](crate::diff::diff_with_options).
///
/// The default has no trace hook installed.
#[derive(Clone, Default)]
pub struct DiffOptions {
    trace: Option<TraceHook>,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a callback invoked for every visited node and recorded change
    pub fn with_trace<F>(mut self, hook: F) -> Self
    where
        F: Fn(&TraceEvent<'_>) + Send + Sync + 'static,
    {
        self.trace = Some(Arc::new(hook));
        self
    }

    pub(crate) fn trace(&self) -> Option<&TraceHook> {
        self.trace.as_ref()
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("trace", &self.trace.is_some())
            .finish()
    }
}
