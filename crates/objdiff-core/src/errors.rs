use crate::path::{Path, PathStep};
use crate::value::{MapKey, ValueType};
use objdiff_core_types::{OpaqueKind, ScalarKind, Shape};
use thiserror::Error;

/// Result type alias using ObjDiffError
pub type Result<T> = std::result::Result<T, ObjDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Differ or patch driver given/targeting a different type than expected
    TypeMismatch,
    /// Patch target is not a mutable location
    NotSettable,
    /// A leaf kind outside the supported scalar set
    UnsupportedKind,
    /// The navigator could not resolve or mutate a path step
    NavigationFailure,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::NotSettable => "ERR_NOT_SETTABLE",
            ExErrorKind::UnsupportedKind => "ERR_UNSUPPORTED_KIND",
            ExErrorKind::NavigationFailure => "ERR_NAVIGATION_FAILURE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context of
/// where the failure happened (operation, path, change index).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    change_index: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            change_index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the rendered path of the failing location
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the position of the failing change inside its change set
    pub fn with_change_index(mut self, index: usize) -> Self {
        self.change_index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn change_index(&self) -> Option<usize> {
        self.change_index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(index) = self.change_index {
            write!(f, " (change: {})", index)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for diff, copy and patch operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObjDiffError {
    /// The two compared values, or the patch target and the change set,
    /// have different runtime types
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    /// The patch target is a read-only handle
    #[error("Patch target of type {type_name} is not settable")]
    NotSettable { type_name: String },

    /// A leaf kind outside the supported scalar set was reached
    #[error("Unsupported kind: {kind}")]
    UnsupportedKind { kind: OpaqueKind },

    /// A change could not be replayed onto the patch target
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Failure to replay one change of a change set.
///
/// Changes applied before `change_index` stay applied.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Patch failed at change {change_index} ({path}): {source}")]
pub struct PatchError {
    pub change_index: usize,
    pub path: Path,
    pub source: NavigationError,
}

/// Errors raised by a path navigator while resolving or mutating a location
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Step {step} does not apply to a {found} node")]
    StepMismatch { step: PathStep, found: Shape },

    #[error("No field {name} at position {index}")]
    UnknownField { index: usize, name: String },

    #[error("Missing location at step {step} and auto-create is disabled")]
    Missing { step: PathStep },

    #[error("Index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("Key {key} has kind {found}, mapping declares {expected}")]
    KeyKindMismatch {
        key: MapKey,
        expected: ScalarKind,
        found: ScalarKind,
    },

    #[error("Value of type {found} cannot be stored where {expected} is declared")]
    ValueTypeMismatch {
        expected: ValueType,
        found: ValueType,
    },

    #[error("Navigator is at step {position} of {len}; terminal location not reached")]
    NotAtTerminal { position: usize, len: usize },
}

impl From<ObjDiffError> for ExError {
    fn from(err: ObjDiffError) -> Self {
        let message = err.to_string();
        match err {
            ObjDiffError::TypeMismatch { .. } => {
                ExError::new(ExErrorKind::TypeMismatch).with_message(message)
            }
            ObjDiffError::NotSettable { .. } => {
                ExError::new(ExErrorKind::NotSettable).with_message(message)
            }
            ObjDiffError::UnsupportedKind { .. } => {
                ExError::new(ExErrorKind::UnsupportedKind).with_message(message)
            }
            ObjDiffError::Patch(PatchError {
                change_index,
                path,
                source,
            }) => ExError::new(ExErrorKind::NavigationFailure)
                .with_op("patch")
                .with_change_index(change_index)
                .with_path(path.to_string())
                .with_message(source.to_string()),
        }
    }
}
