//! Structured logging for objdiff operations
//!
//! The `diff` and `patch` operations emit a start event
//! and exactly one terminal event through the macros below:
//!
//! - `log_op_start!(op, ...)` - operation start
//! - `log_op_end!(op, duration_ms = ...)` - successful end
//! - `log_op_error!(op, err, duration_ms = ...)` - failed end, tagged with the
//!   stable error code
//!
//! Nothing is installed as a global subscriber by the library itself; binaries
//! and tests opt in with [`init`] or [`init_test_capture`].
//!
//! # Usage
//!
//! ```rust
//! use objdiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
