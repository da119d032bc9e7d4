//! Core types shared across objdiff facilities
//!
//! This crate provides foundational types used by the value model, the
//! error facility and the logging facility:
//!
//! - **Kind taxonomy**: ScalarKind, OpaqueKind, Shape
//! - **Schema constants**: Canonical field keys and event names

pub mod kind;
pub mod schema;

pub use kind::{OpaqueKind, ScalarKind, Shape};
