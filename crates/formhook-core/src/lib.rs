//! Core event model and payload reshaping.
//!
//! Turns the flat key-value payload posted by tracking snippets into a
//! structured [`EventRecord`]. Nothing in this crate performs I/O; the API
//! and delivery crates build on these types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod models;
pub mod reshape;

pub use error::{ReshapeError, Result};
pub use models::{Attribute, EventRecord, FlatPayload, Trait};
pub use reshape::{json_kind, reshape, FIXED_FIELDS};
