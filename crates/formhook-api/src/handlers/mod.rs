//! HTTP request handlers.
//!
//! - `contact` - contact-form ingestion and webhook relay
//! - `health` - liveness check
//!
//! Failures are returned as [`ApiError`](crate::ApiError), which renders the
//! standard failure envelope.

pub mod contact;
pub mod health;

pub use contact::contact_form;
pub use health::health_check;
