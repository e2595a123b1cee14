//! formhook HTTP API.
//!
//! Exposes `POST /contact-form`, which reshapes a flat tracking payload,
//! relays the resulting record to the configured webhook and echoes it back
//! to the caller.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod server;

use std::sync::Arc;

use formhook_delivery::DeliveryClient;

pub use config::Config;
pub use error::ApiError;
pub use server::{create_router, create_router_with_settings, start_server, ServerSettings};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client used to relay records downstream.
    pub delivery: DeliveryClient,
    /// Webhook receiving every reshaped record.
    pub webhook_url: Arc<str>,
}

impl AppState {
    /// Creates handler state for the given client and webhook target.
    pub fn new(delivery: DeliveryClient, webhook_url: impl Into<Arc<str>>) -> Self {
        Self { delivery, webhook_url: webhook_url.into() }
    }
}
