//! Webhook delivery for reshaped events.
//!
//! Sends a JSON-encoded [`EventRecord`](formhook_core::EventRecord) to a
//! single configured webhook URL. Delivery is one attempt: transport
//! failures surface as [`DeliveryError`], while any HTTP response, whatever
//! its status, counts as delivered.
//!
//! # Example
//!
//! ```no_run
//! use formhook_core::EventRecord;
//! use formhook_delivery::{DeliveryClient, DeliveryError, DeliveryRequest};
//!
//! # async fn example(record: EventRecord) -> Result<(), DeliveryError> {
//! let client = DeliveryClient::with_defaults()?;
//! let request = DeliveryRequest::json("https://hooks.example.com/contact", &record)?;
//!
//! let response = client.deliver(request).await?;
//! println!("webhook answered {}", response.status_code);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{ClientConfig, DeliveryClient, DeliveryRequest, DeliveryResponse};
pub use error::{DeliveryError, Result};

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
