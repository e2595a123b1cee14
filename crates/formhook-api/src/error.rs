//! Request-level errors and their HTTP mapping.
//!
//! Every failure answers `422 Unprocessable Entity` with a
//! [`FailureEnvelope`]; the error code tells the kinds apart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use formhook_core::ReshapeError;
use formhook_delivery::DeliveryError;
use thiserror::Error;

use crate::envelope::FailureEnvelope;

/// Failures surfaced to `/contact-form` callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not a JSON object (E1001).
    #[error("[E1001] Decode error: {message}")]
    Decode {
        /// Why decoding failed
        message: String,
    },

    /// A fixed field is missing or not a string (E1002).
    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    /// The webhook could not be reached (E2001).
    #[error("[E2001] Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ApiError {
    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode { message: message.into() }
    }

    /// Returns the error code from the taxonomy.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "E1001",
            Self::Reshape(e) => e.code(),
            Self::Delivery(e) => e.code(),
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = FailureEnvelope::new(self.code(), self.to_string());
        (self.status_code(), Json(body)).into_response()
    }
}
