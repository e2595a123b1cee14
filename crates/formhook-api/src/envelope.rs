//! JSON response envelopes.
//!
//! Every response body carries a boolean `status`. Success wraps the
//! payload in `data`; failure sets `data` to `null` and adds `error`.

use serde::Serialize;

/// Successful response body: `{"status": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Always `true`
    pub status: bool,
    /// Response payload
    pub data: T,
}

impl<T: Serialize> SuccessEnvelope<T> {
    /// Wraps `data` in a success envelope.
    pub fn new(data: T) -> Self {
        Self { status: true, data }
    }
}

/// Failure response body: `{"status": false, "data": null, "error": ...}`.
#[derive(Debug, Serialize)]
pub struct FailureEnvelope {
    /// Always `false`
    pub status: bool,
    /// Always `null`
    pub data: Option<()>,
    /// What went wrong
    pub error: ErrorDetail,
}

/// Detailed error information.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Stable error code (E1001, E1002, E2001)
    pub code: String,
    /// Human-readable error description
    pub message: String,
}

impl FailureEnvelope {
    /// Builds a failure envelope from an error code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: false,
            data: None,
            error: ErrorDetail { code: code.into(), message: message.into() },
        }
    }
}
