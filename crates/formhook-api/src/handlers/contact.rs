//! Contact-form handler.
//!
//! Decodes the flat payload, reshapes it into an [`EventRecord`], relays the
//! record to the webhook and echoes it back. Nothing is sent downstream
//! unless decoding and reshaping both succeed.

use axum::{
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use formhook_core::{json_kind, reshape, EventRecord, FlatPayload};
use formhook_delivery::{DeliveryError, DeliveryRequest};
use serde_json::Value;
use tracing::{debug, error, field, info, instrument, warn, Span};

use crate::{envelope::SuccessEnvelope, error::ApiError, AppState};

/// Accepts a contact-form event and relays it to the webhook.
///
/// The body is read as raw bytes whatever the request content type.
///
/// # Errors
///
/// Answers `422` with a failure envelope when:
/// - the body cannot be read or is not a JSON object (E1001)
/// - a fixed field is missing or not a string (E1002)
/// - the webhook cannot be reached (E2001)
#[instrument(name = "contact_form", skip(state, body), fields(payload_size = field::Empty))]
pub async fn contact_form(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<SuccessEnvelope<EventRecord>>), ApiError> {
    let body = body
        .map_err(|e| ApiError::decode(format!("failed to read body: {}", e.body_text())))
        .inspect_err(|e| warn!(error = %e, "Rejected body"))?;
    Span::current().record("payload_size", body.len());

    let payload = decode_payload(&body).inspect_err(|e| warn!(error = %e, "Rejected body"))?;

    let record = reshape(&payload).inspect_err(|e| warn!(error = %e, "Reshape failed"))?;
    debug!(?record, "Payload reshaped");

    let request = DeliveryRequest::json(&*state.webhook_url, &record)?;
    let response = state
        .delivery
        .deliver(request)
        .await
        .inspect_err(log_delivery_failure)?;

    info!(
        event = %record.event,
        attributes = record.attributes.len(),
        traits = record.traits.len(),
        webhook_status = response.status_code,
        "Contact event relayed"
    );

    Ok((StatusCode::ACCEPTED, Json(SuccessEnvelope::new(record))))
}

/// Decodes a request body into a flat payload.
///
/// # Errors
///
/// Returns `ApiError::Decode` if the body is not valid JSON or its top level
/// is not an object.
pub fn decode_payload(body: &[u8]) -> Result<FlatPayload, ApiError> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(payload)) => Ok(payload),
        Ok(other) => {
            Err(ApiError::decode(format!("expected a JSON object, found {}", json_kind(&other))))
        },
        Err(e) => Err(ApiError::decode(format!("invalid JSON: {e}"))),
    }
}

fn log_delivery_failure(e: &DeliveryError) {
    if e.is_transport() {
        error!(error = %e, "Webhook unreachable");
    } else {
        warn!(error = %e, "Webhook delivery failed before sending");
    }
}
