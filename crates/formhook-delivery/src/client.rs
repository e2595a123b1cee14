//! HTTP client for webhook delivery with configurable timeouts.
//!
//! Handles request construction, response capture and categorisation of
//! transport failures.

use std::time::{Duration, Instant};

use bytes::Bytes;
use formhook_core::EventRecord;
use reqwest::Response;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::{
    error::{DeliveryError, Result},
    DEFAULT_TIMEOUT_SECONDS,
};

/// Response bodies longer than this are truncated before being returned.
const MAX_RESPONSE_BODY_SIZE: usize = 1024;

/// Configuration for the webhook delivery client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout for the whole webhook request.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: format!("formhook/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client for delivering event records.
///
/// Wraps a pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: reqwest::Client,
    config: ClientConfig,
}

/// A single webhook delivery.
#[derive(Debug, Clone)]
pub struct DeliveryRequest {
    /// Unique identifier for this delivery, sent as `X-Formhook-Delivery-Id`.
    pub delivery_id: Uuid,
    /// Destination URL for the webhook.
    pub url: String,
    /// Request body payload.
    pub body: Bytes,
    /// Content type of the payload.
    pub content_type: String,
}

impl DeliveryRequest {
    /// Builds a JSON delivery of `record` to `url`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::SerializationError` if the record cannot be
    /// encoded.
    pub fn json(url: impl Into<String>, record: &EventRecord) -> Result<Self> {
        let body = serde_json::to_vec(record)?;

        Ok(Self {
            delivery_id: Uuid::new_v4(),
            url: url.into(),
            body: Bytes::from(body),
            content_type: "application/json".to_string(),
        })
    }
}

/// Response from a webhook delivery.
#[derive(Debug, Clone)]
pub struct DeliveryResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body, truncated to 1KB.
    pub body: String,
    /// Total duration of the request.
    pub duration: Duration,
    /// Whether the webhook answered with a 2xx status.
    pub is_success: bool,
}

impl DeliveryClient {
    /// Creates a new delivery client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConfigurationError` if the HTTP client cannot
    /// be configured with the provided settings.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                DeliveryError::configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Creates a new delivery client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// POSTs the request body to the webhook.
    ///
    /// Any HTTP response is returned as `Ok`; non-2xx statuses are logged
    /// but not treated as failures.
    ///
    /// # Errors
    ///
    /// - `Timeout` if no response arrived within the configured timeout
    /// - `NetworkError` for connection and other transport failures
    pub async fn deliver(&self, request: DeliveryRequest) -> Result<DeliveryResponse> {
        let start_time = Instant::now();

        let span = info_span!(
            "webhook_delivery",
            delivery_id = %request.delivery_id,
            url = %request.url,
            payload_size = request.body.len(),
        );

        async move {
            tracing::debug!("Starting webhook delivery");

            let http_request = self
                .client
                .post(&request.url)
                .header("content-type", &request.content_type)
                .header("X-Formhook-Delivery-Id", request.delivery_id.to_string())
                .header("X-Formhook-Sent-At", chrono::Utc::now().to_rfc3339())
                .body(request.body);

            let response = match http_request.send().await {
                Ok(response) => response,
                Err(e) => {
                    let duration = start_time.elapsed();
                    tracing::warn!(duration_ms = duration.as_millis(), "Request failed: {}", e);

                    if e.is_timeout() {
                        return Err(DeliveryError::timeout(
                            u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
                        ));
                    }
                    if e.is_connect() {
                        return Err(DeliveryError::network(format!("connection failed: {e}")));
                    }
                    return Err(DeliveryError::network(e.to_string()));
                },
            };

            let delivery_response = read_response(response, start_time).await;

            if delivery_response.is_success {
                tracing::info!(
                    status = delivery_response.status_code,
                    duration_ms = delivery_response.duration.as_millis(),
                    "Webhook delivered"
                );
            } else {
                tracing::warn!(
                    status = delivery_response.status_code,
                    body = %delivery_response.body,
                    "Webhook answered with non-success status"
                );
            }

            Ok(delivery_response)
        }
        .instrument(span)
        .await
    }
}

async fn read_response(response: Response, start_time: Instant) -> DeliveryResponse {
    let status_code = response.status().as_u16();
    let is_success = response.status().is_success();

    let body = match response.bytes().await {
        Ok(bytes) => truncate_body(&bytes),
        Err(e) => {
            tracing::warn!("Failed to read response body: {}", e);
            format!("[Failed to read response body: {e}]")
        },
    };

    DeliveryResponse { status_code, body, duration: start_time.elapsed(), is_success }
}

fn truncate_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= MAX_RESPONSE_BODY_SIZE {
        return text.into_owned();
    }

    let suffix = "... (truncated)";
    let mut end = MAX_RESPONSE_BODY_SIZE - suffix.len();
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{suffix}", &text[..end])
}
