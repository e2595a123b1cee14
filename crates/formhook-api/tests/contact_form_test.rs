//! Integration tests for the `/contact-form` endpoint.
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot` and uses a
//! `wiremock` server as the downstream webhook.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::Response,
};
use formhook_api::{create_router, create_router_with_settings, AppState, ServerSettings};
use formhook_delivery::{ClientConfig, DeliveryClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn sample_payload() -> Value {
    json!({
        "ev": "click",
        "et": "ui",
        "id": "app1",
        "uid": "u1",
        "mid": "m1",
        "t": "Home",
        "p": "/",
        "l": "en",
        "sc": "1920x1080",
        "atrk1": "color",
        "atrv1": "red",
        "atrt1": "string"
    })
}

fn expected_record() -> Value {
    json!({
        "event": "click",
        "event_type": "ui",
        "app_id": "app1",
        "user_id": "u1",
        "message_id": "m1",
        "page_title": "Home",
        "page_url": "/",
        "browser_language": "en",
        "screen_size": "1920x1080",
        "attributes": { "color": { "value": "red", "type": "string" } },
        "traits": {}
    })
}

async fn webhook(status: u16) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(matchers::method("POST"))
        .and(matchers::path("/hook"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&mock_server)
        .await;

    mock_server
}

fn app_for(webhook_url: String) -> axum::Router {
    let delivery = DeliveryClient::with_defaults().expect("client should build");
    create_router(AppState::new(delivery, webhook_url))
}

async fn post_contact_form(app: axum::Router, body: impl Into<Body>) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/contact-form")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("build request");

    app.oneshot(request).await.expect("execute request")
}

async fn json_body(response: Response) -> Value {
    let bytes =
        axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("read response body");
    serde_json::from_slice(&bytes).expect("response should be JSON")
}

/// Test the complete happy path: reshape, relay, echo.
#[tokio::test]
async fn contact_form_relays_and_echoes_record() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let response = post_contact_form(app, sample_payload().to_string()).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await, json!({ "status": true, "data": expected_record() }));

    let received = mock_server.received_requests().await.expect("request recording enabled");
    assert_eq!(received.len(), 1);
    let relayed: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(relayed, expected_record());
}

/// Test that the webhook's own status does not affect the caller's response.
#[tokio::test]
async fn webhook_error_status_still_accepts() {
    let mock_server = webhook(503).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let response = post_contact_form(app, sample_payload().to_string()).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(json_body(response).await["status"], true);
}

/// Test that a body which is not JSON is rejected before any relay.
#[tokio::test]
async fn malformed_body_is_rejected_without_relay() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let response = post_contact_form(app, "ev=click&et=ui").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let body = json_body(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "E1001");

    let received = mock_server.received_requests().await.unwrap();
    assert!(received.is_empty(), "no webhook call expected for a decode error");
}

/// Test that a JSON array body is a decode error.
#[tokio::test]
async fn non_object_body_is_rejected() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let response = post_contact_form(app, json!([sample_payload()]).to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "E1001");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

/// Test that a missing fixed field fails the request and skips the relay.
#[tokio::test]
async fn missing_fixed_field_is_rejected_without_relay() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("uid");

    let response = post_contact_form(app, payload.to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "E1002");
    assert!(body["error"]["message"].as_str().unwrap().contains("`uid`"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

/// Test that an unreachable webhook turns into a failure envelope.
#[tokio::test]
async fn unreachable_webhook_is_reported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = app_for(format!("http://{addr}/hook"));

    let response = post_contact_form(app, sample_payload().to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["error"]["code"], "E2001");
}

/// Test that partial triples are dropped rather than failing the request.
#[tokio::test]
async fn partial_triples_are_dropped() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let mut payload = sample_payload();
    let map = payload.as_object_mut().unwrap();
    map.insert("atrk2".to_string(), json!("size"));
    map.insert("uatrk1".to_string(), json!("plan"));
    map.insert("uatrv1".to_string(), json!("pro"));
    map.insert("uatrt1".to_string(), json!("string"));

    let response = post_contact_form(app, payload.to_string()).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let data = json_body(response).await["data"].clone();
    assert_eq!(data["attributes"], json!({ "color": { "value": "red", "type": "string" } }));
    assert_eq!(data["traits"], json!({ "plan": { "value": "pro", "type": "string" } }));
}

/// Test that the request content type is not required to be JSON.
#[tokio::test]
async fn body_is_decoded_regardless_of_content_type() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let request = Request::builder()
        .method("POST")
        .uri("/contact-form")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(sample_payload().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

/// Test that only POST is routed.
#[tokio::test]
async fn get_is_not_allowed() {
    let app = app_for("http://127.0.0.1:9/hook".to_string());

    let request =
        Request::builder().method("GET").uri("/contact-form").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// Test that a webhook slower than the delivery timeout yields a delivery
/// failure envelope, not a bare request timeout.
#[tokio::test]
async fn hung_webhook_is_reported_as_delivery_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let delivery = DeliveryClient::new(ClientConfig {
        timeout: Duration::from_millis(200),
        ..ClientConfig::default()
    })
    .expect("client should build");
    let settings = ServerSettings { request_timeout: Duration::from_secs(2), max_body_bytes: None };
    let app = create_router_with_settings(
        AppState::new(delivery, format!("{}/hook", mock_server.uri())),
        settings,
    );

    let response = post_contact_form(app, sample_payload().to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["data"], Value::Null);
    assert_eq!(body["error"]["code"], "E2001");
    assert!(body["error"]["message"].as_str().unwrap().contains("timeout"));
}

/// Test that bodies beyond axum's usual 2MB default are accepted.
#[tokio::test]
async fn large_body_is_accepted_by_default() {
    let mock_server = webhook(200).await;
    let app = app_for(format!("{}/hook", mock_server.uri()));

    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().insert("notes".to_string(), json!("x".repeat(3 * 1024 * 1024)));

    let response = post_contact_form(app, payload.to_string()).await;

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(json_body(response).await["data"], expected_record());
}

/// Test that a body over a configured limit gets the decode envelope.
#[tokio::test]
async fn body_over_configured_limit_is_decode_error() {
    let mock_server = webhook(200).await;
    let settings = ServerSettings { max_body_bytes: Some(64), ..ServerSettings::default() };
    let app = create_router_with_settings(
        AppState::new(
            DeliveryClient::with_defaults().unwrap(),
            format!("{}/hook", mock_server.uri()),
        ),
        settings,
    );

    let response = post_contact_form(app, sample_payload().to_string()).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    let body = json_body(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["error"]["code"], "E1001");
    assert!(body["error"]["message"].as_str().unwrap().contains("failed to read body"));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
