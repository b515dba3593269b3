//! `/email` integration tests
//!
//! The relay must only be reached by payloads that pass validation.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sketchboard::backend::{create_app_with, MemoryImageStore};
use sketchboard::shared::email::encode_data_url;
use serde_json::Value;
use sketchboard::shared::Envelope;

use crate::common::CountingRelay;

fn create_test_server(relay: Option<Arc<CountingRelay>>) -> TestServer {
    let store = Arc::new(MemoryImageStore::new());
    let relay = relay.map(|r| r as Arc<dyn sketchboard::backend::MailRelay>);
    TestServer::new(create_app_with(store, relay)).unwrap()
}

fn payload(mime_type: &str, destination: &str) -> serde_json::Value {
    json!({
        "dataUrl": encode_data_url(mime_type, b"\x89PNG fake"),
        "mimeType": mime_type,
        "filename": "drawing",
        "destination": destination,
    })
}

#[tokio::test]
async fn test_text_plain_is_rejected_without_relay_call() {
    let relay = Arc::new(CountingRelay::default());
    let server = create_test_server(Some(relay.clone()));

    let response = server
        .post("/email")
        .json(&payload("text/plain", "someone@example.com"))
        .await;

    response.assert_status(StatusCode::NOT_ACCEPTABLE);
    assert_eq!(relay.sends(), 0);
}

#[tokio::test]
async fn test_invalid_destination_is_rejected_without_relay_call() {
    let relay = Arc::new(CountingRelay::default());
    let server = create_test_server(Some(relay.clone()));

    let response = server
        .post("/email")
        .json(&payload("image/png", "not an address"))
        .await;

    response.assert_status(StatusCode::NOT_ACCEPTABLE);
    assert_eq!(relay.sends(), 0);
}

#[tokio::test]
async fn test_png_is_relayed_exactly_once() {
    let relay = Arc::new(CountingRelay::default());
    let server = create_test_server(Some(relay.clone()));

    let response = server
        .post("/email")
        .json(&payload("image/png", "someone@example.com"))
        .await;

    response.assert_status_ok();
    let envelope: Envelope<String> = response.json();
    assert_eq!(envelope.title, "SENT");
    assert_eq!(relay.sends(), 1);

    let mail = relay.last().unwrap();
    assert_eq!(mail.destination, "someone@example.com");
    assert_eq!(mail.mime_type, "image/png");
    assert_eq!(mail.content, b"\x89PNG fake".to_vec());
}

#[tokio::test]
async fn test_missing_relay_is_unavailable() {
    let server = create_test_server(None);

    let response = server
        .post("/email")
        .json(&payload("image/jpeg", "someone@example.com"))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_mime_type_is_not_acceptable_envelope() {
    let relay = Arc::new(CountingRelay::default());
    let server = create_test_server(Some(relay.clone()));

    let mut body = payload("image/png", "someone@example.com");
    body.as_object_mut().unwrap().remove("mimeType");
    let response = server.post("/email").json(&body).await;

    response.assert_status(StatusCode::NOT_ACCEPTABLE);
    let envelope: Envelope<Value> = response.json();
    assert!(envelope.is_error());
    assert_eq!(relay.sends(), 0);
}
