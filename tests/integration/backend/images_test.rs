//! Image store API integration tests
//!
//! Exercises the `/images` routes against the in-memory store.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::Value;
use sketchboard::backend::{create_app_with, MemoryImageStore};
use sketchboard::shared::{Envelope, ImageRecord};

use crate::common::{draft, ids, record};

fn create_test_server(records: Vec<ImageRecord>) -> TestServer {
    let store = Arc::new(MemoryImageStore::with_records(records));
    TestServer::new(create_app_with(store, None)).unwrap()
}

#[tokio::test]
async fn test_health() {
    let server = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_empty_tag_lists_everything_as_bare_array() {
    let server = create_test_server(vec![record("1", &["sky"]), record("2", &[])]);

    let response = server.get("/images/get/tag=").await;
    response.assert_status_ok();
    let records: Vec<ImageRecord> = response.json();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_tag_query_is_wrapped_and_case_insensitive() {
    let server = create_test_server(vec![
        record("1", &["sky"]),
        record("2", &["sea"]),
        record("3", &["sky", "sea"]),
    ]);

    let response = server.get("/images/get/tag=SKY").await;
    response.assert_status_ok();
    let envelope: Envelope<ImageRecord> = response.json();
    assert_eq!(envelope.title, "sky");
    assert_eq!(ids(&envelope.body), vec!["1", "3"]);
}

#[tokio::test]
async fn test_distinct_tags() {
    let server = create_test_server(vec![record("1", &["sky", "sea"]), record("2", &["sky"])]);

    let tags: Vec<String> = server.get("/images/get/tags").await.json();
    assert_eq!(tags, vec!["sea", "sky"]);
}

#[tokio::test]
async fn test_find_by_id_and_missing_id() {
    let server = create_test_server(vec![record("1", &[])]);

    let found: ImageRecord = server.get("/images/get/id=1").await.json();
    assert_eq!(found.id, "1");

    let response = server.get("/images/get/id=404").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["title"].as_str().unwrap().starts_with("ERROR"));
    assert_eq!(body["body"], serde_json::json!([]));
}

#[tokio::test]
async fn test_svg_route_repairs_png_hrefs() {
    let mut stored = record("1", &[]);
    stored.inline_svg = "<svg><image href=\"data:img/png;base64,AAAA\"/></svg>".into();
    let server = create_test_server(vec![stored]);

    let response = server.get("/images/get/id=1/svg").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/svg+xml");
    assert_eq!(
        response.text(),
        "<svg><image href=\"data:image/png;base64,AAAA\"/></svg>"
    );
}

#[tokio::test]
async fn test_create_assigns_id_and_lowercases_tags() {
    let server = create_test_server(vec![]);

    let response = server
        .post("/images/update")
        .json(&draft("Sunset", &["Sky", "ORANGE"]))
        .await;
    response.assert_status_ok();
    let envelope: Envelope<ImageRecord> = response.json();
    let created = &envelope.body[0];
    assert_eq!(envelope.title, "CREATED");
    assert!(!created.is_new());
    assert_eq!(created.tags, vec!["sky", "orange"]);

    let listed: Vec<ImageRecord> = server.get("/images/get/tag=").await.json();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_update_existing_record() {
    let server = create_test_server(vec![record("1", &["old"])]);
    let mut changed = record("1", &["New"]);
    changed.title = "Renamed".into();

    let envelope: Envelope<ImageRecord> = server.post("/images/update").json(&changed).await.json();
    assert_eq!(envelope.title, "UPDATED");
    assert_eq!(envelope.body[0].title, "Renamed");
    assert_eq!(envelope.body[0].tags, vec!["new"]);
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let server = create_test_server(vec![]);
    let response = server.post("/images/update").json(&record("ghost", &[])).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_records_are_not_acceptable() {
    let server = create_test_server(vec![]);

    let blank_title = draft("   ", &[]);
    let mut empty_board = draft("Title", &[]);
    empty_board.serialized_board.clear();
    let blank_tag = draft("Title", &[" "]);

    for invalid in [blank_title, empty_board, blank_tag] {
        let response = server.post("/images/update").json(&invalid).await;
        response.assert_status(StatusCode::NOT_ACCEPTABLE);
        let envelope: Envelope<Value> = response.json();
        assert!(envelope.is_error());
    }

    let listed: Vec<ImageRecord> = server.get("/images/get/tag=").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_delete() {
    let server = create_test_server(vec![record("1", &[])]);

    let envelope: Envelope<String> = server.delete("/images/id=1").await.json();
    assert_eq!(envelope.title, "DELETED");

    server
        .delete("/images/id=1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_error_envelope() {
    let server = create_test_server(vec![]);
    let response = server.get("/nowhere").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let envelope: Envelope<Value> = response.json();
    assert!(envelope.is_error());
}

#[tokio::test]
async fn test_missing_title_is_not_acceptable_envelope() {
    let server = create_test_server(vec![]);

    let response = server
        .post("/images/update")
        .json(&serde_json::json!({
            "id": "undefined",
            "tags": ["sky"],
            "inlineSVG": "<svg/>",
            "serializedBoard": "{}"
        }))
        .await;

    response.assert_status(StatusCode::NOT_ACCEPTABLE);
    let envelope: Envelope<Value> = response.json();
    assert!(envelope.is_error());
    assert!(envelope.body.is_empty());
}

#[tokio::test]
async fn test_create_without_date_is_stamped_by_server() {
    let server = create_test_server(vec![]);

    let response = server
        .post("/images/update")
        .json(&serde_json::json!({
            "id": "undefined",
            "title": "Sunset",
            "tags": ["Sky"],
            "inlineSVG": "<svg/>",
            "serializedBoard": "{}"
        }))
        .await;

    response.assert_status_ok();
    let envelope: Envelope<ImageRecord> = response.json();
    assert_eq!(envelope.title, "CREATED");
    assert_eq!(envelope.body[0].tags, vec!["sky"]);
}
