//! Aggregation service integration tests

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sketchboard::gallery_app::reporter::{
    DELETE_ERROR_MESSAGE, ERROR_DIALOG_WIDTH, FETCH_ERROR_MESSAGE, UPDATE_ERROR_MESSAGE,
};
use sketchboard::gallery_app::GalleryEvent;
use sketchboard::shared::ImageRecord;

use crate::common::{draft, ids, record, service_with, ScriptedApi};

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

fn titled(id: &str, title: &str, tags: &[&str]) -> ImageRecord {
    let mut record = record(id, tags);
    record.title = title.to_string();
    record
}

#[tokio::test]
async fn test_tag_merge_is_sequential_and_deduplicated() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_tag(
                "sky",
                vec![record("1", &["sky"]), titled("2", "from sky", &["sky", "sea"])],
            )
            .with_tag(
                "sea",
                vec![titled("2", "from sea", &["sky", "sea"]), record("3", &["sea"])],
            ),
    );
    let (service, errors) = service_with(api.clone());
    let mut events = service.subscribe();

    service.fetch_by_tags(&tags(&["Sky", "SEA"])).await;

    let state = service.snapshot();
    assert_eq!(ids(&state.images), vec!["1", "2", "3"]);
    assert_eq!(state.images[1].title, "from sky", "first tag's copy wins");
    assert!(!state.is_loading);
    assert!(state.server_reachable);
    assert_eq!(api.calls(), vec!["tag:sky", "tag:sea"]);
    assert!(errors.is_empty());

    match events.try_recv().unwrap() {
        GalleryEvent::Completed(images) => assert_eq!(ids(&images), vec!["1", "2", "3"]),
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_tag_merge_is_deterministic() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_tag("a", vec![record("x", &[]), record("y", &[])])
            .with_tag("b", vec![record("y", &[]), record("z", &[]), record("x", &[])]),
    );
    let (service, _) = service_with(api);

    service.fetch_by_tags(&tags(&["a", "b"])).await;
    let first = service.snapshot().images;
    service.fetch_by_tags(&tags(&["a", "b"])).await;

    assert_eq!(service.snapshot().images, first);
    assert_eq!(ids(&first), vec!["x", "y", "z"]);
}

#[tokio::test]
async fn test_later_tag_appends_to_first() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_tag("a", vec![record("1", &[])])
            .with_tag("b", vec![record("2", &[])]),
    );
    let (service, _) = service_with(api);

    service.fetch_by_tags(&tags(&["b"])).await;
    service.fetch_by_tags(&tags(&["a", "b"])).await;

    assert_eq!(ids(&service.snapshot().images), vec!["1", "2"]);
}

#[tokio::test]
async fn test_empty_tag_list_keeps_duplicates() {
    let api = Arc::new(ScriptedApi::new().with_all(vec![
        record("1", &[]),
        record("1", &[]),
        record("2", &[]),
    ]));
    let (service, _) = service_with(api.clone());

    service.fetch_by_tags(&[]).await;

    assert_eq!(ids(&service.snapshot().images), vec!["1", "1", "2"]);
    assert_eq!(api.calls(), vec!["list_all"]);
}

#[tokio::test]
async fn test_blank_tags_are_dropped_before_requests() {
    let api = Arc::new(ScriptedApi::new().with_tag("sky", vec![record("1", &["sky"])]));
    let (service, errors) = service_with(api.clone());

    service.fetch_by_tags(&tags(&["  ", " Sky "])).await;
    assert_eq!(api.calls(), vec!["tag:sky"]);

    service.fetch_by_tags(&tags(&[" "])).await;
    assert_eq!(api.calls(), vec!["tag:sky", "list_all"]);
    assert!(errors.is_empty());
    assert!(service.snapshot().server_reachable);
}

#[tokio::test]
async fn test_retry_exhaustion_reports_once_and_clears_flags() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_tag("a", vec![record("1", &[])])
            .failing("tag:b"),
    );
    let (service, errors) = service_with(api.clone());
    service.fetch_by_tags(&tags(&["a"])).await;
    let mut events = service.subscribe();

    service.fetch_by_tags(&tags(&["b", "a"])).await;

    assert_eq!(api.count("tag:b"), 3);
    assert_eq!(api.count("tag:a"), 1, "chain aborts after the failing tag");

    let reported = errors.drain();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].message, FETCH_ERROR_MESSAGE);
    assert_eq!(reported[0].width, ERROR_DIALOG_WIDTH);

    let state = service.snapshot();
    assert!(!state.is_loading);
    assert!(!state.is_mutating);
    assert!(!state.server_reachable);
    match events.try_recv().unwrap() {
        GalleryEvent::Error(images) => assert_eq!(ids(&images), vec!["1"]),
        other => panic!("unexpected event {:?}", other),
    }
}

#[tokio::test]
async fn test_list_all_failure_keeps_images() {
    let api = Arc::new(ScriptedApi::new().failing("list_all"));
    let (service, errors) = service_with(api.clone());

    service.fetch_by_tags(&[]).await;

    assert_eq!(api.count("list_all"), 3);
    assert_eq!(errors.len(), 1);
    assert!(service.snapshot().images.is_empty());
}

#[tokio::test]
async fn test_distinct_tags_failure_is_silent() {
    let api = Arc::new(ScriptedApi::new().failing("tags"));
    let (service, errors) = service_with(api.clone());

    service.fetch_distinct_tags().await;

    assert_eq!(api.count("tags"), 3);
    assert!(errors.is_empty());
    assert!(service.snapshot().tags.is_empty());
}

#[tokio::test]
async fn test_initialize_fetches_images_and_tags() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_all(vec![record("1", &["sky"])])
            .with_tags(&["sky"]),
    );
    let (service, _) = service_with(api.clone());
    let mut events = service.subscribe();

    service.initialize().await;

    assert_eq!(api.calls(), vec!["list_all", "tags"]);
    let state = service.snapshot();
    assert_eq!(ids(&state.images), vec!["1"]);
    assert_eq!(state.tags, vec!["sky"]);
    assert!(matches!(events.try_recv(), Ok(GalleryEvent::Completed(_))));
    assert!(matches!(events.try_recv(), Ok(GalleryEvent::TagsUpdated(_))));
}

#[tokio::test]
async fn test_every_subscriber_sees_every_event() {
    let api = Arc::new(ScriptedApi::new());
    let (service, _) = service_with(api);
    let mut first = service.subscribe();
    let mut second = service.subscribe();

    service.fetch_by_tags(&[]).await;

    assert!(matches!(first.try_recv(), Ok(GalleryEvent::Completed(_))));
    assert!(matches!(second.try_recv(), Ok(GalleryEvent::Completed(_))));
}

#[tokio::test]
async fn test_update_creates_and_emits_saved() {
    let api = Arc::new(ScriptedApi::new());
    let (service, _) = service_with(api);
    let mut events = service.subscribe();

    let saved = service.update_image(draft("Sunset", &["SKY"])).await.unwrap();

    assert_eq!(saved.id, "saved-1");
    assert_eq!(saved.tags, vec!["sky"]);
    let state = service.snapshot();
    assert_eq!(state.loaded, Some(saved.clone()));
    assert!(!state.is_mutating);
    assert!(state.server_reachable);
    assert_eq!(events.try_recv().unwrap(), GalleryEvent::Saved(saved));
}

#[tokio::test]
async fn test_update_failure_reports_and_clears_mutating() {
    let api = Arc::new(ScriptedApi::new().failing("upsert"));
    let (service, errors) = service_with(api.clone());

    assert!(service.update_image(draft("Sunset", &[])).await.is_none());

    assert_eq!(api.count("upsert"), 3);
    let reported = errors.drain();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].message, UPDATE_ERROR_MESSAGE);
    let state = service.snapshot();
    assert!(!state.is_mutating);
    assert!(!state.server_reachable);
    assert!(state.loaded.is_none());
}

#[tokio::test]
async fn test_delete_success_and_failure() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_all(vec![record("1", &[]), record("2", &[])])
            .failing("delete:2"),
    );
    let (service, errors) = service_with(api.clone());

    assert!(service.delete_image("1").await);
    assert!(service.snapshot().server_reachable);
    assert!(errors.is_empty());

    assert!(!service.delete_image("2").await);
    assert_eq!(api.count("delete:2"), 3);
    assert_eq!(errors.drain()[0].message, DELETE_ERROR_MESSAGE);
    assert!(!service.snapshot().is_mutating);
}
