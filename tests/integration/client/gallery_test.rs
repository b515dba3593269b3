//! Gallery controller integration tests

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sketchboard::gallery_app::export::record_from_board;
use sketchboard::gallery_app::GalleryController;

use crate::common::{ids, record, sample_board, service_with, ScriptedApi};

#[tokio::test]
async fn test_tags_are_lowercased_unique_and_ordered() {
    let api = Arc::new(ScriptedApi::new());
    let (service, _) = service_with(api.clone());
    let mut gallery = GalleryController::new(service);

    gallery.add_tag("Sky").await;
    gallery.add_tag("sea").await;
    gallery.add_tag("SKY").await;
    assert_eq!(gallery.tags(), ["sky", "sea"]);

    gallery.remove_tag("SKY").await;
    assert_eq!(gallery.tags(), ["sea"]);

    gallery.clear_tags().await;
    assert!(gallery.tags().is_empty());
    assert_eq!(api.calls().last().map(String::as_str), Some("list_all"));
}

#[tokio::test]
async fn test_set_tags_refreshes_once() {
    let api = Arc::new(ScriptedApi::new());
    let (service, _) = service_with(api.clone());
    let mut gallery = GalleryController::new(service);

    gallery
        .set_tags(&["A".to_string(), "b".to_string(), "a".to_string()])
        .await;

    assert_eq!(gallery.tags(), ["a", "b"]);
    assert_eq!(api.calls(), vec!["tag:a", "tag:b"]);
}

#[tokio::test]
async fn test_selection_follows_gallery_order() {
    let api = Arc::new(ScriptedApi::new().with_all(vec![
        record("1", &[]),
        record("2", &[]),
        record("3", &[]),
    ]));
    let (service, _) = service_with(api);
    let mut gallery = GalleryController::new(service);
    gallery.refresh().await;

    gallery.toggle_selection("3");
    gallery.toggle_selection("1");
    gallery.toggle_selection("2");
    gallery.toggle_selection("2");

    assert_eq!(gallery.selected_ids(), ["3", "1"]);
    assert_eq!(ids(&gallery.selected_images()), vec!["1", "3"]);

    gallery.clear_selection();
    assert!(gallery.selected_images().is_empty());
}

#[tokio::test]
async fn test_delete_selected_then_refresh() {
    let api = Arc::new(ScriptedApi::new().with_all(vec![
        record("1", &[]),
        record("2", &[]),
        record("3", &[]),
    ]));
    let (service, _) = service_with(api.clone());
    let mut gallery = GalleryController::new(service);
    gallery.refresh().await;

    gallery.toggle_selection("3");
    gallery.toggle_selection("1");
    let outcome = gallery.delete_selected().await;
    gallery.settle_deletion(&outcome);

    assert_eq!(outcome.deleted, vec!["3", "1"]);
    assert!(outcome.failed.is_empty());
    assert!(gallery.selected_ids().is_empty());
    assert_eq!(
        api.calls(),
        vec!["list_all", "delete:3", "delete:1", "list_all"]
    );
    assert_eq!(ids(&gallery.service().snapshot().images), vec!["2"]);
}

#[tokio::test]
async fn test_failed_deletes_stay_selected() {
    let api = Arc::new(
        ScriptedApi::new()
            .with_all(vec![record("1", &[]), record("2", &[])])
            .failing("delete:2"),
    );
    let (service, errors) = service_with(api.clone());
    let mut gallery = GalleryController::new(service);
    gallery.refresh().await;

    gallery.toggle_selection("1");
    gallery.toggle_selection("2");
    let outcome = gallery.delete_selected().await;
    gallery.settle_deletion(&outcome);

    assert_eq!(outcome.deleted, vec!["1"]);
    assert_eq!(outcome.failed, vec!["2"]);
    assert_eq!(gallery.selected_ids(), ["2"]);
    assert_eq!(api.count("delete:2"), 3);
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn test_import_selected_restores_board() {
    let board = sample_board();
    let mut stored = record_from_board(&board, "Saved", vec![]).unwrap();
    stored.id = "7".into();
    let api = Arc::new(ScriptedApi::new().with_all(vec![stored.clone()]));
    let (service, errors) = service_with(api);
    let mut gallery = GalleryController::new(service);

    assert!(gallery.import_selected().await.is_none());

    gallery.toggle_selection("7");
    let imported = gallery.import_selected().await.unwrap();

    assert_eq!(imported, board);
    assert!(!imported.can_undo());
    assert_eq!(gallery.service().snapshot().loaded, Some(stored));
    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_save_board_validates_before_sending() {
    let api = Arc::new(ScriptedApi::new().with_tags(&["sky"]));
    let (service, _) = service_with(api.clone());
    let gallery = GalleryController::new(service);

    assert!(gallery.save_board(&sample_board(), "  ", vec![], None).is_err());
    assert!(api.calls().is_empty());

    let save = gallery
        .save_board(&sample_board(), "Sunset", vec!["Sky".into()], Some("42".into()))
        .unwrap();
    let saved = save.await.unwrap();

    assert_eq!(saved.id, "42");
    assert_eq!(saved.tags, vec!["sky"]);
    assert_eq!(api.calls(), vec!["upsert", "tags"]);
}
