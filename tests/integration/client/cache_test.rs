//! Local persistence integration tests over SQLite

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sketchboard::gallery_app::local_cache::{
    KeyValueStore, LoadOutcome, LocalPersistence, SqliteKeyValueStore, BOARD_CACHE_KEY,
};
use sketchboard::gallery_app::{BaseParameters, Board, SvgNode};

use crate::common::sample_board;

async fn sqlite_persistence() -> (LocalPersistence, Arc<SqliteKeyValueStore>) {
    let store = Arc::new(SqliteKeyValueStore::in_memory().await.unwrap());
    (LocalPersistence::new(store.clone()), store)
}

#[tokio::test]
async fn test_save_then_load_round_trips() {
    let (persistence, _) = sqlite_persistence().await;
    let saved = sample_board();
    persistence.save(&saved).await.unwrap();

    let mut board = Board::new(BaseParameters {
        width: 10,
        height: 10,
        background_color: "#000000".into(),
    });
    board.add_component(SvgNode::rect(0.0, 0.0, 1.0, 1.0, "red"));

    let outcome = persistence.load(&mut board).await.unwrap();

    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(board.document(), saved.document());
    assert_eq!(board.to_svg_markup(), saved.to_svg_markup());
    assert!(!board.can_undo(), "history holds only the restored state");
    assert!(!board.can_redo());
}

#[tokio::test]
async fn test_load_without_save_is_noop() {
    let (persistence, _) = sqlite_persistence().await;
    let mut board = sample_board();
    let before = board.clone();

    let outcome = persistence.load(&mut board).await.unwrap();

    assert_eq!(outcome, LoadOutcome::NothingToLoad);
    assert_eq!(board, before);
    assert!(board.can_undo());
}

#[tokio::test]
async fn test_save_overwrites_single_key() {
    let (persistence, store) = sqlite_persistence().await;
    persistence.save(&Board::default()).await.unwrap();
    let latest = sample_board();
    persistence.save(&latest).await.unwrap();

    let raw = store.get(BOARD_CACHE_KEY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["baseParameters"]["width"], 800);
    assert_eq!(json["svgBoard"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_sqlite_file_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local.db");
    let saved = sample_board();

    {
        let store = SqliteKeyValueStore::open(&path).await.unwrap();
        LocalPersistence::new(Arc::new(store)).save(&saved).await.unwrap();
    }

    let store = SqliteKeyValueStore::open(&path).await.unwrap();
    let mut board = Board::default();
    let outcome = LocalPersistence::new(Arc::new(store))
        .load(&mut board)
        .await
        .unwrap();
    assert_eq!(outcome, LoadOutcome::Restored);
    assert_eq!(board, saved);
}
