//! # Local Persistence Bridge
//!
//! Saves the board to, and restores it from, a single fixed key in a local
//! key/value store so a drawing survives restarts without a server round
//! trip.
//!
//! The stored value is the board's JSON document:
//!
//! ```text
//! { "baseParameters": { "width", "height", "backgroundColor" }, "svgBoard": [...] }
//! ```

pub mod store;

use std::sync::Arc;

use crate::gallery_app::board::{Board, BoardDocument};

pub use store::{
    CacheError, CacheResult, KeyValueStore, MemoryKeyValueStore, SharedKeyValueStore,
    SqliteKeyValueStore,
};

/// Key holding the saved board
pub const BOARD_CACHE_KEY: &str = "sketchboard.board";

/// Result of [`LocalPersistence::load`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Restored,
    NothingToLoad,
}

#[derive(Clone)]
pub struct LocalPersistence {
    store: SharedKeyValueStore,
}

impl LocalPersistence {
    pub fn new(store: SharedKeyValueStore) -> Self {
        Self { store }
    }

    /// Persistence over an in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// Write the current board state, replacing any earlier save.
    pub async fn save(&self, board: &Board) -> CacheResult<()> {
        let json = board.to_json()?;
        self.store.set(BOARD_CACHE_KEY, json).await?;
        tracing::debug!("[LocalCache] Board saved ({} components)", board.components().len());
        Ok(())
    }

    /// Restore the saved board into `board`, resetting its history.
    pub async fn load(&self, board: &mut Board) -> CacheResult<LoadOutcome> {
        let Some(json) = self.store.get(BOARD_CACHE_KEY).await? else {
            tracing::debug!("[LocalCache] Nothing saved under {}", BOARD_CACHE_KEY);
            return Ok(LoadOutcome::NothingToLoad);
        };

        let document: BoardDocument = serde_json::from_str(&json)?;
        board.restore(document);
        tracing::info!("[LocalCache] Board restored");
        Ok(LoadOutcome::Restored)
    }

    pub async fn clear(&self) -> CacheResult<()> {
        self.store.remove(BOARD_CACHE_KEY).await
    }
}
