/**
 * Image Store
 *
 * This module defines the `ImageStore` trait the HTTP handlers talk to, and
 * an in-memory implementation used when no database is configured (and by
 * the router tests).
 *
 * # Store Operations
 *
 * - create / find-by-id / find-all / find-by-tag
 * - distinct tags across all records
 * - update-in-place / delete
 *
 * Every method returns a boxed future so the store can live behind
 * `Arc<dyn ImageStore>` in `AppState`.
 */
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::ImageRecord;

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data could not be decoded
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent image store used by the REST handlers.
pub trait ImageStore: Send + Sync {
    /// Persist a new record. The store assigns the id and the date.
    fn create(&self, record: ImageRecord) -> BoxFuture<'_, StoreResult<ImageRecord>>;

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<ImageRecord>>>;

    fn find_all(&self) -> BoxFuture<'_, StoreResult<Vec<ImageRecord>>>;

    /// Records whose tag list contains `tag` (exact, already lowercased).
    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, StoreResult<Vec<ImageRecord>>>;

    /// Sorted distinct tags across all records.
    fn distinct_tags(&self) -> BoxFuture<'_, StoreResult<Vec<String>>>;

    /// Replace an existing record. Returns `None` when the id is unknown.
    fn update(&self, record: ImageRecord) -> BoxFuture<'_, StoreResult<Option<ImageRecord>>>;

    /// Delete by id. Returns whether a record was removed.
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<bool>>;
}

/// Store handle shared across handlers
pub type SharedImageStore = Arc<dyn ImageStore>;

/// In-memory store, insertion ordered.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    records: RwLock<Vec<ImageRecord>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records, keeping their ids.
    pub fn with_records(records: Vec<ImageRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl ImageStore for MemoryImageStore {
    fn create(&self, mut record: ImageRecord) -> BoxFuture<'_, StoreResult<ImageRecord>> {
        async move {
            record.id = Uuid::new_v4().to_string();
            record.date = Utc::now();
            self.records.write().await.push(record.clone());
            Ok(record)
        }
        .boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<ImageRecord>>> {
        async move {
            let records = self.records.read().await;
            Ok(records.iter().find(|record| record.id == id).cloned())
        }
        .boxed()
    }

    fn find_all(&self) -> BoxFuture<'_, StoreResult<Vec<ImageRecord>>> {
        async move { Ok(self.records.read().await.clone()) }.boxed()
    }

    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, StoreResult<Vec<ImageRecord>>> {
        async move {
            let records = self.records.read().await;
            Ok(records
                .iter()
                .filter(|record| record.tags.iter().any(|t| t == tag))
                .cloned()
                .collect())
        }
        .boxed()
    }

    fn distinct_tags(&self) -> BoxFuture<'_, StoreResult<Vec<String>>> {
        async move {
            let records = self.records.read().await;
            let tags: BTreeSet<String> = records
                .iter()
                .flat_map(|record| record.tags.iter().cloned())
                .collect();
            Ok(tags.into_iter().collect())
        }
        .boxed()
    }

    fn update(&self, mut record: ImageRecord) -> BoxFuture<'_, StoreResult<Option<ImageRecord>>> {
        async move {
            let mut records = self.records.write().await;
            match records.iter_mut().find(|existing| existing.id == record.id) {
                Some(existing) => {
                    record.date = Utc::now();
                    *existing = record.clone();
                    Ok(Some(record))
                }
                None => Ok(None),
            }
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        async move {
            let mut records = self.records.write().await;
            let before = records.len();
            records.retain(|record| record.id != id);
            Ok(records.len() != before)
        }
        .boxed()
    }
}
