//! Key/value storage backing the local board cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Local database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Local cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] SharedError),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(SharedError::from(err))
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

/// String key/value store
pub trait KeyValueStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<Option<String>>>;

    /// Insert or overwrite `key`
    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, CacheResult<()>>;

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<()>>;
}

pub type SharedKeyValueStore = Arc<dyn KeyValueStore>;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY NOT NULL, value TEXT NOT NULL)";

/// SQLite-backed store in the platform data directory
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    pool: SqlitePool,
}

impl SqliteKeyValueStore {
    /// Open or create the database at `path`
    pub async fn open(path: &Path) -> CacheResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;
        sqlx::query("PRAGMA synchronous=NORMAL").execute(&pool).await?;

        Self::with_pool(pool).await
    }

    pub async fn open_default() -> CacheResult<Self> {
        let path = Self::default_path();
        tracing::info!("[LocalCache] Opening {}", path.display());
        Self::open(&path).await
    }

    /// Private in-memory database; lives as long as the store.
    pub async fn in_memory() -> CacheResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> CacheResult<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
        path.push("sketchboard");
        path.push("local.db");
        path
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<Option<String>>> {
        async move {
            let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
            Ok(value)
        }
        .boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, CacheResult<()>> {
        async move {
            sqlx::query(
                "INSERT INTO kv (key, value) VALUES (?, ?) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await?;
            Ok(())
        }
        .boxed()
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<()>> {
        async move {
            sqlx::query("DELETE FROM kv WHERE key = ?")
                .bind(key)
                .execute(&self.pool)
                .await?;
            Ok(())
        }
        .boxed()
    }
}

#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<Option<String>>> {
        async move { Ok(self.entries.read().await.get(key).cloned()) }.boxed()
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> BoxFuture<'a, CacheResult<()>> {
        async move {
            self.entries.write().await.insert(key.to_string(), value);
            Ok(())
        }
        .boxed()
    }

    fn remove<'a>(&'a self, key: &'a str) -> BoxFuture<'a, CacheResult<()>> {
        async move {
            self.entries.write().await.remove(key);
            Ok(())
        }
        .boxed()
    }
}
