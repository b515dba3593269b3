//! Persistent image store
//!
//! - **`store`** - `ImageStore` trait and the in-memory implementation
//! - **`postgres`** - PostgreSQL implementation (sqlx)
//! - **`handlers`** - REST handlers nested under `/images`

pub mod store;
pub mod postgres;
pub mod handlers;

pub use store::{ImageStore, MemoryImageStore, SharedImageStore, StoreError};
pub use postgres::PgImageStore;
