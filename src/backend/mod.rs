//! Backend Module
//!
//! This module contains all server-side code for sketchboard: an Axum HTTP
//! server persisting drawings as image records and relaying export-by-email
//! requests to a third-party mail gateway.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`images`** - Image store trait, PostgreSQL/in-memory stores, handlers
//! - **`mail`** - Mail relay client and the `/email` handler
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── images/         - Image store and handlers
//! ├── mail/           - Mail relay
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the image store behind
//! `Arc<dyn ImageStore>` and an optional `Arc<dyn MailRelay>`. The PostgreSQL
//! pool is thread-safe; the in-memory store guards its records with a
//! `tokio::sync::RwLock`.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. Errors render as
//! `{ "title": "ERROR: ...", "body": [] }` with a status code matching the
//! failure (406 for validation, 404 for unknown ids, 5xx for upstream failures).

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Image store
pub mod images;

/// Export-by-email relay
pub mod mail;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use server::{create_app, create_app_with, AppState};
pub use error::BackendError;
pub use images::{ImageStore, MemoryImageStore, PgImageStore};
pub use mail::{MailRelay, OutgoingMail};
