//! Sketchboard - Main Library
//!
//! Sketchboard is a collaborative drawing gallery: an Axum REST backend that
//! persists drawings as image records and relays exports by e-mail, and a
//! native client that aggregates images by tag, edits boards with undo/redo,
//! caches them locally and exports them as SVG, PNG or JPEG.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between client and backend
//!   - `ImageRecord`, response envelopes, e-mail payloads
//!   - Shared configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and route table
//!   - PostgreSQL and in-memory image stores
//!   - Mail relay client
//!
//! - **`gallery_app`** - Native client (egui/eframe)
//!   - Image store API client and aggregation service
//!   - Board model, local cache, export pipeline
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use sketchboard::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Serve with axum::serve
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sketchboard::gallery_app::{AggregationService, Config, GalleryApiClient, PendingErrors};
//!
//! # async fn example() {
//! let api = Arc::new(GalleryApiClient::new(Config::new()));
//! let service = AggregationService::new(api, Arc::new(PendingErrors::new()));
//! service.fetch_by_tags(&["sky".to_string()]).await;
//! println!("{} images", service.snapshot().images.len());
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Server**: Stores are shared as `Arc<dyn ImageStore>`; the in-memory
//!   store uses `tokio::sync::RwLock`
//! - **Client**: Aggregation state sits behind `Arc<RwLock<_>>` and is read
//!   through snapshots; events go out on a `broadcast` channel
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation and serialization
//! - `backend::error::BackendError` rendered as error envelopes
//! - `gallery_app::api::ApiError`, `ExportError`, `CacheError` on the client

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Gallery client and egui app
pub mod gallery_app;
