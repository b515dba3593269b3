//! Gallery Client Module
//!
//! Client side of sketchboard: the image store API client, the tag
//! aggregation service, the drawing board with undo/redo, local persistence
//! and the import/export pipeline, plus the egui front end built on them.
//!
//! # Architecture
//!
//! - **`config`** - Server URL and export directory
//! - **`api`** - reqwest client for `/images` and `/email`
//! - **`retry`** - Count-bounded retry policy
//! - **`reporter`** - User-visible error reporting
//! - **`aggregation`** - Tag resolution, merged image list, notifications
//! - **`gallery`** - Tag/selection controller
//! - **`board`** - SVG component tree and history
//! - **`local_cache`** - Board save/restore through a key/value store
//! - **`export`** - Filters, rasterization, SVG/PNG/JPEG artifacts
//! - **`state`**, **`views`**, **`theme`** - egui application
//! - **`main`** - Application entry point (binary)
//!
//! # Module Structure
//!
//! ```text
//! gallery_app/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Application entry point
//! ├── config.rs       - Configuration
//! ├── api.rs          - HTTP client
//! ├── retry.rs        - Retry policy
//! ├── reporter.rs     - Error dialogs
//! ├── aggregation/    - Aggregation service
//! ├── gallery.rs      - Gallery controller
//! ├── board/          - Board model
//! ├── local_cache/    - Local persistence
//! ├── export/         - Export pipeline
//! ├── state.rs        - egui application state
//! ├── views.rs        - egui panels
//! └── theme.rs        - Colours
//! ```

pub mod aggregation;
pub mod api;
pub mod board;
pub mod config;
pub mod export;
pub mod gallery;
pub mod local_cache;
pub mod reporter;
pub mod retry;
pub mod state;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use aggregation::{AggregationService, AggregationState, GalleryEvent};
pub use api::{ApiError, GalleryApiClient, ImageStoreApi, MailApi};
pub use board::{BaseParameters, Board, BoardDocument, SvgNode};
pub use config::Config;
pub use export::{ExportFormat, ExportOutcome, ExportPipeline, ExportRequest, Filter};
pub use gallery::{DeleteOutcome, GalleryController};
pub use local_cache::{LoadOutcome, LocalPersistence};
pub use reporter::{ErrorReporter, PendingErrors};
pub use state::GalleryAppState;
