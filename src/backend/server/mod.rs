//! Server Module
//!
//! This module contains all server-side code for initializing and configuring
//! the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Configuration loading (database, mail relay, port)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: database pool and mail relay settings
//! 2. **State Creation**: image store and relay handles
//! 3. **Router Creation**: routes and middleware
//!
//! # Example
//!
//! ```rust,no_run
//! use sketchboard::backend::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use state::AppState;
pub use init::{create_app, create_app_with};
