//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation
//! └── image_routes.rs  - Image store routes (`/images/...`)
//! ```
//!
//! # Route Types
//!
//! ## Image Store
//!
//! - `GET /images/get/tags`
//! - `GET /images/get/tag={tag}` (empty tag lists everything)
//! - `GET /images/get/id={id}` and `GET /images/get/id={id}/svg`
//! - `POST /images/update`
//! - `DELETE /images/id={id}`
//!
//! ## Export
//!
//! - `POST /email` - Relay an exported drawing to the mail gateway

/// Main router creation
pub mod router;

/// Image store route table
pub mod image_routes;

// Re-export commonly used functions
pub use router::create_router;
