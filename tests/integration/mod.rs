//! Integration tests
//!
//! - `backend` - HTTP routes through axum-test (requires `ssr`)
//! - `client` - aggregation, gallery controller and local cache

#[cfg(feature = "ssr")]
pub mod backend;
pub mod client;
