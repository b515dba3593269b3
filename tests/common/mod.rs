//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Image record and board fixtures
//! - A scripted in-process image store API
//! - A counting mail relay for the backend

pub mod fixtures;
pub mod mock_api;
#[cfg(feature = "ssr")]
pub mod mock_relay;

// Re-export commonly used utilities
pub use fixtures::*;
pub use mock_api::*;
#[cfg(feature = "ssr")]
pub use mock_relay::*;
