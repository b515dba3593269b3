//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the backend and the gallery client. These types describe the REST wire
//! format of the image store and the export-by-email route.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. All types are designed for serialization
//! and transmission over HTTP.

/// Image record data structure
pub mod image;

/// Collection/error response envelope
pub mod envelope;

/// Export-by-email payload
pub mod email;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use image::{ImageRecord, UNDEFINED_ID};
pub use envelope::Envelope;
pub use email::EmailableImage;
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
