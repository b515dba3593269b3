//! Shared Error Types
//!
//! This module defines error types that are shared between the backend and the
//! gallery client. These errors represent failures that can occur on both sides
//! of the wire.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON or data URL encoding failures
//! - `ValidationError` - Record or email payload validation failures
//! - `NotFound` - Lookup of an image that does not exist
//!
//! # Usage
//!
//! ```rust
//! use sketchboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both backend and client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON or payload encoding error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Missing image record
    #[error("Image '{id}' not found")]
    NotFound {
        /// The id that was looked up
        id: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
