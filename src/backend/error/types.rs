/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors occur when processing HTTP requests:
 * - Unknown path selectors
 * - Records that do not exist
 *
 * ## Validation Errors
 *
 * Validation errors are raised before any persistence or relay attempt and
 * answer with `406 Not Acceptable`:
 * - Blank titles or tags on update
 * - Unsupported mime types or bad destinations on email
 *
 * ## Upstream Errors
 *
 * - Store failures (database unavailable, corrupt rows)
 * - Mail relay failures or a relay that was never configured
 */

use thiserror::Error;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use crate::backend::images::store::StoreError;
use crate::backend::mail::relay::RelayError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// This enum represents all possible errors that can occur in the backend.
/// Each variant can be converted to an HTTP response carrying the error envelope.
///
/// # Usage
///
/// ```rust
/// use sketchboard::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Unknown selector");
/// let err = BackendError::not_found("1234");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., malformed path selector)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Image store failure
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Mail relay failure
    #[error("Relay error: {0}")]
    RelayError(#[from] RelayError),

    /// No mail relay configured on this server
    #[error("Mail relay is not configured")]
    RelayUnavailable,

    /// Shared error (validation, serialization, not found)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a not-found error for an image id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::SharedError(SharedError::not_found(id))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StoreError` - 500 Internal Server Error
    /// - `RelayError` - 502 Bad Gateway
    /// - `RelayUnavailable` - 503 Service Unavailable
    /// - `SharedError` - 406 for validation, 404 for not found, 400 for serialization
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RelayError(_) => StatusCode::BAD_GATEWAY,
            Self::RelayUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::NOT_ACCEPTABLE,
                SharedError::NotFound { .. } => StatusCode::NOT_FOUND,
                SharedError::SerializationError { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// Get the error message placed in the envelope title
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StoreError(err) => err.to_string(),
            Self::RelayError(err) => err.to_string(),
            Self::RelayUnavailable => self.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}

/// Unreadable request bodies answer like any other validation failure.
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::SharedError(SharedError::validation("body", rejection.body_text()))
    }
}
