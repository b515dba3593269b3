//! Response envelope used by the image store and mail routes.
//!
//! Collections come back as `{ "title": ..., "body": [...] }`; failures use the
//! same shape with a title starting with `ERROR` and an empty body.

use serde::{Deserialize, Serialize};

/// Title prefix carried by every failure envelope.
pub const ERROR_TITLE: &str = "ERROR";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub title: String,
    pub body: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn success(title: impl Into<String>, body: Vec<T>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }

    /// Failure envelope; an empty reason yields the bare `ERROR` title.
    pub fn error(reason: impl AsRef<str>) -> Self {
        let reason = reason.as_ref();
        let title = if reason.is_empty() {
            ERROR_TITLE.to_string()
        } else {
            format!("{}: {}", ERROR_TITLE, reason)
        };
        Self {
            title,
            body: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.title.starts_with(ERROR_TITLE)
    }
}
