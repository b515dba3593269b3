//! User-visible error reporting.
//!
//! Failed store operations surface as an error dialog of fixed width with a
//! fixed message per operation. The aggregation service and the export
//! pipeline only see the [`ErrorReporter`] trait; the egui app drains a
//! [`PendingErrors`] queue into its error window each frame.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Width of the error dialog, in points
pub const ERROR_DIALOG_WIDTH: f32 = 400.0;

pub const FETCH_ERROR_MESSAGE: &str = "Unable to retrieve images from the server.";
pub const LOAD_ERROR_MESSAGE: &str = "Unable to load the selected image.";
pub const UPDATE_ERROR_MESSAGE: &str = "Unable to save the drawing.";
pub const DELETE_ERROR_MESSAGE: &str = "Unable to delete the image.";
pub const EMAIL_ERROR_MESSAGE: &str = "Unable to send the drawing by e-mail.";

/// Collaborator that shows an error to the user
pub trait ErrorReporter: Send + Sync {
    fn report(&self, width: f32, message: &str);
}

/// A reported error waiting to be displayed
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDialog {
    pub width: f32,
    pub message: String,
}

/// Queue of reported errors shared between async tasks and the UI thread
#[derive(Debug, Clone, Default)]
pub struct PendingErrors {
    queue: Arc<Mutex<VecDeque<ErrorDialog>>>,
}

impl PendingErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending dialog, oldest first
    pub fn drain(&self) -> Vec<ErrorDialog> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for PendingErrors {
    fn report(&self, width: f32, message: &str) {
        tracing::error!("[Reporter] {}", message);
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(ErrorDialog {
                width,
                message: message.to_string(),
            });
    }
}
