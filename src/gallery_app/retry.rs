//! # Retry Logic
//!
//! Count-bounded retry for image store requests. A request is attempted once
//! and then retried up to `max_retries` times with no delay in between.
//! Requests the server rejected as invalid (`ApiError::Rejected`) are never
//! retried.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo(api: &dyn sketchboard::gallery_app::api::ImageStoreApi) {
//! use sketchboard::gallery_app::retry::RetryPolicy;
//!
//! let policy = RetryPolicy::default();
//! let tags = policy.run("distinct tags", || api.distinct_tags()).await;
//! # }
//! ```

use std::future::Future;

use crate::gallery_app::api::ApiError;

/// Retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Retry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retry attempts after the first one
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Total number of attempts, first one included
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent. The last error is returned.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => {
                    tracing::debug!("[Retry] {} not retried: {}", label, e);
                    return Err(e);
                }
                Err(e) if attempt >= self.attempts() => {
                    tracing::warn!("[Retry] {} failed after {} attempts: {}", label, attempt, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        "[Retry] {} attempt {}/{} failed: {}",
                        label,
                        attempt,
                        self.attempts(),
                        e
                    );
                    attempt += 1;
                }
            }
        }
    }
}
