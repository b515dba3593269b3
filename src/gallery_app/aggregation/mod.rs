//! # Image Aggregation Service
//!
//! Resolves a list of requested tags into one merged, de-duplicated image
//! list and keeps the gallery's [`AggregationState`] current.
//!
//! ## Tag resolution
//!
//! - An empty tag list issues a single list-all request; its result replaces
//!   the image list as-is.
//! - Otherwise one request per tag is issued, strictly in order. The first
//!   tag's result starts the accumulator and later results are appended.
//!   After the last tag the accumulator is de-duplicated by id (first wins).
//! - Each request gets [`RetryPolicy`] attempts. A request that still fails
//!   aborts the chain, publishes [`GalleryEvent::Error`] with the current
//!   images and reports a user-visible error.
//!
//! A newer `fetch_by_tags` supersedes any chain still in flight: the older
//! chain stops at its next request or write and publishes nothing.
//!
//! ## Notifications
//!
//! Events are published on a `tokio::sync::broadcast` channel; every live
//! [`subscribe`](AggregationService::subscribe) receiver sees every event.

pub mod dedup;
pub mod events;
pub mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio::sync::broadcast;

use crate::gallery_app::api::ImageStoreApi;
use crate::gallery_app::reporter::{
    ErrorReporter, DELETE_ERROR_MESSAGE, ERROR_DIALOG_WIDTH, FETCH_ERROR_MESSAGE,
    LOAD_ERROR_MESSAGE, UPDATE_ERROR_MESSAGE,
};
use crate::gallery_app::retry::RetryPolicy;
use crate::shared::image::normalize_tags;
use crate::shared::ImageRecord;

pub use dedup::dedup_by_id;
pub use events::{GalleryEvent, EVENT_CHANNEL_CAPACITY};
pub use state::{AggregationState, GalleryStatus};

/// Shared aggregation context handed to the gallery controller and the UI.
#[derive(Clone)]
pub struct AggregationService {
    api: Arc<dyn ImageStoreApi>,
    reporter: Arc<dyn ErrorReporter>,
    retry: RetryPolicy,
    state: Arc<RwLock<AggregationState>>,
    events: broadcast::Sender<GalleryEvent>,
    generation: Arc<AtomicU64>,
}

impl AggregationService {
    pub fn new(api: Arc<dyn ImageStoreApi>, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self::with_retry(api, reporter, RetryPolicy::default())
    }

    pub fn with_retry(
        api: Arc<dyn ImageStoreApi>,
        reporter: Arc<dyn ErrorReporter>,
        retry: RetryPolicy,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            reporter,
            retry,
            state: Arc::new(RwLock::new(AggregationState::default())),
            events,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Initial load: every image, then the tag vocabulary.
    pub async fn initialize(&self) {
        tracing::info!("[Aggregation] Initial gallery load");
        self.fetch_by_tags(&[]).await;
        self.fetch_distinct_tags().await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GalleryEvent> {
        self.events.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> AggregationState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Resolve `tags` into the gallery image list.
    ///
    /// The loading flags are set before this returns; the request chain runs
    /// when the returned future is polled.
    pub fn fetch_by_tags(&self, tags: &[String]) -> BoxFuture<'static, ()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update_state(|state| {
            state.is_loading = true;
            state.server_reachable = false;
        });

        let service = self.clone();
        let tags = normalize_tags(tags);
        async move {
            if tags.is_empty() {
                service.fetch_all(generation).await;
            } else {
                service.fetch_tag_chain(generation, tags).await;
            }
        }
        .boxed()
    }

    async fn fetch_all(&self, generation: u64) {
        let api = &self.api;
        match self.retry.run("list all images", || api.list_all()).await {
            Ok(images) => self.complete_fetch(generation, images),
            Err(e) => {
                tracing::error!("[Aggregation] Listing images failed: {}", e);
                self.fail_fetch(generation);
            }
        }
    }

    async fn fetch_tag_chain(&self, generation: u64, tags: Vec<String>) {
        let api = &self.api;
        let mut accumulated = Vec::new();

        for (index, tag) in tags.iter().enumerate() {
            if !self.is_current(generation) {
                tracing::debug!("[Aggregation] Tag chain superseded before '{}'", tag);
                return;
            }

            let label = format!("images tagged '{}'", tag);
            match self.retry.run(&label, || api.find_by_tag(tag)).await {
                Ok(records) if index == 0 => accumulated = records,
                Ok(records) => accumulated.extend(records),
                Err(e) => {
                    tracing::error!("[Aggregation] Fetching tag '{}' failed: {}", tag, e);
                    self.fail_fetch(generation);
                    return;
                }
            }
        }

        self.complete_fetch(generation, dedup_by_id(accumulated));
    }

    fn complete_fetch(&self, generation: u64, images: Vec<ImageRecord>) {
        if !self.is_current(generation) {
            tracing::debug!("[Aggregation] Dropping superseded result");
            return;
        }
        tracing::debug!("[Aggregation] Loaded {} images", images.len());
        self.update_state(|state| {
            state.images = images.clone();
            state.is_loading = false;
            state.server_reachable = true;
        });
        self.publish(GalleryEvent::Completed(images));
    }

    fn fail_fetch(&self, generation: u64) {
        if !self.is_current(generation) {
            return;
        }
        let mut current = Vec::new();
        self.update_state(|state| {
            state.is_loading = false;
            current = state.images.clone();
        });
        self.publish(GalleryEvent::Error(current));
        self.reporter.report(ERROR_DIALOG_WIDTH, FETCH_ERROR_MESSAGE);
    }

    /// Refresh the tag vocabulary. Failures are only logged.
    pub async fn fetch_distinct_tags(&self) {
        let api = &self.api;
        match self.retry.run("distinct tags", || api.distinct_tags()).await {
            Ok(tags) => {
                self.update_state(|state| {
                    state.tags = tags.clone();
                    state.server_reachable = true;
                });
                self.publish(GalleryEvent::TagsUpdated(tags));
            }
            Err(e) => tracing::warn!("[Aggregation] Tag vocabulary unavailable: {}", e),
        }
    }

    /// Create or update `record`. Returns the saved record when the server
    /// sent one back.
    pub async fn update_image(&self, mut record: ImageRecord) -> Option<ImageRecord> {
        record.normalize_tags();
        self.begin_mutation();

        let api = &self.api;
        let label = format!("save '{}'", record.title);
        match self.retry.run(&label, || api.upsert(record.clone())).await {
            Ok(saved) => {
                self.update_state(|state| {
                    if let Some(saved) = &saved {
                        state.loaded = Some(saved.clone());
                    }
                    state.is_mutating = false;
                    state.server_reachable = true;
                });
                if let Some(saved) = &saved {
                    tracing::info!("[Aggregation] Saved image {}", saved.id);
                    self.publish(GalleryEvent::Saved(saved.clone()));
                }
                saved
            }
            Err(e) => {
                tracing::error!("[Aggregation] Saving '{}' failed: {}", record.title, e);
                self.update_state(|state| state.is_mutating = false);
                self.reporter.report(ERROR_DIALOG_WIDTH, UPDATE_ERROR_MESSAGE);
                None
            }
        }
    }

    /// Delete the record with `id`; `true` on success.
    pub async fn delete_image(&self, id: &str) -> bool {
        self.begin_mutation();

        let api = &self.api;
        match self.retry.run("delete image", || api.delete(id)).await {
            Ok(()) => {
                tracing::info!("[Aggregation] Deleted image {}", id);
                self.update_state(|state| {
                    state.is_mutating = false;
                    state.server_reachable = true;
                });
                true
            }
            Err(e) => {
                tracing::error!("[Aggregation] Deleting {} failed: {}", id, e);
                self.update_state(|state| state.is_mutating = false);
                self.reporter.report(ERROR_DIALOG_WIDTH, DELETE_ERROR_MESSAGE);
                false
            }
        }
    }

    /// Fetch a single record for import.
    pub async fn load_image(&self, id: &str) -> Option<ImageRecord> {
        let api = &self.api;
        match self.retry.run("load image", || api.find_by_id(id)).await {
            Ok(record) => {
                self.update_state(|state| {
                    state.loaded = Some(record.clone());
                    state.server_reachable = true;
                });
                Some(record)
            }
            Err(e) => {
                tracing::error!("[Aggregation] Loading {} failed: {}", id, e);
                self.reporter.report(ERROR_DIALOG_WIDTH, LOAD_ERROR_MESSAGE);
                None
            }
        }
    }

    fn begin_mutation(&self) {
        self.update_state(|state| {
            state.is_mutating = true;
            state.server_reachable = false;
        });
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn update_state(&self, f: impl FnOnce(&mut AggregationState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    fn publish(&self, event: GalleryEvent) {
        let name = event.name();
        if self.events.send(event).is_err() {
            tracing::debug!("[Aggregation] No subscribers for '{}' event", name);
        }
    }
}
