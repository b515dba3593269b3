/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The image store (PostgreSQL or in-memory)
 * - The optional mail relay
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;

use crate::backend::images::store::SharedImageStore;
use crate::backend::mail::relay::SharedMailRelay;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Image store backing the `/images` routes
    pub image_store: SharedImageStore,

    /// Mail relay for `/email`
    ///
    /// This is `None` when `MAIL_RELAY_URL` is not configured; the email
    /// route then answers `503 Service Unavailable`.
    pub mail_relay: Option<SharedMailRelay>,
}

impl AppState {
    pub fn new(image_store: SharedImageStore, mail_relay: Option<SharedMailRelay>) -> Self {
        Self {
            image_store,
            mail_relay,
        }
    }
}

impl FromRef<AppState> for SharedImageStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.image_store.clone()
    }
}

impl FromRef<AppState> for Option<SharedMailRelay> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mail_relay.clone()
    }
}
