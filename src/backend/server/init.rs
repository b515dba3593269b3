/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, mail relay loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the PostgreSQL pool (falls back to an in-memory store)
 * 2. Load the mail relay settings (relay disabled when absent)
 * 3. Create the app state and the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::images::store::{MemoryImageStore, SharedImageStore};
use crate::backend::images::PgImageStore;
use crate::backend::mail::relay::{HttpMailRelay, SharedMailRelay};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_mail_relay};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application from the environment
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: images are kept in memory for this process
/// - Migration failures: logged but don't prevent startup
/// - Missing mail relay: `/email` answers 503
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing sketchboard backend server");

    let image_store: SharedImageStore = match load_database().await {
        Some(pool) => Arc::new(PgImageStore::new(pool)),
        None => Arc::new(MemoryImageStore::new()),
    };

    let mail_relay = load_mail_relay()
        .map(|config| Arc::new(HttpMailRelay::new(config)) as SharedMailRelay);

    create_app_with(image_store, mail_relay)
}

/// Build the router around explicit collaborators.
pub fn create_app_with(
    image_store: SharedImageStore,
    mail_relay: Option<SharedMailRelay>,
) -> Router<()> {
    let app_state = AppState::new(image_store, mail_relay);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
