/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Image store routes, nested under `/images`
 * 2. `POST /email`
 * 3. `GET /health`
 * 4. Fallback handler (404 envelope)
 *
 * Every route shares the CORS and request tracing layers.
 */

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::mail::handlers::send_email;
use crate::backend::routes::image_routes::configure_image_routes;
use crate::backend::server::state::AppState;
use crate::shared::config::IMAGES_BASE_PATH;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state holding the image store and mail relay
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let images = configure_image_routes(Router::new());

    Router::new()
        .nest(IMAGES_BASE_PATH, images)
        .route("/email", post(send_email))
        .route("/health", get(|| async { "ok" }))
        .fallback(|| async { BackendError::handler(StatusCode::NOT_FOUND, "Not Found") })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
