/**
 * Image Store Routes
 *
 * Routes nested under the `/images` base path:
 *
 * - `GET /get/tags` - distinct tags
 * - `GET /get/tag=` - every record
 * - `GET /get/tag={tag}` - records carrying a tag (envelope)
 * - `GET /get/id={id}` - one record
 * - `GET /get/id={id}/svg` - raw inline SVG
 * - `POST /update` - create or update
 * - `DELETE /id={id}` - delete
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::images::handlers::{delete_image, get_image_svg, get_images, update_image};
use crate::backend::server::state::AppState;

/// Configure the image store routes (mounted by the caller under `/images`)
pub fn configure_image_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/get/{selector}", get(get_images))
        .route("/get/{selector}/svg", get(get_image_svg))
        .route("/update", post(update_image))
        .route("/{selector}", delete(delete_image))
}
