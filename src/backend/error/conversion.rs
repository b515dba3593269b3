/**
 * Error Conversion
 *
 * This module provides the `IntoResponse` implementation for backend errors.
 *
 * # Response Format
 *
 * Error responses use the same envelope as successful collection responses,
 * with an `ERROR` title and an empty body:
 * ```json
 * {
 *   "title": "ERROR: Image '42' not found",
 *   "body": []
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::error::types::BackendError;
use crate::shared::Envelope;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, message);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, message);
        }

        let envelope: Envelope<serde_json::Value> = Envelope::error(message);
        (status, Json(envelope)).into_response()
    }
}
