//! `POST /email` handler.
//!
//! Validation happens before the relay is touched: a bad mime type or
//! destination answers `406` and nothing is sent.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::mail::relay::{attachment_name, OutgoingMail, SharedMailRelay};
use crate::shared::{EmailableImage, Envelope};

/// Forward an exported drawing to the mail relay
pub async fn send_email(
    State(relay): State<Option<SharedMailRelay>>,
    body: Result<Json<EmailableImage>, JsonRejection>,
) -> Result<Json<Envelope<String>>, BackendError> {
    let Json(payload) = body?;
    payload.validate()?;
    let content = payload.decode_payload()?;

    let relay = relay.ok_or(BackendError::RelayUnavailable)?;

    let filename = attachment_name(&payload.filename, &payload.mime_type);
    relay
        .send(OutgoingMail {
            destination: payload.destination.clone(),
            filename: filename.clone(),
            mime_type: payload.mime_type.clone(),
            content,
        })
        .await?;

    Ok(Json(Envelope::success("SENT", vec![filename])))
}
