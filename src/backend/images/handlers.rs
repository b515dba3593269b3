//! Image Store HTTP Handlers
//!
//! Handlers for the routes nested under `/images`. Lookups are addressed by a
//! single path selector segment:
//!
//! - `get/tags` - distinct tags
//! - `get/tag=` - all records (bare array)
//! - `get/tag={tag}` - records carrying `tag`, wrapped in an envelope
//! - `get/id={id}` - one record
//! - `get/id={id}/svg` - the record's inline SVG
//! - `id={id}` (DELETE) - remove a record

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::BackendError;
use crate::backend::images::store::SharedImageStore;
use crate::shared::{Envelope, ImageRecord};

/// Raster href prefix some stored drawings carry
const BROKEN_PNG_PREFIX: &str = "data:img/png;base64,";
const PNG_PREFIX: &str = "data:image/png;base64,";

/// Parsed lookup selector
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Tags,
    Tag(String),
    Id(String),
}

impl Selector {
    fn parse(raw: &str) -> Result<Self, BackendError> {
        if raw == "tags" {
            Ok(Self::Tags)
        } else if let Some(tag) = raw.strip_prefix("tag=") {
            Ok(Self::Tag(tag.trim().to_lowercase()))
        } else if let Some(id) = raw.strip_prefix("id=") {
            Ok(Self::Id(id.to_string()))
        } else {
            Err(BackendError::handler(
                StatusCode::NOT_FOUND,
                format!("Unknown selector '{}'", raw),
            ))
        }
    }

    fn id(raw: &str) -> Result<String, BackendError> {
        match Self::parse(raw)? {
            Self::Id(id) => Ok(id),
            _ => Err(BackendError::handler(
                StatusCode::NOT_FOUND,
                format!("Expected an id selector, got '{}'", raw),
            )),
        }
    }
}

/// `GET /images/get/{selector}`
pub async fn get_images(
    State(store): State<SharedImageStore>,
    Path(selector): Path<String>,
) -> Result<Response, BackendError> {
    match Selector::parse(&selector)? {
        Selector::Tags => {
            let tags = store.distinct_tags().await?;
            tracing::debug!("[Images] {} distinct tags", tags.len());
            Ok(Json(tags).into_response())
        }
        Selector::Tag(tag) if tag.is_empty() => {
            let records = store.find_all().await?;
            tracing::debug!("[Images] Listing all {} images", records.len());
            Ok(Json(records).into_response())
        }
        Selector::Tag(tag) => {
            let records = store.find_by_tag(&tag).await?;
            tracing::debug!("[Images] {} images tagged '{}'", records.len(), tag);
            Ok(Json(Envelope::success(tag, records)).into_response())
        }
        Selector::Id(id) => {
            let record = find_record(&store, &id).await?;
            Ok(Json(record).into_response())
        }
    }
}

/// `GET /images/get/{selector}/svg`
pub async fn get_image_svg(
    State(store): State<SharedImageStore>,
    Path(selector): Path<String>,
) -> Result<Response, BackendError> {
    let id = Selector::id(&selector)?;
    let record = find_record(&store, &id).await?;
    let svg = repair_raster_hrefs(&record.inline_svg);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// `POST /images/update`
///
/// Creates the record when its id is the `undefined` sentinel, otherwise
/// updates it in place.
pub async fn update_image(
    State(store): State<SharedImageStore>,
    body: Result<Json<ImageRecord>, JsonRejection>,
) -> Result<Json<Envelope<ImageRecord>>, BackendError> {
    let Json(mut record) = body?;
    record.normalize_tags();
    record.validate()?;

    if record.is_new() {
        let created = store.create(record).await?;
        tracing::info!("[Images] Created '{}' ({})", created.title, created.id);
        return Ok(Json(Envelope::success("CREATED", vec![created])));
    }

    let id = record.id.clone();
    match store.update(record).await? {
        Some(updated) => {
            tracing::info!("[Images] Updated '{}' ({})", updated.title, updated.id);
            Ok(Json(Envelope::success("UPDATED", vec![updated])))
        }
        None => Err(BackendError::not_found(id)),
    }
}

/// `DELETE /images/{selector}`
pub async fn delete_image(
    State(store): State<SharedImageStore>,
    Path(selector): Path<String>,
) -> Result<Json<Envelope<String>>, BackendError> {
    let id = Selector::id(&selector)?;
    if !store.delete(&id).await? {
        return Err(BackendError::not_found(id));
    }

    tracing::info!("[Images] Deleted {}", id);
    Ok(Json(Envelope::success("DELETED", vec![id])))
}

async fn find_record(store: &SharedImageStore, id: &str) -> Result<ImageRecord, BackendError> {
    store
        .find_by_id(id)
        .await?
        .ok_or_else(|| BackendError::not_found(id))
}

fn repair_raster_hrefs(svg: &str) -> String {
    svg.replace(BROKEN_PNG_PREFIX, PNG_PREFIX)
}
