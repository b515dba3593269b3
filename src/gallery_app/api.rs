//! Image Store API Client
//!
//! This module provides the async client the gallery uses to talk to the
//! backend: the image store routes under `/images` and the `/email` export
//! route.
//!
//! The aggregation service and the export pipeline depend on the
//! [`ImageStoreApi`] and [`MailApi`] traits rather than on reqwest directly,
//! so tests can substitute scripted stores.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::gallery_app::config::Config;
use crate::shared::config::IMAGES_BASE_PATH;
use crate::shared::{EmailableImage, Envelope, ImageRecord};

/// Client-side API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport or decoding failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Request failed: {status} - {message}")]
    Status { status: u16, message: String },

    /// The server refused the payload (406); retrying cannot help
    #[error("Request rejected: {message}")]
    Rejected { message: String },

    /// The configured server URL cannot carry path segments
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the same request may succeed on another attempt
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Rejected { .. } | Self::InvalidUrl(_))
    }
}

/// Image store operations used by the aggregation service
pub trait ImageStoreApi: Send + Sync {
    /// `GET /images/get/tag=`
    fn list_all(&self) -> BoxFuture<'_, Result<Vec<ImageRecord>, ApiError>>;

    /// `GET /images/get/tag={tag}`
    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, Result<Vec<ImageRecord>, ApiError>>;

    /// `GET /images/get/id={id}`
    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ImageRecord, ApiError>>;

    /// `GET /images/get/tags`
    fn distinct_tags(&self) -> BoxFuture<'_, Result<Vec<String>, ApiError>>;

    /// `POST /images/update`; the saved record, if the server returned one
    fn upsert(&self, record: ImageRecord) -> BoxFuture<'_, Result<Option<ImageRecord>, ApiError>>;

    /// `DELETE /images/id={id}`
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), ApiError>>;
}

/// Export-by-email operation used by the export pipeline
pub trait MailApi: Send + Sync {
    /// `POST /email`
    fn send_email(&self, payload: EmailableImage) -> BoxFuture<'_, Result<(), ApiError>>;
}

/// reqwest implementation of both client traits
#[derive(Debug, Clone)]
pub struct GalleryApiClient {
    config: Config,
    client: Client,
}

impl GalleryApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// URL for an image store route; the last segment is percent-encoded.
    fn images_endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(self.config.server_url())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.config.server_url(), e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.config.server_url().to_string()))?
            .pop_if_empty()
            .push(IMAGES_BASE_PATH.trim_start_matches('/'))
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!("[Api] GET {}", url);
        let response = self.client.get(url).send().await?;
        Ok(check_status(response).await?.json::<T>().await?)
    }
}

/// Map non-success statuses to `ApiError`.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_else(|_| status.to_string());
    let message = serde_json::from_str::<Envelope<serde_json::Value>>(&text)
        .map(|envelope| envelope.title)
        .unwrap_or(text);

    if status == StatusCode::NOT_ACCEPTABLE {
        Err(ApiError::Rejected { message })
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

impl ImageStoreApi for GalleryApiClient {
    fn list_all(&self) -> BoxFuture<'_, Result<Vec<ImageRecord>, ApiError>> {
        async move {
            let url = self.images_endpoint(&["get", "tag="])?;
            self.get_json::<Vec<ImageRecord>>(url).await
        }
        .boxed()
    }

    fn find_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, Result<Vec<ImageRecord>, ApiError>> {
        async move {
            let selector = format!("tag={}", tag);
            let url = self.images_endpoint(&["get", &selector])?;
            let envelope = self.get_json::<Envelope<ImageRecord>>(url).await?;
            Ok(envelope.body)
        }
        .boxed()
    }

    fn find_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ImageRecord, ApiError>> {
        async move {
            let selector = format!("id={}", id);
            let url = self.images_endpoint(&["get", &selector])?;
            self.get_json::<ImageRecord>(url).await
        }
        .boxed()
    }

    fn distinct_tags(&self) -> BoxFuture<'_, Result<Vec<String>, ApiError>> {
        async move {
            let url = self.images_endpoint(&["get", "tags"])?;
            self.get_json::<Vec<String>>(url).await
        }
        .boxed()
    }

    fn upsert(&self, record: ImageRecord) -> BoxFuture<'_, Result<Option<ImageRecord>, ApiError>> {
        async move {
            let url = self.images_endpoint(&["update"])?;
            tracing::debug!("[Api] POST {} ({})", url, record.id);
            let response = self.client.post(url).json(&record).send().await?;
            let envelope = check_status(response)
                .await?
                .json::<Envelope<ImageRecord>>()
                .await?;
            Ok(envelope.body.into_iter().next())
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), ApiError>> {
        async move {
            let selector = format!("id={}", id);
            let url = self.images_endpoint(&[&selector])?;
            tracing::debug!("[Api] DELETE {}", url);
            let response = self.client.delete(url).send().await?;
            check_status(response).await?;
            Ok(())
        }
        .boxed()
    }
}

impl MailApi for GalleryApiClient {
    fn send_email(&self, payload: EmailableImage) -> BoxFuture<'_, Result<(), ApiError>> {
        async move {
            let url = self.config.api_url("/email");
            tracing::debug!("[Api] POST {} ({})", url, payload.filename);
            let response = self.client.post(&url).json(&payload).send().await?;
            check_status(response).await?;
            Ok(())
        }
        .boxed()
    }
}
