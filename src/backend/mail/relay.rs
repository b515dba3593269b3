/**
 * Mail Relay Client
 *
 * Exports sent by email are forwarded to a third-party HTTP mail gateway.
 * The gateway receives one JSON message per export with the artifact
 * attached as base64.
 *
 * The `MailRelay` trait is the seam the `/email` handler talks to; the
 * HTTP implementation is configured from the environment at startup.
 */
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Serialize;
use thiserror::Error;

use crate::backend::server::config::MailRelayConfig;

/// Subject line used for every exported drawing
pub const EXPORT_SUBJECT: &str = "Your sketchboard drawing";

/// One outgoing message with a single attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub destination: String,
    pub filename: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Mail relay errors
#[derive(Debug, Error)]
pub enum RelayError {
    /// The gateway could not be reached
    #[error("mail gateway unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success status
    #[error("mail gateway rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Third-party mail gateway
pub trait MailRelay: Send + Sync {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), RelayError>>;
}

/// Relay handle shared across handlers
pub type SharedMailRelay = Arc<dyn MailRelay>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GatewayAttachment<'a> {
    filename: &'a str,
    content_type: &'a str,
    content: String,
}

#[derive(Serialize)]
struct GatewayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
    attachments: Vec<GatewayAttachment<'a>>,
}

/// `MailRelay` that posts JSON to an HTTP gateway
#[derive(Debug, Clone)]
pub struct HttpMailRelay {
    client: reqwest::Client,
    config: MailRelayConfig,
}

impl HttpMailRelay {
    pub fn new(config: MailRelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl MailRelay for HttpMailRelay {
    fn send(&self, mail: OutgoingMail) -> BoxFuture<'_, Result<(), RelayError>> {
        async move {
            let message = GatewayMessage {
                from: &self.config.from,
                to: &mail.destination,
                subject: EXPORT_SUBJECT,
                text: format!("Attached: {}", mail.filename),
                attachments: vec![GatewayAttachment {
                    filename: &mail.filename,
                    content_type: &mail.mime_type,
                    content: STANDARD.encode(&mail.content),
                }],
            };

            tracing::debug!(
                "[Mail] Relaying {} ({} bytes) to {}",
                mail.filename,
                mail.content.len(),
                mail.destination
            );

            let mut request = self.client.post(&self.config.url).json(&message);
            if let Some(api_key) = &self.config.api_key {
                request = request.bearer_auth(api_key);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(RelayError::Rejected { status, body });
            }

            tracing::info!("[Mail] Relayed {} to {}", mail.filename, mail.destination);
            Ok(())
        }
        .boxed()
    }
}

/// Attachment name with an extension matching the mime type.
pub fn attachment_name(filename: &str, mime_type: &str) -> String {
    let extension = match mime_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/svg+xml" => "svg",
        _ => return filename.to_string(),
    };
    let stem = if filename.trim().is_empty() { "drawing" } else { filename };
    if stem.to_lowercase().ends_with(&format!(".{}", extension)) {
        stem.to_string()
    } else {
        format!("{}.{}", stem, extension)
    }
}
