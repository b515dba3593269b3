/**
 * Export-by-Email Payload
 *
 * `EmailableImage` is the body of `POST /email`. The server validates the
 * mime type and destination before decoding the data URL and handing the
 * bytes to the mail relay.
 */
use std::sync::LazyLock;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Mime types accepted for export.
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/svg+xml"];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmailableImage {
    pub data_url: String,
    pub mime_type: String,
    pub filename: String,
    pub destination: String,
}

impl EmailableImage {
    /// Check the mime type and destination address.
    ///
    /// # Errors
    ///
    /// `SharedError::ValidationError` on the first field that fails.
    pub fn validate(&self) -> Result<(), SharedError> {
        if !ALLOWED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(SharedError::validation(
                "mimeType",
                format!("Unsupported mime type '{}'", self.mime_type),
            ));
        }
        if !is_valid_email(&self.destination) {
            return Err(SharedError::validation(
                "destination",
                format!("Invalid email address '{}'", self.destination),
            ));
        }
        Ok(())
    }

    /// Decode the data URL into raw bytes.
    pub fn decode_payload(&self) -> Result<Vec<u8>, SharedError> {
        decode_data_url(&self.data_url)
    }
}

pub fn is_valid_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

/// Build a base64 `data:` URL.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Decode a `data:` URL. Base64 payloads are decoded, anything else is taken
/// as literal UTF-8 text.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, SharedError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| SharedError::validation("dataUrl", "Not a data URL"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SharedError::validation("dataUrl", "Missing data URL payload"))?;

    if header.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| SharedError::serialization(format!("Invalid base64 payload: {}", e)))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(mime_type: &str, destination: &str) -> EmailableImage {
        EmailableImage {
            data_url: encode_data_url(mime_type, b"pixels"),
            mime_type: mime_type.to_string(),
            filename: "drawing".to_string(),
            destination: destination.to_string(),
        }
    }

    #[test]
    fn test_accepts_supported_mime_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(payload(mime, "artist@example.com").validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_text_plain() {
        let err = payload("text/plain", "artist@example.com").validate().unwrap_err();
        assert!(err.to_string().contains("mimeType"));
    }

    #[test]
    fn test_rejects_bad_destination() {
        for address in ["", "artist", "artist@", "@example.com", "a b@example.com"] {
            assert!(payload("image/png", address).validate().is_err(), "{}", address);
        }
    }

    #[test]
    fn test_decode_base64_and_plain_payloads() {
        assert_eq!(payload("image/png", "a@b.io").decode_payload().unwrap(), b"pixels");
        assert_eq!(
            decode_data_url("data:image/svg+xml,<svg/>").unwrap(),
            b"<svg/>".to_vec()
        );
        assert!(decode_data_url("http://example.com").is_err());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let value = serde_json::to_value(payload("image/png", "a@b.io")).unwrap();
        assert!(value.get("dataUrl").is_some());
        assert!(value.get("mimeType").is_some());
    }
}
