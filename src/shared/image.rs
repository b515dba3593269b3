/**
 * Image Record Data Structure
 *
 * This module defines the `ImageRecord` persisted by the image store and
 * exchanged between the backend and the gallery client.
 *
 * A record carries two encodings of the same drawing: the flattened inline
 * SVG used for display and the structured board serialization used to
 * re-open the drawing for editing.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Sentinel id carried by records that have never been saved.
pub const UNDEFINED_ID: &str = "undefined";

/// A persisted drawing with its metadata.
///
/// # Fields
/// * `id` - Store identifier, or [`UNDEFINED_ID`] for a new drawing
/// * `title` - Display title (non-empty after trim)
/// * `tags` - Lowercase labels used to filter the gallery
/// * `date` - Last save time
/// * `inline_svg` - Flattened SVG markup for display
/// * `serialized_board` - Board serialization for re-editing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(rename = "inlineSVG")]
    pub inline_svg: String,
    #[serde(rename = "serializedBoard")]
    pub serialized_board: String,
}

impl ImageRecord {
    /// Create an unsaved record stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        tags: Vec<String>,
        inline_svg: impl Into<String>,
        serialized_board: impl Into<String>,
    ) -> Self {
        Self {
            id: UNDEFINED_ID.to_string(),
            title: title.into(),
            tags: tags.iter().map(|tag| normalize_tag(tag)).collect(),
            date: Utc::now(),
            inline_svg: inline_svg.into(),
            serialized_board: serialized_board.into(),
        }
    }

    /// Whether this record has never been persisted.
    pub fn is_new(&self) -> bool {
        self.id == UNDEFINED_ID || self.id.is_empty()
    }

    /// Trim and lowercase every tag in place. Blank tags are kept so
    /// [`validate`](Self::validate) can reject them.
    pub fn normalize_tags(&mut self) {
        self.tags = self.tags.iter().map(|tag| normalize_tag(tag)).collect();
    }

    /// Check the record invariants enforced before persisting.
    ///
    /// # Errors
    ///
    /// Returns a `SharedError::ValidationError` naming the first offending field.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.title.trim().is_empty() {
            return Err(SharedError::validation("title", "Title cannot be empty"));
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(SharedError::validation("tags", "Tags cannot be blank"));
        }
        if self.serialized_board.is_empty() {
            return Err(SharedError::validation(
                "serializedBoard",
                "Board serialization cannot be empty",
            ));
        }
        Ok(())
    }
}

/// Canonical form of a single tag.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Canonical query tags: trimmed, lowercased, blanks dropped. Order and
/// duplicates are preserved.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect()
}
