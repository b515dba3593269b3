use crate::shared::ImageRecord;

/// Aggregated gallery state owned by the aggregation service.
///
/// Readers only ever see clones taken through
/// [`AggregationService::snapshot`](super::AggregationService::snapshot).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationState {
    /// Current image list; unique by id when produced by a tag query
    pub images: Vec<ImageRecord>,
    /// Known tag vocabulary
    pub tags: Vec<String>,
    /// Record most recently loaded or saved
    pub loaded: Option<ImageRecord>,
    pub is_loading: bool,
    pub is_mutating: bool,
    pub server_reachable: bool,
}

/// Coarse status shown in the gallery status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStatus {
    Loading,
    Saving,
    Online,
    Offline,
}

impl AggregationState {
    pub fn status(&self) -> GalleryStatus {
        if self.is_loading {
            GalleryStatus::Loading
        } else if self.is_mutating {
            GalleryStatus::Saving
        } else if self.server_reachable {
            GalleryStatus::Online
        } else {
            GalleryStatus::Offline
        }
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.is_mutating
    }
}
