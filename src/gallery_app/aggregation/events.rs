use crate::shared::ImageRecord;

/// Broadcast channel capacity; lagging subscribers skip older events
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Notifications published by the aggregation service
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    /// A fetch finished; carries the new image list
    Completed(Vec<ImageRecord>),
    /// A fetch failed; carries the image list as it stood
    Error(Vec<ImageRecord>),
    /// A save returned a record
    Saved(ImageRecord),
    /// The tag vocabulary was refreshed
    TagsUpdated(Vec<String>),
}

impl GalleryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Completed(_) => "completed",
            Self::Error(_) => "error",
            Self::Saved(_) => "saved",
            Self::TagsUpdated(_) => "tags_updated",
        }
    }
}
