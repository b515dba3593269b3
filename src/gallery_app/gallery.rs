//! Gallery controller: tag selection, image selection and the
//! import/delete/save workflows, driven through the aggregation service.
//!
//! Methods that talk to the server return `'static` futures so the UI can
//! hand them to the runtime; any state flags are set before they return.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::gallery_app::aggregation::AggregationService;
use crate::gallery_app::board::Board;
use crate::gallery_app::export::{board_from_record, record_from_board};
use crate::shared::{ImageRecord, SharedError};

/// Result of [`GalleryController::delete_selected`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

pub struct GalleryController {
    service: AggregationService,
    tags: Vec<String>,
    selected: Vec<String>,
}

impl GalleryController {
    pub fn new(service: AggregationService) -> Self {
        Self {
            service,
            tags: Vec::new(),
            selected: Vec::new(),
        }
    }

    pub fn service(&self) -> &AggregationService {
        &self.service
    }

    /// Selected tags, lowercased, in insertion order
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: &str) -> BoxFuture<'static, ()> {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self.refresh()
    }

    pub fn remove_tag(&mut self, tag: &str) -> BoxFuture<'static, ()> {
        let tag = tag.trim().to_lowercase();
        self.tags.retain(|t| *t != tag);
        self.refresh()
    }

    pub fn set_tags(&mut self, tags: &[String]) -> BoxFuture<'static, ()> {
        self.tags.clear();
        for tag in tags {
            let tag = tag.trim().to_lowercase();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self.refresh()
    }

    pub fn clear_tags(&mut self) -> BoxFuture<'static, ()> {
        self.tags.clear();
        self.refresh()
    }

    /// Re-run the query for the current tags
    pub fn refresh(&self) -> BoxFuture<'static, ()> {
        self.service.fetch_by_tags(&self.tags)
    }

    pub fn toggle_selection(&mut self, id: &str) {
        match self.selected.iter().position(|s| s == id) {
            Some(index) => {
                self.selected.remove(index);
            }
            None => self.selected.push(id.to_string()),
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in selection order
    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    /// Selected records present in the current image list, in gallery order
    pub fn selected_images(&self) -> Vec<ImageRecord> {
        self.service
            .snapshot()
            .images
            .into_iter()
            .filter(|record| self.is_selected(&record.id))
            .collect()
    }

    /// Load the first selected record and open it as a board.
    pub fn import_selected(&self) -> BoxFuture<'static, Option<Board>> {
        let service = self.service.clone();
        let first = self.selected.first().cloned();
        async move {
            let id = first?;
            let record = service.load_image(&id).await?;
            match board_from_record(&record) {
                Ok(board) => {
                    tracing::info!("[Gallery] Imported '{}'", record.title);
                    Some(board)
                }
                Err(e) => {
                    tracing::warn!("[Gallery] Record {} has no usable board: {}", id, e);
                    None
                }
            }
        }
        .boxed()
    }

    /// Delete every selected record in order, then refresh.
    ///
    /// The selection is left untouched; hand the outcome to
    /// [`settle_deletion`](Self::settle_deletion) once it resolves.
    pub fn delete_selected(&self) -> BoxFuture<'static, DeleteOutcome> {
        let service = self.service.clone();
        let tags = self.tags.clone();
        let ids = self.selected.clone();
        async move {
            let mut outcome = DeleteOutcome::default();
            for id in ids {
                if service.delete_image(&id).await {
                    outcome.deleted.push(id);
                } else {
                    outcome.failed.push(id);
                }
            }
            service.fetch_by_tags(&tags).await;
            outcome
        }
        .boxed()
    }

    /// Drop deleted ids from the selection; ids whose delete failed stay
    /// selected.
    pub fn settle_deletion(&mut self, outcome: &DeleteOutcome) {
        self.selected.retain(|id| !outcome.deleted.contains(id));
    }

    /// Save `board` as a new record, or over `id` when given.
    pub fn save_board(
        &self,
        board: &Board,
        title: &str,
        tags: Vec<String>,
        id: Option<String>,
    ) -> Result<BoxFuture<'static, Option<ImageRecord>>, SharedError> {
        let mut record = record_from_board(board, title, tags)?;
        record.validate()?;
        if let Some(id) = id {
            record.id = id;
        }

        let service = self.service.clone();
        Ok(async move {
            let saved = service.update_image(record).await;
            if saved.is_some() {
                service.fetch_distinct_tags().await;
            }
            saved
        }
        .boxed())
    }
}
