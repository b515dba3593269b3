use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::gallery_app::aggregation::{AggregationService, AggregationState, GalleryEvent};
use crate::gallery_app::api::GalleryApiClient;
use crate::gallery_app::board::{BaseParameters, Board, SvgNode};
use crate::gallery_app::config::Config;
use crate::gallery_app::export::{
    ExportFormat, ExportOutcome, ExportPipeline, ExportRequest, Filter, Rasterizer, ResvgRasterizer,
};
use crate::gallery_app::gallery::{DeleteOutcome, GalleryController};
use crate::gallery_app::local_cache::{LoadOutcome, LocalPersistence, SqliteKeyValueStore};
use crate::gallery_app::reporter::{ErrorDialog, ErrorReporter, PendingErrors};
use crate::shared::ImageRecord;

/// Results of background tasks, delivered to the UI thread
#[derive(Debug)]
pub enum UiMessage {
    Imported(Option<Board>),
    Saved(Option<ImageRecord>),
    Deleted(DeleteOutcome),
    Exported(Result<ExportOutcome, String>),
    CacheSaved(Result<(), String>),
    CacheLoaded(Result<(LoadOutcome, Board), String>),
}

/// Shapes the board panel can add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Stroke,
    Label,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Stroke,
        ShapeKind::Label,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rectangle => "▭ Rectangle",
            Self::Ellipse => "◯ Ellipse",
            Self::Stroke => "〰 Stroke",
            Self::Label => "T Text",
        }
    }
}

/// Central application state shared across egui views.
pub struct GalleryAppState {
    pub config: Config,
    runtime: Runtime,
    pub controller: GalleryController,
    pub board: Board,
    pipeline: Arc<ExportPipeline>,
    persistence: LocalPersistence,
    errors: PendingErrors,
    events: broadcast::Receiver<GalleryEvent>,
    messages_tx: Sender<UiMessage>,
    messages_rx: Receiver<UiMessage>,

    /// Error dialogs currently on screen
    pub open_errors: Vec<ErrorDialog>,
    pub status_line: Option<String>,

    pub tag_input: String,
    pub title_input: String,
    pub save_tags_input: String,
    /// Id of the record the board was imported from or saved as
    pub loaded_id: Option<String>,
    pub shape_color: [u8; 3],
    pub base_input: BaseParameters,

    pub export_filename: String,
    pub export_format: ExportFormat,
    pub export_filter: Filter,
    pub send_by_email: bool,
    pub email_input: String,

    preview: Option<(SvgNode, egui::TextureHandle)>,
}

impl GalleryAppState {
    pub fn new(config: Config) -> std::io::Result<Self> {
        let runtime = Runtime::new()?;
        let errors = PendingErrors::new();
        let reporter: Arc<dyn ErrorReporter> = Arc::new(errors.clone());
        let api = Arc::new(GalleryApiClient::new(config.clone()));

        let service = AggregationService::new(api.clone(), reporter.clone());
        let events = service.subscribe();
        let initial = service.clone();
        runtime.spawn(async move { initial.initialize().await });

        let pipeline = Arc::new(ExportPipeline::new(
            api,
            reporter,
            Arc::new(ResvgRasterizer),
            config.export_dir(),
        ));

        let persistence = match runtime.block_on(SqliteKeyValueStore::open_default()) {
            Ok(store) => LocalPersistence::new(Arc::new(store)),
            Err(e) => {
                tracing::warn!("[App] Local cache unavailable ({}), using memory", e);
                LocalPersistence::in_memory()
            }
        };

        let (messages_tx, messages_rx) = channel();
        let board = Board::default();

        Ok(Self {
            config,
            runtime,
            controller: GalleryController::new(service),
            base_input: board.base_parameters().clone(),
            board,
            pipeline,
            persistence,
            errors,
            events,
            messages_tx,
            messages_rx,
            open_errors: Vec::new(),
            status_line: None,
            tag_input: String::new(),
            title_input: String::new(),
            save_tags_input: String::new(),
            loaded_id: None,
            shape_color: [0x22, 0x22, 0x22],
            export_filename: "drawing".to_string(),
            export_format: ExportFormat::Png,
            export_filter: Filter::None,
            send_by_email: false,
            email_input: String::new(),
            preview: None,
        })
    }

    pub fn gallery(&self) -> AggregationState {
        self.controller.service().snapshot()
    }

    /// Drain background results, gallery events and reported errors.
    pub fn poll(&mut self) {
        while let Ok(message) = self.messages_rx.try_recv() {
            self.handle_message(message);
        }

        loop {
            match self.events.try_recv() {
                Ok(event) => self.handle_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("[App] Skipped {} gallery events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        self.open_errors.extend(self.errors.drain());
    }

    fn handle_message(&mut self, message: UiMessage) {
        match message {
            UiMessage::Imported(Some(board)) => {
                self.base_input = board.base_parameters().clone();
                self.board = board;
                if let Some(record) = self.controller.service().snapshot().loaded {
                    self.loaded_id = Some(record.id);
                    self.title_input = record.title;
                    self.save_tags_input = record.tags.join(", ");
                }
                self.status_line = Some("Drawing imported".into());
            }
            UiMessage::Imported(None) => {
                self.status_line = Some("Nothing imported".into());
            }
            UiMessage::Saved(Some(record)) => {
                self.status_line = Some(format!("Saved '{}'", record.title));
            }
            UiMessage::Saved(None) => {}
            UiMessage::Deleted(outcome) => {
                self.controller.settle_deletion(&outcome);
                self.status_line = Some(if outcome.failed.is_empty() {
                    format!("Deleted {} image(s)", outcome.deleted.len())
                } else {
                    format!(
                        "Deleted {} image(s), {} still selected",
                        outcome.deleted.len(),
                        outcome.failed.len()
                    )
                });
            }
            UiMessage::Exported(Ok(ExportOutcome::Skipped)) => {
                self.status_line = Some("Nothing to export".into());
            }
            UiMessage::Exported(Ok(ExportOutcome::Downloaded(path))) => {
                self.status_line = Some(format!("Exported to {}", path.display()));
            }
            UiMessage::Exported(Ok(ExportOutcome::Emailed { destination })) => {
                self.status_line = Some(format!("Sent to {}", destination));
            }
            UiMessage::Exported(Err(e)) | UiMessage::CacheSaved(Err(e)) | UiMessage::CacheLoaded(Err(e)) => {
                self.status_line = Some(e);
            }
            UiMessage::CacheSaved(Ok(())) => {
                self.status_line = Some("Saved locally".into());
            }
            UiMessage::CacheLoaded(Ok((LoadOutcome::Restored, board))) => {
                self.base_input = board.base_parameters().clone();
                self.board = board;
                self.status_line = Some("Restored local drawing".into());
            }
            UiMessage::CacheLoaded(Ok((LoadOutcome::NothingToLoad, _))) => {
                self.status_line = Some("No local drawing saved".into());
            }
        }
    }

    fn handle_event(&mut self, event: GalleryEvent) {
        tracing::debug!("[App] Gallery event '{}'", event.name());
        if let GalleryEvent::Saved(record) = event {
            self.loaded_id = Some(record.id);
        }
    }

    pub fn dismiss_error(&mut self, index: usize) {
        if index < self.open_errors.len() {
            self.open_errors.remove(index);
        }
    }

    pub fn add_tag(&mut self) {
        let tag = std::mem::take(&mut self.tag_input);
        let fetch = self.controller.add_tag(&tag);
        self.runtime.spawn(fetch);
    }

    pub fn remove_tag(&mut self, tag: &str) {
        let fetch = self.controller.remove_tag(tag);
        self.runtime.spawn(fetch);
    }

    pub fn clear_tags(&mut self) {
        let fetch = self.controller.clear_tags();
        self.runtime.spawn(fetch);
    }

    pub fn refresh(&mut self) {
        let fetch = self.controller.refresh();
        self.runtime.spawn(fetch);
    }

    pub fn import_selected(&mut self) {
        let import = self.controller.import_selected();
        let tx = self.messages_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(UiMessage::Imported(import.await));
        });
    }

    pub fn delete_selected(&mut self) {
        let delete = self.controller.delete_selected();
        let tx = self.messages_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(UiMessage::Deleted(delete.await));
        });
    }

    /// Save the board to the server, over the loaded record when there is one.
    pub fn save_board(&mut self, as_new: bool) {
        let tags = self
            .save_tags_input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        let id = if as_new { None } else { self.loaded_id.clone() };

        match self.controller.save_board(&self.board, &self.title_input, tags, id) {
            Ok(save) => {
                let tx = self.messages_tx.clone();
                self.runtime.spawn(async move {
                    let _ = tx.send(UiMessage::Saved(save.await));
                });
            }
            Err(e) => self.status_line = Some(e.to_string()),
        }
    }

    pub fn export(&mut self) {
        let mut request = ExportRequest::download(self.export_filename.clone(), self.export_format)
            .with_filter(self.export_filter);
        if self.send_by_email {
            request = request.with_email(self.email_input.trim());
        }

        let snapshot = self.board.snapshot();
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.messages_tx.clone();
        self.runtime.spawn(async move {
            let outcome = pipeline
                .export_drawing(&snapshot, &request)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::Exported(outcome));
        });
    }

    pub fn save_local(&mut self) {
        let board = self.board.clone();
        let persistence = self.persistence.clone();
        let tx = self.messages_tx.clone();
        self.runtime.spawn(async move {
            let result = persistence.save(&board).await.map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::CacheSaved(result));
        });
    }

    pub fn load_local(&mut self) {
        let mut board = self.board.clone();
        let persistence = self.persistence.clone();
        let tx = self.messages_tx.clone();
        self.runtime.spawn(async move {
            let result = persistence
                .load(&mut board)
                .await
                .map(|outcome| (outcome, board))
                .map_err(|e| e.to_string());
            let _ = tx.send(UiMessage::CacheLoaded(result));
        });
    }

    pub fn add_shape(&mut self, kind: ShapeKind) {
        let base = self.board.base_parameters();
        let n = self.board.components().len() as f32;
        let (w, h) = (base.width as f32, base.height as f32);
        let x = (40.0 + n * 30.0) % (w - 80.0).max(1.0);
        let y = (40.0 + n * 20.0) % (h - 80.0).max(1.0);
        let color = hex_color(self.shape_color);

        let node = match kind {
            ShapeKind::Rectangle => SvgNode::rect(x, y, 80.0, 50.0, &color),
            ShapeKind::Ellipse => SvgNode::ellipse(x + 40.0, y + 30.0, 40.0, 30.0, &color),
            ShapeKind::Stroke => {
                SvgNode::stroke(&[(x, y), (x + 30.0, y + 40.0), (x + 70.0, y + 10.0)], &color, 4.0)
            }
            ShapeKind::Label => SvgNode::text_label(x, y + 20.0, 24.0, &color, "Sketch"),
        };
        self.board.add_component(node);
    }

    pub fn apply_base_parameters(&mut self) {
        if &self.base_input != self.board.base_parameters() {
            self.board.set_base_parameters(self.base_input.clone());
        }
    }

    /// Rasterized board preview, re-rendered only when the board changed.
    pub fn preview_texture(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        let snapshot = self.board.snapshot();
        let stale = self
            .preview
            .as_ref()
            .is_none_or(|(cached, _)| *cached != snapshot);

        if stale {
            let base = self.board.base_parameters();
            match ResvgRasterizer.rasterize(&snapshot, base.width, base.height) {
                Ok(canvas) => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [canvas.width as usize, canvas.height as usize],
                        &canvas.rgba,
                    );
                    let texture = ctx.load_texture("board-preview", image, egui::TextureOptions::LINEAR);
                    self.preview = Some((snapshot, texture));
                }
                Err(e) => {
                    tracing::warn!("[App] Preview failed: {}", e);
                    self.preview = None;
                }
            }
        }

        self.preview.as_ref().map(|(_, texture)| texture)
    }
}

pub fn hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
