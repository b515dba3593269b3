//! # Import/Export Pipeline
//!
//! Turns a board snapshot into a downloadable or e-mailable artifact:
//!
//! 1. clone the snapshot and apply the selected [`Filter`] to the drawing
//!    layer (no drawing layer means nothing is exported);
//! 2. serialize to SVG, or rasterize through the [`CanvasCache`] and encode
//!    as PNG or JPEG;
//! 3. write the artifact to the export directory, or send it to the mail
//!    relay when a destination address is given.
//!
//! Record import/export helpers live in [`record`].

pub mod filter;
pub mod raster;
pub mod record;

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use thiserror::Error;

use crate::gallery_app::api::{ApiError, MailApi};
use crate::gallery_app::board::SvgNode;
use crate::gallery_app::reporter::{ErrorReporter, EMAIL_ERROR_MESSAGE, ERROR_DIALOG_WIDTH};
use crate::gallery_app::retry::RetryPolicy;
use crate::shared::email::encode_data_url;
use crate::shared::{EmailableImage, SharedError};

pub use filter::{apply_filter, filter_definitions, Filter, FilterOutcome};
pub use raster::{Canvas, CanvasCache, Rasterizer, ResvgRasterizer};
pub use record::{board_from_record, record_from_board};

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("SVG rendering failed: {0}")]
    Render(String),

    #[error("Cannot allocate a {width}x{height} canvas")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Root element has no width/height")]
    MissingDimensions,

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export request failed: {0}")]
    Api(#[from] ApiError),

    #[error(transparent)]
    Shared(#[from] SharedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Svg,
    /// Lossless raster
    Png,
    /// Lossy raster
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Svg, ExportFormat::Png, ExportFormat::Jpeg];

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Svg => "SVG",
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }
}

/// What to export and where
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub filename: String,
    pub format: ExportFormat,
    pub filter: Filter,
    /// Send to this address instead of writing locally
    pub email: Option<String>,
}

impl ExportRequest {
    pub fn download(filename: impl Into<String>, format: ExportFormat) -> Self {
        Self {
            filename: filename.into(),
            format,
            filter: Filter::None,
            email: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_email(mut self, destination: impl Into<String>) -> Self {
        self.email = Some(destination.into());
        self
    }
}

/// Encoded export payload
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Base64 `data:` URL of the payload
    pub fn data_url(&self) -> String {
        encode_data_url(self.mime_type, &self.bytes)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Nothing to export (no drawing layer)
    Skipped,
    Downloaded(PathBuf),
    Emailed { destination: String },
}

pub struct ExportPipeline {
    mail: Arc<dyn MailApi>,
    reporter: Arc<dyn ErrorReporter>,
    retry: RetryPolicy,
    cache: CanvasCache,
    export_dir: PathBuf,
}

impl ExportPipeline {
    pub fn new(
        mail: Arc<dyn MailApi>,
        reporter: Arc<dyn ErrorReporter>,
        rasterizer: Arc<dyn Rasterizer>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mail,
            reporter,
            retry: RetryPolicy::default(),
            cache: CanvasCache::new(rasterizer),
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Filter and encode `snapshot`. `None` when the snapshot has no drawing
    /// layer.
    pub fn prepare_artifact(
        &self,
        snapshot: &SvgNode,
        request: &ExportRequest,
    ) -> Result<Option<ExportArtifact>, ExportError> {
        let mut tree = snapshot.clone();
        if apply_filter(&mut tree, request.filter) == FilterOutcome::Skipped {
            return Ok(None);
        }

        let bytes = match request.format {
            ExportFormat::Svg => tree.to_markup().into_bytes(),
            ExportFormat::Png => encode_png(&*self.cache.canvas_for(&tree)?)?,
            ExportFormat::Jpeg => encode_jpeg(&*self.cache.canvas_for(&tree)?)?,
        };

        Ok(Some(ExportArtifact {
            filename: artifact_filename(&request.filename, request.format),
            mime_type: request.format.mime_type(),
            bytes,
        }))
    }

    /// Export `snapshot` per `request`.
    pub async fn export_drawing(
        &self,
        snapshot: &SvgNode,
        request: &ExportRequest,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(artifact) = self.prepare_artifact(snapshot, request)? else {
            tracing::info!("[Export] Nothing to export for '{}'", request.filename);
            return Ok(ExportOutcome::Skipped);
        };

        match &request.email {
            Some(destination) => self.send(artifact, destination).await,
            None => self.download(artifact).await,
        }
    }

    async fn download(&self, artifact: ExportArtifact) -> Result<ExportOutcome, ExportError> {
        tokio::fs::create_dir_all(&self.export_dir).await?;
        let path = self.export_dir.join(&artifact.filename);
        tokio::fs::write(&path, &artifact.bytes).await?;
        tracing::info!("[Export] Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        Ok(ExportOutcome::Downloaded(path))
    }

    async fn send(
        &self,
        artifact: ExportArtifact,
        destination: &str,
    ) -> Result<ExportOutcome, ExportError> {
        let payload = EmailableImage {
            data_url: artifact.data_url(),
            mime_type: artifact.mime_type.to_string(),
            filename: artifact.filename,
            destination: destination.to_string(),
        };
        payload.validate()?;

        let mail = &self.mail;
        let result = self
            .retry
            .run("send e-mail", || mail.send_email(payload.clone()))
            .await;

        match result {
            Ok(()) => {
                tracing::info!("[Export] Sent {} to {}", payload.filename, destination);
                Ok(ExportOutcome::Emailed {
                    destination: destination.to_string(),
                })
            }
            Err(e) => {
                self.reporter.report(ERROR_DIALOG_WIDTH, EMAIL_ERROR_MESSAGE);
                Err(e.into())
            }
        }
    }
}

impl std::fmt::Debug for ExportPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportPipeline")
            .field("export_dir", &self.export_dir)
            .field("cache", &self.cache)
            .finish()
    }
}

/// `filename` with the format's extension appended when missing
pub fn artifact_filename(filename: &str, format: ExportFormat) -> String {
    let stem = filename.trim();
    let stem = if stem.is_empty() { "drawing" } else { stem };
    let has_extension = Path::new(stem)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
    if has_extension {
        stem.to_string()
    } else {
        format!("{}.{}", stem, format.extension())
    }
}

fn rgba_image(canvas: &Canvas) -> Result<RgbaImage, ExportError> {
    RgbaImage::from_raw(canvas.width, canvas.height, canvas.rgba.clone()).ok_or(
        ExportError::EmptyCanvas {
            width: canvas.width,
            height: canvas.height,
        },
    )
}

fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(rgba_image(canvas)?)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// JPEG has no alpha; pixels are composited over white first.
fn encode_jpeg(canvas: &Canvas) -> Result<Vec<u8>, ExportError> {
    let rgba = rgba_image(canvas)?;
    let rgb = RgbImage::from_fn(canvas.width, canvas.height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let over_white = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16)) / 255) as u8;
        image::Rgb([over_white(r), over_white(g), over_white(b)])
    });

    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder.encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(bytes)
}
