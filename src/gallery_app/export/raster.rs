//! Rasterization of board snapshots, with a one-entry canvas cache.

use std::sync::{Arc, Mutex, PoisonError};

use resvg::{tiny_skia, usvg};

use super::ExportError;
use crate::gallery_app::board::SvgNode;

/// Straight (non-premultiplied) RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Turns an SVG tree into pixels
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, root: &SvgNode, width: u32, height: u32) -> Result<Canvas, ExportError>;
}

/// resvg rasterizer
#[derive(Debug, Default, Clone, Copy)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn rasterize(&self, root: &SvgNode, width: u32, height: u32) -> Result<Canvas, ExportError> {
        let markup = root.to_markup();
        let tree = usvg::Tree::from_str(&markup, &usvg::Options::default())
            .map_err(|e| ExportError::Render(e.to_string()))?;

        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(ExportError::EmptyCanvas { width, height })?;

        let size = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Ok(Canvas { width, height, rgba })
    }
}

/// Canvas size declared on the root element
pub fn canvas_size(root: &SvgNode) -> Result<(u32, u32), ExportError> {
    let width = root.length("width").ok_or(ExportError::MissingDimensions)?;
    let height = root.length("height").ok_or(ExportError::MissingDimensions)?;
    Ok((width.round() as u32, height.round() as u32))
}

/// Reuses the last canvas while the snapshot is unchanged.
pub struct CanvasCache {
    rasterizer: Arc<dyn Rasterizer>,
    last: Mutex<Option<(SvgNode, Arc<Canvas>)>>,
}

impl CanvasCache {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            rasterizer,
            last: Mutex::new(None),
        }
    }

    pub fn canvas_for(&self, snapshot: &SvgNode) -> Result<Arc<Canvas>, ExportError> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached, canvas)) = last.as_ref() {
            if cached == snapshot {
                tracing::debug!("[Export] Reusing cached canvas");
                return Ok(Arc::clone(canvas));
            }
        }

        let (width, height) = canvas_size(snapshot)?;
        tracing::debug!("[Export] Rasterizing {}x{}", width, height);
        let canvas = Arc::new(self.rasterizer.rasterize(snapshot, width, height)?);
        *last = Some((snapshot.clone(), Arc::clone(&canvas)));
        Ok(canvas)
    }
}

impl std::fmt::Debug for CanvasCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached = self
            .last
            .lock()
            .map(|last| last.is_some())
            .unwrap_or(false);
        f.debug_struct("CanvasCache").field("cached", &cached).finish()
    }
}
