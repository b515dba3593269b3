//! # Drawing Board
//!
//! The editable drawing: base parameters (canvas size and background) plus
//! an ordered list of SVG components. Every mutation commits a full
//! [`BoardDocument`] to a bounded undo/redo [`History`].
//!
//! ## Rendered tree
//!
//! ```text
//! <svg xmlns=... width height viewBox>
//! ├── <defs>                      predefined export filters
//! ├── <rect id="background">      background colour
//! └── <g id="drawing-layer">      components, in order
//! ```

pub mod history;
pub mod node;

use serde::{Deserialize, Serialize};

use crate::gallery_app::export::filter::filter_definitions;
use crate::shared::SharedError;

pub use history::{History, DEFAULT_HISTORY_CAPACITY};
pub use node::SvgNode;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// Id of the group holding the drawn components
pub const DRAWING_LAYER_ID: &str = "drawing-layer";
pub const BACKGROUND_ID: &str = "background";

/// Canvas size and background colour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseParameters {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
}

impl Default for BaseParameters {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background_color: "#ffffff".to_string(),
        }
    }
}

/// Serialized form of a board: `{ baseParameters, svgBoard }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub base_parameters: BaseParameters,
    #[serde(default)]
    pub svg_board: Vec<SvgNode>,
}

impl BoardDocument {
    pub fn new(base_parameters: BaseParameters) -> Self {
        Self {
            base_parameters,
            svg_board: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    history: History<BoardDocument>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BaseParameters::default())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.document() == other.document()
    }
}

impl Board {
    pub fn new(base_parameters: BaseParameters) -> Self {
        Self {
            history: History::new(BoardDocument::new(base_parameters)),
        }
    }

    /// Board whose history holds `document` as its only entry
    pub fn from_document(document: BoardDocument) -> Self {
        Self {
            history: History::new(document),
        }
    }

    pub fn document(&self) -> &BoardDocument {
        self.history.current()
    }

    pub fn base_parameters(&self) -> &BaseParameters {
        &self.document().base_parameters
    }

    pub fn components(&self) -> &[SvgNode] {
        &self.document().svg_board
    }

    fn mutate(&mut self, f: impl FnOnce(&mut BoardDocument)) {
        let mut next = self.document().clone();
        f(&mut next);
        self.history.commit(next);
    }

    pub fn add_component(&mut self, component: SvgNode) {
        self.mutate(|doc| doc.svg_board.push(component));
    }

    /// Remove the component at `index`; no history entry when out of range.
    pub fn remove_component(&mut self, index: usize) -> Option<SvgNode> {
        let removed = self.components().get(index).cloned()?;
        self.mutate(|doc| {
            doc.svg_board.remove(index);
        });
        Some(removed)
    }

    pub fn clear_components(&mut self) {
        if self.components().is_empty() {
            return;
        }
        self.mutate(|doc| doc.svg_board.clear());
    }

    pub fn set_base_parameters(&mut self, base_parameters: BaseParameters) {
        self.mutate(|doc| doc.base_parameters = base_parameters);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo().is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo().is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the board content and reset history to that single state.
    pub fn restore(&mut self, document: BoardDocument) {
        self.history.reset(document);
    }

    pub fn to_json(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self.document())?)
    }

    pub fn from_json(json: &str) -> Result<Self, SharedError> {
        let document: BoardDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(document))
    }

    /// Full SVG tree of the current state
    pub fn snapshot(&self) -> SvgNode {
        let base = self.base_parameters();
        let mut defs = SvgNode::new("defs");
        defs.children = filter_definitions();

        let mut layer = SvgNode::new("g").attr("id", DRAWING_LAYER_ID);
        layer.children = self.components().to_vec();

        SvgNode::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .attr("width", base.width)
            .attr("height", base.height)
            .attr("viewBox", format!("0 0 {} {}", base.width, base.height))
            .child(defs)
            .child(
                SvgNode::rect(0.0, 0.0, base.width as f32, base.height as f32, &base.background_color)
                    .attr("id", BACKGROUND_ID),
            )
            .child(layer)
    }

    pub fn to_svg_markup(&self) -> String {
        self.snapshot().to_markup()
    }
}
