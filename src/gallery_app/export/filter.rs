use serde::{Deserialize, Serialize};

use crate::gallery_app::board::{SvgNode, DRAWING_LAYER_ID};

/// Export filters applied to the drawing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    Blur,
}

impl Filter {
    pub const ALL: [Filter; 5] = [
        Filter::None,
        Filter::Grayscale,
        Filter::Sepia,
        Filter::Invert,
        Filter::Blur,
    ];

    /// `<filter id>` referenced from the drawing layer
    pub fn id(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Grayscale => Some("filter-grayscale"),
            Self::Sepia => Some("filter-sepia"),
            Self::Invert => Some("filter-invert"),
            Self::Blur => Some("filter-blur"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Invert => "Invert",
            Self::Blur => "Blur",
        }
    }

    /// The `<filter>` element, `None` for [`Filter::None`]
    pub fn definition(&self) -> Option<SvgNode> {
        let primitive = match self {
            Self::None => return None,
            Self::Grayscale => color_matrix("saturate", "0"),
            Self::Sepia => color_matrix(
                "matrix",
                "0.393 0.769 0.189 0 0 0.349 0.686 0.168 0 0 0.272 0.534 0.131 0 0 0 0 0 1 0",
            ),
            Self::Invert => color_matrix(
                "matrix",
                "-1 0 0 0 1 0 -1 0 0 1 0 0 -1 0 1 0 0 0 1 0",
            ),
            Self::Blur => SvgNode::new("feGaussianBlur").attr("stdDeviation", 3),
        };
        Some(
            SvgNode::new("filter")
                .attr("id", self.id()?)
                .child(primitive),
        )
    }
}

fn color_matrix(kind: &str, values: &str) -> SvgNode {
    SvgNode::new("feColorMatrix")
        .attr("type", kind)
        .attr("values", values)
}

/// Every predefined `<filter>` element, in [`Filter::ALL`] order
pub fn filter_definitions() -> Vec<SvgNode> {
    Filter::ALL.iter().filter_map(Filter::definition).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Applied,
    /// The tree has no drawing layer
    Skipped,
}

/// Point the drawing layer's `filter` attribute at `filter`, or clear it for
/// [`Filter::None`].
pub fn apply_filter(root: &mut SvgNode, filter: Filter) -> FilterOutcome {
    let Some(layer) = root.find_by_id_mut(DRAWING_LAYER_ID) else {
        tracing::warn!("[Export] No drawing layer, filter not applied");
        return FilterOutcome::Skipped;
    };

    match filter.id() {
        Some(id) => layer.set_attribute("filter", format!("url(#{})", id)),
        None => {
            layer.remove_attribute("filter");
        }
    }
    FilterOutcome::Applied
}
