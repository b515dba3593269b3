use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One element of the board's SVG tree.
///
/// Attributes keep their insertion order so markup output is stable and two
/// trees compare equal only when they would render identical markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SvgNode {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    #[serde(default)]
    pub children: Vec<SvgNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SvgNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Builder-style attribute setter
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn child(mut self, child: SvgNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }

    /// Depth-first search for the element whose `id` attribute is `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&SvgNode> {
        if self.attribute("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut SvgNode> {
        if self.attribute("id") == Some(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_by_id_mut(id))
    }

    /// Parse the numeric part of a length attribute such as `800` or `800px`.
    pub fn length(&self, key: &str) -> Option<f32> {
        let raw = self.attribute(key)?.trim();
        let numeric = raw.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
        numeric.parse().ok()
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape(value, true));
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text, false));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.name);
    }

    pub fn rect(x: f32, y: f32, width: f32, height: f32, fill: &str) -> Self {
        Self::new("rect")
            .attr("x", x)
            .attr("y", y)
            .attr("width", width)
            .attr("height", height)
            .attr("fill", fill)
    }

    pub fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32, fill: &str) -> Self {
        Self::new("ellipse")
            .attr("cx", cx)
            .attr("cy", cy)
            .attr("rx", rx)
            .attr("ry", ry)
            .attr("fill", fill)
    }

    /// Open polyline through `points`
    pub fn stroke(points: &[(f32, f32)], color: &str, width: f32) -> Self {
        let points = points
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        Self::new("polyline")
            .attr("points", points)
            .attr("fill", "none")
            .attr("stroke", color)
            .attr("stroke-width", width)
            .attr("stroke-linecap", "round")
    }

    pub fn text_label(x: f32, y: f32, size: f32, fill: &str, content: &str) -> Self {
        Self::new("text")
            .attr("x", x)
            .attr("y", y)
            .attr("font-size", size)
            .attr("fill", fill)
            .with_text(content)
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
