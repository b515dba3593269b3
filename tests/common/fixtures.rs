//! Record and board fixtures

use sketchboard::gallery_app::{Board, SvgNode};
use sketchboard::shared::ImageRecord;

/// Saved record with a fixed id
pub fn record(id: &str, tags: &[&str]) -> ImageRecord {
    let mut record = ImageRecord::new(
        format!("image {}", id),
        tags.iter().map(|t| t.to_string()).collect(),
        "<svg xmlns=\"http://www.w3.org/2000/svg\"/>",
        "{\"baseParameters\":{\"width\":800,\"height\":600,\"backgroundColor\":\"#ffffff\"},\"svgBoard\":[]}",
    );
    record.id = id.to_string();
    record
}

/// Unsaved record as the client would post it
pub fn draft(title: &str, tags: &[&str]) -> ImageRecord {
    let mut record = record("undefined", tags);
    record.title = title.to_string();
    record
}

pub fn ids(records: &[ImageRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

/// Board with a couple of components and some history
pub fn sample_board() -> Board {
    let mut board = Board::default();
    board.add_component(SvgNode::rect(10.0, 10.0, 100.0, 60.0, "#cc3333"));
    board.add_component(SvgNode::stroke(&[(0.0, 0.0), (50.0, 80.0)], "#222222", 3.0));
    board.add_component(SvgNode::text_label(20.0, 200.0, 24.0, "#000000", "hello & bye"));
    board
}
