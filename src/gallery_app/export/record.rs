use crate::gallery_app::board::Board;
use crate::shared::{ImageRecord, SharedError};

/// Build an unsaved record carrying both the inline SVG and the board JSON.
pub fn record_from_board(
    board: &Board,
    title: impl Into<String>,
    tags: Vec<String>,
) -> Result<ImageRecord, SharedError> {
    Ok(ImageRecord::new(
        title,
        tags,
        board.to_svg_markup(),
        board.to_json()?,
    ))
}

/// Reopen a saved record for editing. History starts at the restored state.
pub fn board_from_record(record: &ImageRecord) -> Result<Board, SharedError> {
    if record.serialized_board.trim().is_empty() {
        return Err(SharedError::validation(
            "serializedBoard",
            "Record has no board to import",
        ));
    }
    Board::from_json(&record.serialized_board)
}
