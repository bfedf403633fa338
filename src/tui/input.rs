//! Cursor movement for keyboard navigation over the card grid.

use crossterm::event::KeyCode;

/// Moves the cursor over a grid of `len` cards laid out `columns` wide.
///
/// Movement stops at the edges.
pub fn move_cursor(cursor: usize, key: KeyCode, columns: usize, len: usize) -> usize {
    if len == 0 || columns == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    let column = cursor % columns;

    match key {
        KeyCode::Right if column + 1 < columns && cursor + 1 < len => cursor + 1,
        KeyCode::Left if column > 0 => cursor - 1,
        KeyCode::Down if cursor + columns < len => cursor + columns,
        KeyCode::Up if cursor >= columns => cursor - columns,
        _ => cursor,
    }
}
