//! Selection geometry.
//!
//! A selection is the ordered span between the anchor and the cursor. Two
//! normalization rules apply before any text is taken or removed:
//!
//! * an end position at column zero is re-expressed as the end of the
//!   previous line, so a shift+down from column zero reads as "through the
//!   end of that line" rather than "through nothing on the next line";
//! * an end offset that stops exactly at a line's last byte (with another
//!   line following) is extended by the separator width, so whole-line
//!   selections capture their terminator.

use core_buffer::{EditorState, Position, SEPARATOR_WIDTH, offset_of};

/// Ordered `(begin, end)` positions of the selection, with the column-zero
/// end rule applied. `None` without an anchor.
pub fn bounds(state: &EditorState) -> Option<(Position, Position)> {
    let anchor = state.anchor()?;
    let cursor = state.cursor();
    let (begin, mut end) = if anchor <= cursor {
        (anchor, cursor)
    } else {
        (cursor, anchor)
    };
    if begin == end {
        return Some((begin, end));
    }
    if end.column == 0 && end.row > 0 {
        let prev = end.row - 1;
        end = Position::new(state.line_len(prev), prev);
    }
    Some((begin, end))
}

/// Selected range as flattened byte offsets, with the separator-extension
/// rule applied. `None` without an anchor.
pub fn offsets(state: &EditorState) -> Option<(usize, usize)> {
    let (begin, end) = bounds(state)?;
    let lines = state.lines();
    let b = offset_of(&lines, begin);
    let mut e = offset_of(&lines, end);
    if e > b && end.row + 1 < lines.len() && end.column == lines[end.row].len() {
        e += SEPARATOR_WIDTH;
    }
    Some((b, e))
}

/// Delete the selected range. The cursor lands on the selection's begin
/// position and the anchor is cleared; without an anchor this is the
/// identity, which makes the operation idempotent.
pub fn remove(state: &EditorState) -> EditorState {
    let Some((b, e)) = offsets(state) else {
        return state.clone();
    };
    let (begin, _) = bounds(state).unwrap_or((state.cursor(), state.cursor()));
    let mut text = state.text().to_string();
    text.replace_range(b..e, "");
    EditorState::new(text, begin, None)
}
