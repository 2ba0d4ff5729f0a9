//! Destructive edits: insertion, line splitting, backspace, and the
//! clipboard trio. Every edit that adds or removes text first collapses the
//! selection, so typing over a selection replaces it.

use core_buffer::{
    EditorState, Position, SEPARATOR, SEPARATOR_WIDTH, normalize_separators, offset_of,
    position_of, prev_char_boundary,
};

use crate::selection;
use crate::traits::Clipboard;

/// Insert one printable `char` at the cursor. At the last usable column the
/// insertion wraps: a separator goes in first and the character starts the
/// next row.
pub fn insert_char(state: &EditorState, ch: char, width: usize) -> EditorState {
    let state = selection::remove(state);
    let c = state.cursor();
    let offset = offset_of(&state.lines(), c);
    let mut text = state.text().to_string();
    if c.column < width.saturating_sub(1) {
        text.insert(offset, ch);
        EditorState::new(text, Position::new(c.column + ch.len_utf8(), c.row), None)
    } else {
        text.insert_str(offset, SEPARATOR);
        text.insert(offset + SEPARATOR_WIDTH, ch);
        EditorState::new(text, Position::new(ch.len_utf8(), c.row + 1), None)
    }
}

/// Split the current line at the cursor.
pub fn split_line(state: &EditorState) -> EditorState {
    let state = selection::remove(state);
    let c = state.cursor();
    let offset = offset_of(&state.lines(), c);
    let mut text = state.text().to_string();
    text.insert_str(offset, SEPARATOR);
    EditorState::new(text, Position::new(0, c.row + 1), None)
}

/// Delete backwards: the selection if there is one, otherwise the `char`
/// before the cursor, otherwise (at column zero) the separator joining the
/// cursor's line to the previous one.
pub fn backspace(state: &EditorState) -> EditorState {
    if state.has_selection() {
        return selection::remove(state);
    }
    let c = state.cursor();
    let lines = state.lines();
    let mut text = state.text().to_string();
    if c.column > 0 {
        let prev = prev_char_boundary(&lines[c.row], c.column);
        let line_start = offset_of(&lines, Position::new(0, c.row));
        text.replace_range(line_start + prev..line_start + c.column, "");
        EditorState::new(text, Position::new(prev, c.row), None)
    } else if c.row > 0 {
        let prev_len = lines[c.row - 1].len();
        let sep_start = offset_of(&lines, Position::new(0, c.row)) - SEPARATOR_WIDTH;
        text.replace_range(sep_start..sep_start + SEPARATOR_WIDTH, "");
        EditorState::new(text, Position::new(prev_len, c.row - 1), None)
    } else {
        state.clone()
    }
}

/// Move the selected text to the clipboard. No selection, no effect.
pub fn cut(state: &EditorState, clipboard: &dyn Clipboard) -> EditorState {
    let Some((b, e)) = selection::offsets(state) else {
        return state.clone();
    };
    clipboard.set_text(&state.text()[b..e]);
    selection::remove(state)
}

/// Copy the selected text. The clipboard write runs on a scoped worker and
/// is joined before the session paints again, so the buffer is untouched
/// and the ordering with the next keystroke stays deterministic.
pub fn copy(state: &EditorState, clipboard: &dyn Clipboard) -> EditorState {
    if let Some((b, e)) = selection::offsets(state) {
        let snippet = &state.text()[b..e];
        std::thread::scope(|scope| {
            scope.spawn(|| clipboard.set_text(snippet));
        });
    }
    state.clone()
}

/// Replace the selection (or insert at the cursor) with the clipboard
/// contents, line endings normalized to the buffer separator. The cursor
/// lands just after the pasted text.
pub fn paste(state: &EditorState, clipboard: &dyn Clipboard) -> EditorState {
    let state = selection::remove(state);
    let Some(raw) = clipboard.text() else {
        return state;
    };
    let content = normalize_separators(&raw);
    if content.is_empty() {
        return state;
    }
    let offset = offset_of(&state.lines(), state.cursor());
    let mut text = state.text().to_string();
    text.insert_str(offset, &content);
    let lines: Vec<&str> = text.split(SEPARATOR).collect();
    let cursor = position_of(&lines, offset + content.len());
    EditorState::new(text, cursor, None)
}
