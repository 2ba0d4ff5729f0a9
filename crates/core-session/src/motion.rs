//! Cursor motion.
//!
//! Every motion returns a fresh state. Shifted motions keep (or establish)
//! the anchor; unshifted motions clear it, even when the cursor does not
//! move. Horizontal motion steps whole `char`s; vertical motion keeps the
//! byte column and clamps it to the target line.

use core_buffer::{
    EditorState, Position, clamp_col, next_char_boundary, prev_char_boundary,
};

fn anchor_for(state: &EditorState, select: bool) -> Option<Position> {
    if select {
        state.anchor().or(Some(state.cursor()))
    } else {
        None
    }
}

fn moved(state: &EditorState, cursor: Position, select: bool) -> EditorState {
    let anchor = anchor_for(state, select);
    EditorState::new(state.text(), cursor, anchor)
}

pub fn left(state: &EditorState, select: bool, width: usize) -> EditorState {
    let c = state.cursor();
    let lines = state.lines();
    let cursor = if c.column > 0 {
        Position::new(prev_char_boundary(&lines[c.row], c.column), c.row)
    } else if c.row > 0 {
        let target = &lines[c.row - 1];
        let col = clamp_col(target, target.len().min(width.saturating_sub(1)));
        Position::new(col, c.row - 1)
    } else {
        c
    };
    moved(state, cursor, select)
}

pub fn right(state: &EditorState, select: bool, width: usize) -> EditorState {
    let c = state.cursor();
    let lines = state.lines();
    let line = &lines[c.row];
    let cursor = if c.column < line.len() {
        let next = next_char_boundary(line, c.column);
        if next <= width.saturating_sub(1) {
            Position::new(next, c.row)
        } else {
            c
        }
    } else if c.row + 1 < lines.len() {
        Position::new(0, c.row + 1)
    } else {
        c
    };
    moved(state, cursor, select)
}

pub fn up(state: &EditorState, select: bool) -> EditorState {
    let c = state.cursor();
    let cursor = if c.row > 0 {
        let lines = state.lines();
        Position::new(clamp_col(&lines[c.row - 1], c.column), c.row - 1)
    } else {
        c
    };
    moved(state, cursor, select)
}

pub fn down(state: &EditorState, select: bool) -> EditorState {
    let c = state.cursor();
    let lines = state.lines();
    let cursor = if c.row + 1 < lines.len() {
        Position::new(clamp_col(&lines[c.row + 1], c.column), c.row + 1)
    } else {
        c
    };
    moved(state, cursor, select)
}

pub fn home(state: &EditorState, select: bool) -> EditorState {
    let cursor = Position::new(0, state.cursor().row);
    moved(state, cursor, select)
}

pub fn end(state: &EditorState, select: bool) -> EditorState {
    let c = state.cursor();
    let cursor = Position::new(state.line_len(c.row), c.row);
    moved(state, cursor, select)
}

/// Anchor at the origin, cursor at the end of the final line.
pub fn select_all(state: &EditorState) -> EditorState {
    let last = state.line_count() - 1;
    let cursor = Position::new(state.line_len(last), last);
    EditorState::new(state.text(), cursor, Some(Position::origin()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_buffer::SEPARATOR;
    use pretty_assertions::assert_eq;

    const W: usize = 80;

    fn state(text: &str, cursor: Position) -> EditorState {
        EditorState::new(text.to_string(), cursor, None)
    }

    #[test]
    fn left_wraps_to_previous_line_end() {
        let text = format!("abc{SEPARATOR}def");
        let s = left(&state(&text, Position::new(0, 1)), false, W);
        assert_eq!(s.cursor(), Position::new(3, 0));
    }

    #[test]
    fn left_at_origin_stays_put() {
        let s = left(&state("abc", Position::origin()), false, W);
        assert_eq!(s.cursor(), Position::origin());
    }

    #[test]
    fn right_wraps_to_next_line_start() {
        let text = format!("abc{SEPARATOR}def");
        let s = right(&state(&text, Position::new(3, 0)), false, W);
        assert_eq!(s.cursor(), Position::new(0, 1));
    }

    #[test]
    fn horizontal_motion_steps_whole_chars() {
        let s = state("a\u{e9}b", Position::new(1, 0));
        assert_eq!(right(&s, false, W).cursor(), Position::new(3, 0));
        let s = state("a\u{e9}b", Position::new(3, 0));
        assert_eq!(left(&s, false, W).cursor(), Position::new(1, 0));
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let text = format!("abcdef{SEPARATOR}ab");
        let s = up(&state(&text, Position::new(2, 1)), false);
        assert_eq!(s.cursor(), Position::new(2, 0));
        let s = down(&state(&text, Position::new(5, 0)), false);
        assert_eq!(s.cursor(), Position::new(2, 1));
    }

    #[test]
    fn shifted_motion_establishes_anchor_once() {
        let s = state("abc", Position::new(1, 0));
        let s = right(&s, true, W);
        assert_eq!(s.anchor(), Some(Position::new(1, 0)));
        let s = right(&s, true, W);
        assert_eq!(s.anchor(), Some(Position::new(1, 0)));
        assert_eq!(s.cursor(), Position::new(3, 0));
    }

    #[test]
    fn unshifted_motion_clears_anchor_even_when_pinned() {
        let s = EditorState::new("abc", Position::origin(), Some(Position::new(2, 0)));
        let s = left(&s, false, W);
        assert_eq!(s.cursor(), Position::origin());
        assert_eq!(s.anchor(), None);
    }

    #[test]
    fn select_all_spans_whole_buffer() {
        let text = format!("abc{SEPARATOR}de");
        let s = select_all(&state(&text, Position::origin()));
        assert_eq!(s.anchor(), Some(Position::origin()));
        assert_eq!(s.cursor(), Position::new(2, 1));
    }
}
