//! Immutable editor state over flattened query text.
//!
//! An [`EditorState`] is a value: every edit produces a new state, so
//! undo/redo is plain snapshot push/pop with no inverse-operation
//! bookkeeping. The flattened string is the single source of truth; `lines()`
//! is recomputed on demand by splitting on the separator, which removes any
//! possibility of the two representations drifting apart.

use anyhow::{Result, bail};

pub mod position;
pub use position::{
    Position, SEPARATOR, SEPARATOR_WIDTH, clamp_col, flattened_len, next_char_boundary,
    normalize_separators, offset_of, position_of, prev_char_boundary,
};

/// Snapshot of the edit buffer: flattened text, cursor, optional selection
/// anchor. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    text: String,
    cursor: Position,
    anchor: Option<Position>,
}

impl EditorState {
    /// Build a state from flattened text. The cursor must satisfy the state
    /// invariant (valid row, column within the row's line); violations are
    /// programmer errors and panic.
    pub fn new(text: impl Into<String>, cursor: Position, anchor: Option<Position>) -> Self {
        let text = text.into();
        let state = Self {
            text,
            cursor,
            anchor,
        };
        let lines = state.lines();
        assert!(
            cursor.row < lines.len(),
            "cursor row {} outside {} lines",
            cursor.row,
            lines.len()
        );
        assert!(
            cursor.column <= lines[cursor.row].len(),
            "cursor column {} past end of line {}",
            cursor.column,
            cursor.row
        );
        state
    }

    /// Build a state from an ordered sequence of lines. Lines may not contain
    /// separator or newline bytes; the sequence may not be empty.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.is_empty() {
            bail!("editor state requires at least one line");
        }
        for (i, line) in lines.iter().enumerate() {
            if line.as_ref().contains(['\r', '\n']) {
                bail!("line {i} contains a line separator character");
            }
        }
        let text = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        Ok(Self {
            text,
            cursor: Position::origin(),
            anchor: None,
        })
    }

    /// Build a state from flattened text, cursor at the origin. A text with
    /// no separators yields a single line; the empty text yields one empty
    /// line.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: Position::origin(),
            anchor: None,
        }
    }

    /// The flattened text (lines joined by the separator).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recompute the line sequence by splitting the flattened text. Always at
    /// least one line.
    pub fn lines(&self) -> Vec<String> {
        self.text.split(SEPARATOR).map(str::to_string).collect()
    }

    pub fn line_count(&self) -> usize {
        self.text.split(SEPARATOR).count()
    }

    /// Byte length of the line at `row`. Panics on an out-of-range row.
    pub fn line_len(&self, row: usize) -> usize {
        self.text
            .split(SEPARATOR)
            .nth(row)
            .map(str::len)
            .unwrap_or_else(|| panic!("row {row} outside buffer"))
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Linear offset of the cursor in the flattened text.
    pub fn cursor_offset(&self) -> usize {
        offset_of(&self.lines(), self.cursor)
    }

    /// History/dedup equality: flattened text must match, and either both
    /// states have no selection or both have one with equal anchor and cursor
    /// offsets. A bare cursor move does not distinguish states.
    pub fn same_edit_as(&self, other: &Self) -> bool {
        if self.text != other.text {
            return false;
        }
        match (self.anchor, other.anchor) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                let lines = self.lines();
                offset_of(&lines, a) == offset_of(&lines, b)
                    && self.cursor_offset() == other.cursor_offset()
            }
            _ => false,
        }
    }
}
