//! Position/offset conversion against the flattened query text.
//!
//! A `Position` is a zero-based `(column, row)` pair where `column` is a byte
//! offset within the row's line. Conversions to and from linear offsets use
//! the fixed two-byte separator `"\r\n"` between lines. Out-of-range offsets
//! are programmer errors and panic; only the final-row clamp in
//! `position_of` is deliberate policy.

use std::cmp::Ordering;

/// Line separator used in the flattened text.
pub const SEPARATOR: &str = "\r\n";
/// Width of [`SEPARATOR`] in bytes.
pub const SEPARATOR_WIDTH: usize = SEPARATOR.len();

/// Zero-based location in the buffer. Ordering is row-major: rows compare
/// first, columns break ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
    pub fn origin() -> Self {
        Self { column: 0, row: 0 }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row
            .cmp(&other.row)
            .then(self.column.cmp(&other.column))
    }
}

/// Total length of the flattened text formed by joining `lines` with the
/// separator.
pub fn flattened_len<S: AsRef<str>>(lines: &[S]) -> usize {
    if lines.is_empty() {
        return 0;
    }
    let content: usize = lines.iter().map(|l| l.as_ref().len()).sum();
    content + (lines.len() - 1) * SEPARATOR_WIDTH
}

/// Linear offset of `pos` in the flattened text: full length (plus separator)
/// of every line before `pos.row`, then `pos.column`.
///
/// Panics if `pos.row` is not a valid line index.
pub fn offset_of<S: AsRef<str>>(lines: &[S], pos: Position) -> usize {
    assert!(
        pos.row < lines.len(),
        "row {} outside buffer of {} lines",
        pos.row,
        lines.len()
    );
    let before: usize = lines[..pos.row]
        .iter()
        .map(|l| l.as_ref().len() + SEPARATOR_WIDTH)
        .sum();
    before + pos.column
}

/// Inverse of [`offset_of`]: the position whose line starts at or before
/// `offset`, clamped to the final row. For any `offset <= flattened_len`,
/// `offset_of(lines, position_of(lines, offset)) == offset`.
///
/// Panics if `offset` exceeds the flattened length.
pub fn position_of<S: AsRef<str>>(lines: &[S], offset: usize) -> Position {
    let total = flattened_len(lines);
    assert!(
        offset <= total,
        "offset {offset} outside buffer of length {total}"
    );
    let mut start = 0usize;
    for (row, line) in lines.iter().enumerate() {
        let next = start + line.as_ref().len() + SEPARATOR_WIDTH;
        if offset < next || row + 1 == lines.len() {
            return Position::new(offset - start, row);
        }
        start = next;
    }
    Position::origin()
}

/// Byte index of the previous `char` boundary in `line` at or below `col`.
pub fn prev_char_boundary(line: &str, col: usize) -> usize {
    let mut c = col.min(line.len());
    while c > 0 && !line.is_char_boundary(c) {
        c -= 1;
    }
    if c == 0 {
        return 0;
    }
    let mut p = c - 1;
    while p > 0 && !line.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Byte index of the next `char` boundary in `line` strictly above `col`
/// (clamped to the line length).
pub fn next_char_boundary(line: &str, col: usize) -> usize {
    if col >= line.len() {
        return line.len();
    }
    let mut n = col + 1;
    while n < line.len() && !line.is_char_boundary(n) {
        n += 1;
    }
    n
}

/// Rewrite every line ending in `raw` (`\r\n`, bare `\n`, bare `\r`) as the
/// canonical [`SEPARATOR`]. Used when text crosses the buffer boundary from
/// outside: clipboard pastes and files loaded from disk.
pub fn normalize_separators(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(SEPARATOR);
            }
            '\n' => out.push_str(SEPARATOR),
            _ => out.push(ch),
        }
    }
    out
}

/// Clamp `col` to the nearest `char` boundary at or below it.
pub fn clamp_col(line: &str, col: usize) -> usize {
    let mut c = col.min(line.len());
    while c > 0 && !line.is_char_boundary(c) {
        c -= 1;
    }
    c
}
