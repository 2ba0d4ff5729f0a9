//! Compiler-error overlay.
//!
//! Errors arrive as ranges against the flattened query text. The overlay is
//! render-only: it recolors the already-finalized span lists for one frame,
//! splitting any error substring that crosses line boundaries into per-line
//! pieces. Nothing is cached; the caller rebuilds spans and reapplies the
//! overlay on every paint that still wants it.

use crate::{Palette, Span, SpanKind};
use core_buffer::SEPARATOR_WIDTH;

/// A compile failure location reported by the query compiler: a description
/// plus a substring of the flattened text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub description: String,
    pub start: usize,
    pub len: usize,
}

/// Recolor `spans` so every error range shows in error colors. Error ranges
/// are clamped to the buffer; a range that covers a separator simply splits
/// into pieces on the adjacent lines.
pub fn apply_errors<S: AsRef<str>>(
    spans: &mut [Vec<Span>],
    lines: &[S],
    errors: &[CompileError],
    palette: &Palette,
) {
    for err in errors {
        for (row, start, end) in line_pieces(lines, err.start, err.start + err.len) {
            recolor_range(&mut spans[row], start, end, palette);
        }
    }
}

/// Split a flattened `[start, end)` range into `(row, start_in_line,
/// end_in_line)` pieces, dropping the parts that land on separators.
fn line_pieces<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    end: usize,
) -> Vec<(usize, usize, usize)> {
    let mut pieces = Vec::new();
    let mut line_start = 0usize;
    for (row, line) in lines.iter().enumerate() {
        let line_end = line_start + line.as_ref().len();
        let piece_start = start.max(line_start);
        let piece_end = end.min(line_end);
        if piece_start < piece_end {
            pieces.push((row, piece_start - line_start, piece_end - line_start));
        }
        line_start = line_end + SEPARATOR_WIDTH;
        if line_start > end {
            break;
        }
    }
    pieces
}

/// Split the finalized spans of one line at `[start, end)` and give the
/// covered middle error colors. Preserves the gap-free, sorted layout.
fn recolor_range(spans: &mut Vec<Span>, start: usize, end: usize, palette: &Palette) {
    let mut out = Vec::with_capacity(spans.len() + 2);
    for span in spans.drain(..) {
        if span.end() <= start || span.start >= end {
            out.push(span);
            continue;
        }
        if span.start < start {
            out.push(Span {
                len: start - span.start,
                ..span
            });
        }
        let mid_start = span.start.max(start);
        let mid_end = span.end().min(end);
        out.push(Span::new(mid_start, mid_end - mid_start, SpanKind::Error, palette));
        if span.end() > end {
            out.push(Span {
                start: end,
                len: span.end() - end,
                ..span
            });
        }
    }
    *spans = out;
}
