//! Syntax highlighting for query text.
//!
//! [`highlight`] is a pure function over the whole buffer, not per-line in
//! isolation: block comments can span lines, so an "inside unterminated
//! block comment" flag carries from the end of one line to the start of the
//! next. Per line the pipeline runs keyword scan, comment scan, overlap
//! resolution, name-tag extraction, and gap filling, producing spans that
//! cover the entire line with no gaps and no overlaps.
//!
//! Span ordering everywhere is `(start asc, len desc)`: while overlap
//! resolution is in progress the length-descending tiebreak puts an outer
//! span before a nested span starting at the same offset, so the outer span
//! is the one kept.

use crossterm::style::Color;

pub mod overlay;
pub use overlay::apply_errors;

pub const LINE_COMMENT: &str = "//";
pub const BLOCK_OPEN: &str = "/*";
pub const BLOCK_CLOSE: &str = "*/";
pub const NAME_OPEN: &str = "<Name>";
pub const NAME_CLOSE: &str = "</Name>";

/// Fixed keyword table: host-language keywords plus query-operator keywords.
pub const KEYWORDS: &[&str] = &[
    // language
    "var", "let", "new", "null", "true", "false", "in", "is", "as", "typeof",
    // query operators
    "from", "where", "select", "orderby", "group", "by", "join", "on", "equals", "into",
    "ascending", "descending", "distinct", "skip", "take", "count",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Keyword,
    Comment,
    Name,
    Error,
}

/// A colored sub-range of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
    pub kind: SpanKind,
    pub fg: Color,
    pub bg: Color,
}

impl Span {
    pub fn new(start: usize, len: usize, kind: SpanKind, palette: &Palette) -> Self {
        let (fg, bg) = palette.colors(kind);
        Self {
            start,
            len,
            kind,
            fg,
            bg,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Color assignments per span kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub default_fg: Color,
    pub default_bg: Color,
    pub keyword: Color,
    pub comment: Color,
    pub name_fg: Color,
    pub name_bg: Color,
    pub error_fg: Color,
    pub error_bg: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default_fg: Color::Reset,
            default_bg: Color::Reset,
            keyword: Color::Blue,
            comment: Color::DarkGreen,
            name_fg: Color::White,
            name_bg: Color::DarkMagenta,
            error_fg: Color::White,
            error_bg: Color::DarkRed,
        }
    }
}

impl Palette {
    fn colors(&self, kind: SpanKind) -> (Color, Color) {
        match kind {
            SpanKind::Plain => (self.default_fg, self.default_bg),
            SpanKind::Keyword => (self.keyword, self.default_bg),
            SpanKind::Comment => (self.comment, self.default_bg),
            SpanKind::Name => (self.name_fg, self.name_bg),
            SpanKind::Error => (self.error_fg, self.error_bg),
        }
    }
}

/// Highlight the whole buffer: one ordered, gap-filled span list per line.
pub fn highlight<S: AsRef<str>>(lines: &[S], palette: &Palette) -> Vec<Vec<Span>> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_comment = false;
    for line in lines {
        let line = line.as_ref();
        let mut spans = keyword_spans(line, palette);
        in_comment = comment_spans(line, in_comment, &mut spans, palette);
        resolve_overlaps(&mut spans);
        extract_name_tags(line, &mut spans, palette);
        fill_gaps(line.len(), &mut spans, palette);
        out.push(spans);
    }
    out
}

/// Sort key used for every finalized span list.
pub fn sort_spans(spans: &mut [Span]) {
    spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.len.cmp(&a.len)));
}

/// Scan all keyword occurrences on one line. An occurrence counts only when
/// the byte before (if any) is neither a letter nor `@` (so escaped
/// identifiers like `@select` stay plain) and the byte after (if any) is
/// neither a letter nor a digit (so `select2` does not match `select`).
fn keyword_spans(line: &str, palette: &Palette) -> Vec<Span> {
    let mut spans = Vec::new();
    for kw in KEYWORDS {
        for (at, _) in line.match_indices(kw) {
            let before = line[..at].chars().next_back();
            if before.is_some_and(|c| c.is_alphabetic() || c == '@') {
                continue;
            }
            let after = line[at + kw.len()..].chars().next();
            if after.is_some_and(|c| c.is_alphanumeric()) {
                continue;
            }
            spans.push(Span::new(at, kw.len(), SpanKind::Keyword, palette));
        }
    }
    spans
}

/// Scan comment spans on one line, given whether an unterminated block
/// comment continues from the previous line. Returns whether the *next* line
/// still starts inside a block comment.
fn comment_spans(line: &str, continuing: bool, spans: &mut Vec<Span>, palette: &Palette) -> bool {
    let mut pos = 0usize;
    let mut inside = continuing;
    loop {
        if inside {
            match line[pos..].find(BLOCK_CLOSE) {
                Some(rel) => {
                    let end = pos + rel + BLOCK_CLOSE.len();
                    spans.push(Span::new(pos, end - pos, SpanKind::Comment, palette));
                    pos = end;
                    inside = false;
                }
                None => {
                    if line.len() > pos {
                        spans.push(Span::new(pos, line.len() - pos, SpanKind::Comment, palette));
                    }
                    return true;
                }
            }
            continue;
        }
        let line_at = line[pos..].find(LINE_COMMENT).map(|i| pos + i);
        let block_at = line[pos..].find(BLOCK_OPEN).map(|i| pos + i);
        match (line_at, block_at) {
            (Some(l), None) => {
                // line comment wins the line; nothing can follow it
                spans.push(Span::new(l, line.len() - l, SpanKind::Comment, palette));
                return false;
            }
            (Some(l), Some(b)) if l < b => {
                spans.push(Span::new(l, line.len() - l, SpanKind::Comment, palette));
                return false;
            }
            (_, Some(open)) => {
                // scan for the close past the open marker; another comment
                // may start later on the same line once this one closes
                match line[open + BLOCK_OPEN.len()..].find(BLOCK_CLOSE) {
                    Some(rel) => {
                        let end = open + BLOCK_OPEN.len() + rel + BLOCK_CLOSE.len();
                        spans.push(Span::new(open, end - open, SpanKind::Comment, palette));
                        pos = end;
                    }
                    None => {
                        spans.push(Span::new(open, line.len() - open, SpanKind::Comment, palette));
                        return true;
                    }
                }
            }
            (None, None) => return false,
        }
    }
}

/// Discard any span whose start falls strictly inside an earlier, longer
/// span that fully contains it (keyword matches inside comments — the
/// comment always wins). Requires nothing of the input order; sorts first.
fn resolve_overlaps(spans: &mut Vec<Span>) {
    sort_spans(spans);
    let mut covered_end = 0usize;
    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if !kept.is_empty() && span.start < covered_end && span.end() <= covered_end {
            continue;
        }
        covered_end = covered_end.max(span.end());
        kept.push(span);
    }
    *spans = kept;
}

/// Split a comment span containing `<Name>…</Name>` into
/// prefix-through-begin-tag, tag body, and end-tag-through-end. A missing or
/// out-of-order tag leaves the comment span untouched (malformed tags
/// degrade gracefully to a whole-span comment).
fn extract_name_tags(line: &str, spans: &mut Vec<Span>, palette: &Palette) {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if span.kind != SpanKind::Comment {
            out.push(span);
            continue;
        }
        let text = &line[span.start..span.end()];
        let split = text.find(NAME_OPEN).and_then(|open| {
            let body_start = open + NAME_OPEN.len();
            text[body_start..]
                .find(NAME_CLOSE)
                .map(|rel| (body_start, body_start + rel))
        });
        match split {
            Some((body_start, body_end)) if body_end > body_start => {
                out.push(Span::new(span.start, body_start, SpanKind::Comment, palette));
                out.push(Span::new(
                    span.start + body_start,
                    body_end - body_start,
                    SpanKind::Name,
                    palette,
                ));
                out.push(Span::new(
                    span.start + body_end,
                    span.len - body_end,
                    SpanKind::Comment,
                    palette,
                ));
            }
            _ => out.push(span),
        }
    }
    *spans = out;
}

/// Synthesize default-colored spans before the first span, between spans
/// that do not touch, and after the last span through end of line; drop any
/// zero-length span; final sort.
fn fill_gaps(line_len: usize, spans: &mut Vec<Span>, palette: &Palette) {
    sort_spans(spans);
    let mut filled = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0usize;
    for span in spans.drain(..) {
        if span.start > cursor {
            filled.push(Span::new(cursor, span.start - cursor, SpanKind::Plain, palette));
        }
        cursor = cursor.max(span.end());
        filled.push(span);
    }
    if cursor < line_len {
        filled.push(Span::new(cursor, line_len - cursor, SpanKind::Plain, palette));
    }
    filled.retain(|s| s.len > 0);
    sort_spans(&mut filled);
    *spans = filled;
}
