//! Full session-loop tests against scripted input and a recording renderer.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, bail};
use pretty_assertions::assert_eq;

use core_highlight::overlay::CompileError;
use core_highlight::{Span, SpanKind};
use core_session::event::{KeyCode, KeyEvent, Modifiers};
use core_session::traits::{Clipboard, InputSource, Renderer};
use core_session::{Session, recent_queries};

struct ScriptedInput {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_key(&mut self) -> Result<KeyEvent> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("script exhausted"),
        }
    }
}

#[derive(Debug, Default, Clone)]
struct Frame {
    rows: Vec<(usize, String, Vec<Span>)>,
    cleared_from: usize,
    cursor: (usize, usize),
}

impl Frame {
    fn has_error_span(&self) -> bool {
        self.rows
            .iter()
            .flat_map(|(_, _, spans)| spans)
            .any(|s| s.kind == SpanKind::Error)
    }
}

/// Renderer double: records every painted frame. A frame closes on
/// `set_cursor`, mirroring the session's paint order.
struct RecordingRenderer {
    width: usize,
    open: Frame,
    frames: Vec<Frame>,
}

impl RecordingRenderer {
    fn new(width: usize) -> Self {
        Self {
            width,
            open: Frame::default(),
            frames: Vec::new(),
        }
    }
}

impl Renderer for RecordingRenderer {
    fn width(&self) -> usize {
        self.width
    }

    fn paint(&mut self, row: usize, text: &str, spans: &[Span]) -> Result<()> {
        self.open.rows.push((row, text.to_string(), spans.to_vec()));
        Ok(())
    }

    fn clear_from(&mut self, row: usize) -> Result<()> {
        self.open.cleared_from = row;
        Ok(())
    }

    fn set_cursor(&mut self, column: usize, row: usize) -> Result<()> {
        self.open.cursor = (column, row);
        self.frames.push(std::mem::take(&mut self.open));
        Ok(())
    }
}

#[derive(Default)]
struct MemClipboard {
    slot: Mutex<Option<String>>,
}

impl Clipboard for MemClipboard {
    fn text(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|g| g.clone())
    }

    fn set_text(&self, text: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(text.to_string());
        }
    }
}

fn chars(s: &str) -> Vec<KeyEvent> {
    s.chars().map(|c| KeyEvent::new(KeyCode::Char(c))).collect()
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::with(KeyCode::Char(c), Modifiers::CTRL)
}

fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::with(code, Modifiers::ALT)
}

#[test]
fn run_returns_text_and_records_it() {
    let mut keys = chars("let x");
    keys.push(KeyEvent::new(KeyCode::F(5)));
    let mut input = ScriptedInput::new(keys);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();
    let mut recents = recent_queries("");

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result.as_deref(), Some("let x"));
    assert_eq!(recents.current(), "let x");
    assert_eq!(recents.past_len(), 1);
    // one frame per keystroke plus the initial paint
    assert_eq!(renderer.frames.len(), 6);
}

#[test]
fn cancel_returns_none_and_leaves_history_alone() {
    let mut input = ScriptedInput::new([KeyEvent::new(KeyCode::Esc)]);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();
    let mut recents = recent_queries("seed");

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(recents.current(), "seed");
    assert_eq!(recents.past_len(), 0);
}

#[test]
fn undo_rolls_back_one_edit() {
    let mut keys = chars("ab");
    keys.push(ctrl('z'));
    keys.push(KeyEvent::new(KeyCode::F(5)));
    let mut input = ScriptedInput::new(keys);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();
    let mut recents = recent_queries("");

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result.as_deref(), Some("a"));
}

#[test]
fn redo_reapplies_an_undone_edit() {
    let mut keys = chars("ab");
    keys.extend([ctrl('z'), ctrl('y'), KeyEvent::new(KeyCode::F(5))]);
    let mut input = ScriptedInput::new(keys);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();
    let mut recents = recent_queries("");

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result.as_deref(), Some("ab"));
}

#[test]
fn recall_swaps_query_and_resets_undo() {
    let mut recents = recent_queries("first");
    recents.append("second".to_string());

    let mut input = ScriptedInput::new([
        alt(KeyCode::Up),
        ctrl('z'), // undo must be empty after recall
        KeyEvent::new(KeyCode::F(5)),
    ]);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result.as_deref(), Some("first"));
    // running the recalled text again dedupes instead of re-appending
    assert_eq!(recents.current(), "first");
    assert_eq!(recents.future_len(), 1);
}

#[test]
fn recall_forward_returns_to_newer_query() {
    let mut recents = recent_queries("first");
    recents.append("second".to_string());

    let mut input = ScriptedInput::new([
        alt(KeyCode::Up),
        alt(KeyCode::Down),
        KeyEvent::new(KeyCode::F(5)),
    ]);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();

    let result = Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(result.as_deref(), Some("second"));
}

#[test]
fn error_overlay_shows_for_exactly_one_frame() {
    let mut recents = recent_queries("abcd");
    let mut input = ScriptedInput::new([
        KeyEvent::new(KeyCode::Char('x')),
        KeyEvent::new(KeyCode::Esc),
    ]);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();

    let errors = vec![CompileError {
        description: "unknown token".to_string(),
        start: 0,
        len: 2,
    }];
    Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string_with_errors(errors)
        .unwrap();

    let first = &renderer.frames[0];
    assert!(first.has_error_span());
    // the description paints on its own row below the buffer
    assert_eq!(first.rows.last().unwrap().1, "unknown token");
    assert_eq!(first.cleared_from, 2);

    let second = &renderer.frames[1];
    assert!(!second.has_error_span());
    assert_eq!(second.rows.len(), 1);
    assert_eq!(second.cleared_from, 1);
}

#[test]
fn session_opens_with_cursor_at_end_of_seed() {
    let mut recents = recent_queries("abc");
    let mut input = ScriptedInput::new([KeyEvent::new(KeyCode::Esc)]);
    let mut renderer = RecordingRenderer::new(80);
    let clip = MemClipboard::default();

    Session::new(&mut input, &mut renderer, &clip, &mut recents)
        .query_string()
        .unwrap();

    assert_eq!(renderer.frames[0].cursor, (3, 0));
}
