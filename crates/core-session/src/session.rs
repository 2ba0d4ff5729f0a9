//! The interactive session loop.
//!
//! One call to [`Session::query_string`] owns the terminal until the user
//! runs (F5) or cancels (Esc). Each pass around the loop paints the current
//! state, blocks for a key, decodes it, and dispatches exactly once on the
//! resulting command. Edits flow through the undo timeline; recall swaps in
//! an older query and starts that timeline over.

use anyhow::Result;
use tracing::{debug, trace};

use core_buffer::{EditorState, Position};
use core_highlight::overlay::{CompileError, apply_errors};
use core_highlight::{Palette, Span, SpanKind, highlight};
use core_history::Timeline;

use crate::command::{self, Command};
use crate::traits::{Clipboard, InputSource, Renderer};

pub type StatePredicate = fn(&EditorState, &EditorState) -> bool;
pub type UndoTimeline = Timeline<EditorState, StatePredicate>;

pub type QueryPredicate = fn(&String, &String) -> bool;
pub type RecentQueries = Timeline<String, QueryPredicate>;

fn same_query(a: &String, b: &String) -> bool {
    a == b
}

/// Recent-query history seeded with the query the session opens on.
pub fn recent_queries(seed: impl Into<String>) -> RecentQueries {
    Timeline::new(seed.into(), same_query)
}

/// Load `text` for editing with the cursor at the end of the final line.
fn loaded(text: &str) -> EditorState {
    let state = EditorState::from_text(text);
    let last = state.line_count() - 1;
    let cursor = Position::new(state.line_len(last), last);
    EditorState::new(state.text(), cursor, None)
}

pub struct Session<'a, I: InputSource, R: Renderer> {
    input: &'a mut I,
    renderer: &'a mut R,
    clipboard: &'a dyn Clipboard,
    recents: &'a mut RecentQueries,
    palette: Palette,
    pending_errors: Option<Vec<CompileError>>,
}

impl<'a, I: InputSource, R: Renderer> Session<'a, I, R> {
    pub fn new(
        input: &'a mut I,
        renderer: &'a mut R,
        clipboard: &'a dyn Clipboard,
        recents: &'a mut RecentQueries,
    ) -> Self {
        Self {
            input,
            renderer,
            clipboard,
            recents,
            palette: Palette::default(),
            pending_errors: None,
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Edit until run or cancel. `Some(text)` on run (also appended to the
    /// recent-query history), `None` on cancel.
    pub fn query_string(&mut self) -> Result<Option<String>> {
        self.edit_loop()
    }

    /// Same as [`Self::query_string`], but the first frame overlays the
    /// given compile errors. The overlay is one-shot: any keystroke clears
    /// it.
    pub fn query_string_with_errors(
        &mut self,
        errors: Vec<CompileError>,
    ) -> Result<Option<String>> {
        self.pending_errors = Some(errors);
        self.edit_loop()
    }

    fn edit_loop(&mut self) -> Result<Option<String>> {
        let mut state = loaded(self.recents.current());
        let mut undo: UndoTimeline =
            Timeline::new(state.clone(), EditorState::same_edit_as as StatePredicate);
        loop {
            self.repaint(&state)?;
            let event = self.input.read_key()?;
            let Some(cmd) = command::decode(event) else {
                continue;
            };
            trace!(target: "session", command = ?cmd, "dispatch");
            match cmd {
                Command::Run => {
                    let text = state.text().to_string();
                    self.recents.append_keeping_future(text.clone());
                    debug!(target: "session", bytes = text.len(), "run");
                    return Ok(Some(text));
                }
                Command::Cancel => {
                    debug!(target: "session", "cancel");
                    return Ok(None);
                }
                Command::RecallPrevious => {
                    state = loaded(&self.recents.go_back().clone());
                    undo.reset(state.clone());
                }
                Command::RecallNext => {
                    state = loaded(&self.recents.go_forward().clone());
                    undo.reset(state.clone());
                }
                Command::Undo => {
                    state = undo.go_back().clone();
                }
                Command::Redo => {
                    state = undo.go_forward().clone();
                }
                ref edit => {
                    let next =
                        command::apply_edit(edit, &state, self.renderer.width(), self.clipboard);
                    undo.append(next.clone());
                    state = next;
                }
            }
        }
    }

    fn repaint(&mut self, state: &EditorState) -> Result<()> {
        let lines = state.lines();
        let mut spans = highlight(&lines, &self.palette);
        let mut notes = Vec::new();
        // overlay is one-shot: taken here, gone by the next frame
        if let Some(errors) = self.pending_errors.take() {
            apply_errors(&mut spans, &lines, &errors, &self.palette);
            notes = errors.into_iter().map(|e| e.description).collect();
        }
        for (row, (line, line_spans)) in lines.iter().zip(&spans).enumerate() {
            self.renderer.paint(row, line, line_spans)?;
        }
        let mut row = lines.len();
        for note in &notes {
            let span = Span::new(0, note.len(), SpanKind::Error, &self.palette);
            self.renderer.paint(row, note, &[span])?;
            row += 1;
        }
        self.renderer.clear_from(row)?;
        let cursor = state.cursor();
        let col = cursor.column.min(self.renderer.width().saturating_sub(1));
        self.renderer.set_cursor(col, cursor.row)
    }
}
