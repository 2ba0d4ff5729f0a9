//! Collaborator seams. The session only ever talks to the terminal, the
//! keyboard, and the clipboard through these traits, which is what lets the
//! integration tests drive a full session with scripted doubles.

use anyhow::Result;
use core_highlight::Span;

use crate::event::KeyEvent;

/// Blocking source of normalized key events.
pub trait InputSource {
    fn read_key(&mut self) -> Result<KeyEvent>;
}

/// Paint target for one frame. Rows are painted top to bottom, then
/// everything below the last painted row is cleared and the cursor placed.
pub trait Renderer {
    /// Usable columns. Edits never grow a line past `width - 1`.
    fn width(&self) -> usize;

    /// Paint `text` at `row` using the finalized `spans` for colors.
    fn paint(&mut self, row: usize, text: &str, spans: &[Span]) -> Result<()>;

    /// Clear every row at and below `row`.
    fn clear_from(&mut self, row: usize) -> Result<()>;

    /// Place the terminal cursor. Ends the frame.
    fn set_cursor(&mut self, column: usize, row: usize) -> Result<()>;
}

/// System clipboard. `Sync` because copy hands the write to a scoped worker
/// thread; failures are the implementation's problem to log and swallow.
pub trait Clipboard: Send + Sync {
    fn text(&self) -> Option<String>;
    fn set_text(&self, text: &str);
}
