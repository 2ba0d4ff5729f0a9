//! Crossterm-backed renderer and input source.

use std::io::{Stdout, Write, stdout};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{
        Event as CEvent, KeyCode as CKeyCode, KeyEventKind as CKeyEventKind,
        KeyModifiers as CKeyModifiers, read,
    },
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, size},
};
use tracing::trace;

use core_highlight::Span;
use core_session::event::{KeyCode, KeyEvent, Modifiers};
use core_session::traits::{InputSource, Renderer};

const FALLBACK_WIDTH: usize = 80;

/// Paints session frames straight to stdout. Commands are queued per frame
/// and flushed once when the cursor lands.
pub struct Console {
    out: Stdout,
    width_override: Option<usize>,
}

impl Console {
    /// `width_override` pins the usable width regardless of the real
    /// terminal size; `None` queries the terminal each frame.
    pub fn new(width_override: Option<usize>) -> Self {
        Self {
            out: stdout(),
            width_override,
        }
    }
}

impl Renderer for Console {
    fn width(&self) -> usize {
        if let Some(w) = self.width_override {
            return w;
        }
        match size() {
            Ok((cols, _)) => cols as usize,
            Err(_) => FALLBACK_WIDTH,
        }
    }

    fn paint(&mut self, row: usize, text: &str, spans: &[Span]) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, row as u16),
            Clear(ClearType::UntilNewLine)
        )?;
        for span in spans {
            let start = span.start.min(text.len());
            let end = span.end().min(text.len());
            if start >= end {
                continue;
            }
            queue!(
                self.out,
                SetForegroundColor(span.fg),
                SetBackgroundColor(span.bg),
                Print(&text[start..end])
            )?;
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    fn clear_from(&mut self, row: usize) -> Result<()> {
        queue!(
            self.out,
            MoveTo(0, row as u16),
            Clear(ClearType::FromCursorDown)
        )?;
        Ok(())
    }

    fn set_cursor(&mut self, column: usize, row: usize) -> Result<()> {
        queue!(self.out, MoveTo(column as u16, row as u16))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Blocking keyboard reader. Non-key events and key releases are skipped;
/// unsupported key codes fall out of the session's decoder as `None`.
#[derive(Default)]
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for ConsoleInput {
    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            let CEvent::Key(key) = read()? else {
                continue;
            };
            if key.kind == CKeyEventKind::Release {
                continue;
            }
            let Some(code) = map_key_code(&key.code) else {
                trace!(target: "input", code = ?key.code, "unmapped_key");
                continue;
            };
            return Ok(KeyEvent::with(code, map_modifiers(key.modifiers)));
        }
    }
}

fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let mapped = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::F(n) => KeyCode::F(*n),
        _ => return None,
    };
    Some(mapped)
}

fn map_modifiers(mods: CKeyModifiers) -> Modifiers {
    let mut out = Modifiers::empty();
    if mods.contains(CKeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.contains(CKeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.contains(CKeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_editing_keys() {
        assert_eq!(map_key_code(&CKeyCode::Char('q')), Some(KeyCode::Char('q')));
        assert_eq!(map_key_code(&CKeyCode::F(5)), Some(KeyCode::F(5)));
        assert_eq!(map_key_code(&CKeyCode::Home), Some(KeyCode::Home));
        assert_eq!(map_key_code(&CKeyCode::Delete), None);
    }

    #[test]
    fn maps_modifier_flags() {
        let mods = map_modifiers(CKeyModifiers::CONTROL | CKeyModifiers::SHIFT);
        assert!(mods.contains(Modifiers::CTRL));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::ALT));
    }
}
