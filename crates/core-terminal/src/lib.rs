//! Crossterm-facing collaborators.
//!
//! The session core never touches crossterm directly; this crate implements
//! its `Renderer`, `InputSource`, and `Clipboard` seams and owns raw-mode
//! and alternate-screen state.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod clipboard;
pub mod console;

pub use clipboard::SystemClipboard;
pub use console::{Console, ConsoleInput};

/// Raw-mode + alternate-screen state. Entering hands out an RAII guard that
/// restores the terminal on drop, so an early return or propagated error
/// never leaves the shell in raw mode. The cursor is deliberately left
/// visible; the edit loop positions the real terminal cursor every frame.
pub struct Screen {
    raw: bool,
}

pub struct ScreenGuard<'a> {
    screen: &'a mut Screen,
}

impl Screen {
    pub fn new() -> Self {
        Self { raw: false }
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    /// Switch to raw mode on the alternate screen; the guard switches back.
    pub fn enter(&mut self) -> Result<ScreenGuard<'_>> {
        if !self.raw {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen)?;
            self.raw = true;
        }
        Ok(ScreenGuard { screen: self })
    }

    fn leave(&mut self) {
        if self.raw {
            let _ = execute!(stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
            self.raw = false;
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        self.leave();
    }
}

impl<'a> Drop for ScreenGuard<'a> {
    fn drop(&mut self) {
        self.screen.leave();
    }
}

/// Chain a panic hook that puts the terminal back into cooked mode before
/// the default hook prints, so the report stays readable.
pub fn install_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        tracing::error!(target: "runtime.panic", ?info, "panic");
        default_panic(info);
    }));
}
