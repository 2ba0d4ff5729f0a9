//! Key decoding.
//!
//! A raw [`KeyEvent`] decodes into at most one [`Command`]. Decoding is
//! strictly ordered: control-modified commands claim their keys first, then
//! the terminal transitions and navigation keys, and only then does a
//! printable character fall through to `Insert`. A key nothing claims
//! decodes to `None` and the session ignores it.

use core_buffer::EditorState;

use crate::edit;
use crate::event::{KeyCode, KeyEvent, Modifiers};
use crate::motion;
use crate::traits::Clipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // control-modified
    SelectAll,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    // terminal transitions
    Run,
    Cancel,
    RecallPrevious,
    RecallNext,
    // navigation
    Left { select: bool },
    Right { select: bool },
    Up { select: bool },
    Down { select: bool },
    Home { select: bool },
    End { select: bool },
    // structural edits
    Enter,
    Backspace,
    // printable fall-through
    Insert(char),
}

pub fn decode(event: KeyEvent) -> Option<Command> {
    if event.mods.contains(Modifiers::CTRL) {
        let KeyCode::Char(c) = event.code else {
            return None;
        };
        return match c.to_ascii_lowercase() {
            'a' => Some(Command::SelectAll),
            'x' => Some(Command::Cut),
            'c' => Some(Command::Copy),
            'v' => Some(Command::Paste),
            'z' => Some(Command::Undo),
            'y' => Some(Command::Redo),
            _ => None,
        };
    }
    if event.mods.contains(Modifiers::ALT) {
        return match event.code {
            KeyCode::Up => Some(Command::RecallPrevious),
            KeyCode::Down => Some(Command::RecallNext),
            _ => None,
        };
    }
    let select = event.mods.contains(Modifiers::SHIFT);
    match event.code {
        KeyCode::F(5) => Some(Command::Run),
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Left => Some(Command::Left { select }),
        KeyCode::Right => Some(Command::Right { select }),
        KeyCode::Up => Some(Command::Up { select }),
        KeyCode::Down => Some(Command::Down { select }),
        KeyCode::Home => Some(Command::Home { select }),
        KeyCode::End => Some(Command::End { select }),
        KeyCode::Enter => Some(Command::Enter),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Char(c) if !c.is_control() => Some(Command::Insert(c)),
        _ => None,
    }
}

/// Apply an editing command to `state`. The session handles the transition
/// and history commands itself; routing one here is a programmer error.
pub fn apply_edit(
    command: &Command,
    state: &EditorState,
    width: usize,
    clipboard: &dyn Clipboard,
) -> EditorState {
    match command {
        Command::Insert(ch) => edit::insert_char(state, *ch, width),
        Command::Enter => edit::split_line(state),
        Command::Backspace => edit::backspace(state),
        Command::Left { select } => motion::left(state, *select, width),
        Command::Right { select } => motion::right(state, *select, width),
        Command::Up { select } => motion::up(state, *select),
        Command::Down { select } => motion::down(state, *select),
        Command::Home { select } => motion::home(state, *select),
        Command::End { select } => motion::end(state, *select),
        Command::SelectAll => motion::select_all(state),
        Command::Cut => edit::cut(state, clipboard),
        Command::Copy => edit::copy(state, clipboard),
        Command::Paste => edit::paste(state, clipboard),
        Command::Run
        | Command::Cancel
        | Command::RecallPrevious
        | Command::RecallNext
        | Command::Undo
        | Command::Redo => unreachable!("handled by the session loop"),
    }
}
