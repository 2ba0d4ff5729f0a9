//! Interactive query-editing session.
//!
//! The session turns a stream of key events into an immutable
//! [`core_buffer::EditorState`] per keystroke, paints each state through a
//! [`Renderer`], and finishes with either the query text to run or a
//! cancellation. Terminal, keyboard, and clipboard are trait seams so the
//! whole loop runs under test against in-memory doubles.

pub mod command;
pub mod edit;
pub mod event;
pub mod motion;
pub mod selection;
pub mod session;
pub mod traits;

pub use command::{Command, decode};
pub use event::{KeyCode, KeyEvent, Modifiers};
pub use session::{RecentQueries, Session, UndoTimeline, recent_queries};
pub use traits::{Clipboard, InputSource, Renderer};
