//! System clipboard adapter.
//!
//! Clipboard availability is environment-dependent (headless sessions have
//! none), so failures never surface to the session: they log and degrade to
//! a clipboard that holds nothing.

use std::sync::Mutex;

use tracing::warn;

use core_session::traits::Clipboard;

pub struct SystemClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clip) => Some(clip),
            Err(error) => {
                warn!(target: "clipboard", %error, "clipboard_unavailable");
                None
            }
        };
        Self {
            inner: Mutex::new(inner),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn text(&self) -> Option<String> {
        let mut guard = self.inner.lock().ok()?;
        let clip = guard.as_mut()?;
        match clip.get_text() {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(target: "clipboard", %error, "read_failed");
                None
            }
        }
    }

    fn set_text(&self, text: &str) {
        let Ok(mut guard) = self.inner.lock() else {
            return;
        };
        let Some(clip) = guard.as_mut() else {
            return;
        };
        if let Err(error) = clip.set_text(text.to_string()) {
            warn!(target: "clipboard", %error, "write_failed");
        }
    }
}
