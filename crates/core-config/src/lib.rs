//! Configuration loading and parsing.
//!
//! `quill.toml` is looked up next to the working directory first, then under
//! the platform config dir. A missing or unparseable file degrades to
//! defaults; the editor must always come up. Unknown fields are ignored so
//! the format can grow without breaking older files.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::warn;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EditorConfig {
    /// Pin the usable width instead of querying the terminal.
    #[serde(default)]
    pub width: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// How many past queries the recall history keeps.
    #[serde(default = "HistoryConfig::default_recents")]
    pub recents: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recents: Self::default_recents(),
        }
    }
}

impl HistoryConfig {
    const fn default_recents() -> usize {
        50
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("quill.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join("quill.toml");
    }
    PathBuf::from("quill.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => Ok(config),
        Err(error) => {
            warn!(target: "config", path = %path.display(), %error, "parse_failed");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn defaults_when_file_missing() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.editor.width, None);
        assert_eq!(cfg.history.recents, 50);
    }

    #[test]
    fn parses_all_sections() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nwidth = 120\n[history]\nrecents = 10\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.width, Some(120));
        assert_eq!(cfg.history.recents, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nwidth = 100\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.width, Some(100));
        assert_eq!(cfg.history.recents, 50);
    }

    #[test]
    fn unparseable_file_degrades_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "editor = not toml [").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.width, None);
        assert_eq!(cfg.history.recents, 50);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor]\nwidth = 90\nfont = \"mono\"\n").unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.editor.width, Some(90));
    }
}
