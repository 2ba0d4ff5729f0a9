//! Quill entrypoint.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use core_buffer::normalize_separators;
use core_highlight::overlay::CompileError;
use core_session::{RecentQueries, Session, recent_queries};
use core_terminal::{Console, ConsoleInput, Screen, SystemClipboard};

mod lint;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Interactive query editor")]
struct Args {
    /// Optional path to a query file preloaded into the editor.
    pub path: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    core_terminal::install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let seed = load_seed(args.path.as_deref());
    let mut recents = recent_queries(seed);

    let mut screen = Screen::new();
    screen.set_title("Quill")?;
    let accepted = {
        let _guard = screen.enter()?;
        let mut renderer = Console::new(config.editor.width.map(usize::from));
        let mut input = ConsoleInput::new();
        let clipboard = SystemClipboard::new();
        edit_until_clean(
            &mut input,
            &mut renderer,
            &clipboard,
            &mut recents,
            config.history.recents,
        )?
    };

    match accepted {
        Some(query) => {
            info!(target: "runtime", bytes = query.len(), "accepted");
            println!("{query}");
        }
        None => info!(target: "runtime", "cancelled"),
    }
    Ok(())
}

/// Run edit sessions until the query lints clean or the user cancels. A
/// rejected query reopens immediately with its errors overlaid.
fn edit_until_clean(
    input: &mut ConsoleInput,
    renderer: &mut Console,
    clipboard: &SystemClipboard,
    recents: &mut RecentQueries,
    recents_cap: usize,
) -> Result<Option<String>> {
    let mut pending: Option<Vec<CompileError>> = None;
    loop {
        let mut session = Session::new(input, renderer, clipboard, recents);
        let result = match pending.take() {
            Some(errors) => session.query_string_with_errors(errors),
            None => session.query_string(),
        }?;
        let Some(text) = result else {
            return Ok(None);
        };
        let errors = lint::check(&text);
        if errors.is_empty() {
            recents.trim_past(recents_cap);
            return Ok(Some(text));
        }
        warn!(target: "compile", count = errors.len(), "rejected");
        pending = Some(errors);
    }
}

fn load_seed(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = content.len(),
                "file_read_ok"
            );
            normalize_separators(content.trim_end_matches(['\r', '\n']))
        }
        Err(e) => {
            error!(target: "io", ?e, "file_open_error");
            String::new()
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("quill.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "quill.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        // global subscriber already installed; drop the guard so the writer shuts down
        Err(_) => None,
    }
}
