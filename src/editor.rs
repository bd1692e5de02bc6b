//! Line-editing collaborator.
//!
//! The session never talks to the terminal's input side directly. It goes
//! through [`LineEditor`], which has two implementations:
//! - `RustylineEditor`: the real thing, with cursor editing and history
//! - `ScriptedEditor`: replays canned lines, for tests and non-interactive use

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::ExecutableCommand;
use rustyline::config::{Behavior, Configurer};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

use crate::types::{EditorConfig, OutputStream};

/// Application directory name under the platform data dir.
const APP_DIR: &str = "boxprompt";

/// History filename within the application directory.
const HISTORY_FILENAME: &str = "history.txt";

// ============================================================================
// TRAIT
// ============================================================================

/// What the prompt primitive needs from a line editor.
pub trait LineEditor {
    /// Block until the user submits a line.
    ///
    /// Returns `Ok(None)` when the user cancels (end of input or interrupt).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Record a line for later recall.
    fn add_history(&mut self, line: &str);

    /// Clear the terminal viewport.
    fn clear_screen(&mut self) -> io::Result<()>;
}

// ============================================================================
// RUSTYLINE
// ============================================================================

/// Returns the default history file location.
///
/// On Linux: ~/.local/share/boxprompt/history.txt
pub fn default_history_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(HISTORY_FILENAME)
}

/// Interactive editor backed by rustyline.
///
/// History is only added explicitly through [`LineEditor::add_history`],
/// never automatically, so the session controls what gets recorded.
pub struct RustylineEditor {
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
    output: OutputStream,
}

impl RustylineEditor {
    /// Open an editor, loading history from `config.history_file` if it exists.
    ///
    /// A missing history file is skipped silently, an unreadable one with a
    /// warning.
    ///
    /// With `OutputStream::Stderr` the prompt is drawn on the controlling
    /// terminal rather than stdout.
    pub fn open(config: &EditorConfig) -> io::Result<Self> {
        let behavior = match config.output {
            OutputStream::Stdout => Behavior::Stdio,
            OutputStream::Stderr => Behavior::PreferTerm,
        };
        let rl_config = Config::builder().behavior(behavior).build();

        let mut editor = DefaultEditor::with_config(rl_config).map_err(to_io)?;
        editor.set_auto_add_history(false);
        editor.set_max_history_size(config.max_history).map_err(to_io)?;

        if let Some(path) = &config.history_file {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }

        Ok(Self {
            editor,
            history_file: config.history_file.clone(),
            output: config.output,
        })
    }

    /// Write history back to the configured file, creating its directory.
    ///
    /// No-op when no history file is configured.
    pub fn save_history(&mut self) -> io::Result<()> {
        let Some(path) = &self.history_file else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.editor.save_history(path).map_err(to_io)?;
        tracing::debug!(path = %path.display(), "history saved");
        Ok(())
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(to_io(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            tracing::warn!(error = %e, "could not record history entry");
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        match self.output {
            OutputStream::Stdout => clear_on(&mut io::stdout()),
            OutputStream::Stderr => clear_on(&mut io::stderr()),
        }
    }
}

/// Clear the viewport and home the cursor, on whichever stream `out` is.
fn clear_on(out: &mut impl Write) -> io::Result<()> {
    out.execute(Clear(ClearType::All))?.execute(MoveTo(0, 0))?;
    Ok(())
}

fn to_io(e: ReadlineError) -> io::Error {
    match e {
        ReadlineError::Io(e) => e,
        other => io::Error::other(other.to_string()),
    }
}

// ============================================================================
// SCRIPTED
// ============================================================================

/// Editor that replays a fixed sequence of lines.
///
/// Reports cancellation once the script runs out, the same way a real
/// terminal reports Ctrl-D. Everything the session does to it is recorded
/// so tests can assert on prompts, history and redraws.
#[derive(Debug, Default)]
pub struct ScriptedEditor {
    lines: VecDeque<String>,
    /// Every prompt passed to `read_line`, in order.
    pub prompts: Vec<String>,
    /// Every entry passed to `add_history`, in order.
    pub history: Vec<String>,
    /// Number of `clear_screen` calls.
    pub clears: usize,
}

impl ScriptedEditor {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scripted_replays_in_order_then_cancels() {
        let mut editor = ScriptedEditor::new(["one", "two"]);

        assert_eq!(editor.read_line("a: ").unwrap(), Some("one".to_string()));
        assert_eq!(editor.remaining(), 1);
        assert_eq!(editor.read_line("b: ").unwrap(), Some("two".to_string()));
        assert_eq!(editor.read_line("c: ").unwrap(), None);

        assert_eq!(editor.prompts, vec!["a: ", "b: ", "c: "]);
    }

    #[test]
    fn scripted_records_history_and_clears() {
        let mut editor = ScriptedEditor::default();
        editor.add_history("x");
        editor.clear_screen().unwrap();
        editor.clear_screen().unwrap();

        assert_eq!(editor.history, vec!["x"]);
        assert_eq!(editor.clears, 2);
    }

    #[test]
    fn clear_writes_only_to_given_stream() {
        let mut out = Vec::new();
        clear_on(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[2J"));
        assert!(written.ends_with("\x1b[1;1H"));
    }

    #[test]
    fn rustyline_open_on_stderr() {
        let config = EditorConfig {
            output: OutputStream::Stderr,
            ..Default::default()
        };
        let editor = RustylineEditor::open(&config).unwrap();
        assert_eq!(editor.output, OutputStream::Stderr);
    }

    #[test]
    fn default_history_path_ends_with_app_file() {
        let path = default_history_path();
        assert!(path.ends_with("boxprompt/history.txt"));
    }

    #[test]
    fn rustyline_open_tolerates_missing_history_file() {
        let dir = TempDir::new().unwrap();
        let config = EditorConfig {
            history_file: Some(dir.path().join("missing").join("history.txt")),
            ..Default::default()
        };

        assert!(RustylineEditor::open(&config).is_ok());
    }

    #[test]
    fn rustyline_saves_history_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.txt");
        let config = EditorConfig {
            history_file: Some(path.clone()),
            ..Default::default()
        };

        let mut editor = RustylineEditor::open(&config).unwrap();
        editor.add_history("hello");
        editor.save_history().unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("hello"));
    }

    #[test]
    fn rustyline_save_without_file_is_noop() {
        let mut editor = RustylineEditor::open(&EditorConfig::default()).unwrap();
        assert!(editor.save_history().is_ok());
    }
}
