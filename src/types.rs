//! Domain types for boxprompt.
//!
//! Configuration, output format and the error algebra shared by every
//! prompt. No behavior beyond construction and display.

use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::path::PathBuf;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration for a prompt session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Maximum number of rejected inputs before a prompt gives up.
    /// None = retry forever. Zero is unrepresentable: a prompt always
    /// gets at least one try.
    pub max_attempts: Option<NonZeroUsize>,
}

/// Configuration for the rustyline-backed editor.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// History file loaded on open and written by `save_history`.
    /// None = in-memory history only.
    pub history_file: Option<PathBuf>,
    /// Maximum number of history entries kept by the editor.
    pub max_history: usize,
    /// Where the editor draws: screen clears, and the prompt when
    /// attached to a terminal.
    pub output: OutputStream,
}

/// A standard output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStream {
    #[default]
    Stdout,
    /// Keeps stdout free for a machine-readable document.
    Stderr,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_file: None,
            max_history: 1000,
            output: OutputStream::Stdout,
        }
    }
}

/// Output format for collected answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable, echoed as each answer arrives.
    #[default]
    Human,
    /// Machine-readable JSON, printed once at the end.
    Json,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a menu specification was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// No items: the selection loop could never terminate.
    Empty,
    /// The same key appears more than once.
    DuplicateKey { key: String },
    /// Empty key, or key with surrounding whitespace. Input is trimmed
    /// before matching, so such a key can never be selected.
    UnselectableKey { key: String },
}

/// Failure of a prompt operation.
///
/// Parse failures and invalid selections are not errors: they are retried.
/// They only surface as `AttemptsExhausted` when a bound is configured.
#[derive(Debug)]
pub enum PromptError {
    /// The editor signalled end of input (Ctrl-D) or an interrupt (Ctrl-C).
    Cancelled,
    /// `SessionConfig::max_attempts` inputs were rejected in a row.
    AttemptsExhausted { attempts: usize },
    /// The menu specification is invalid.
    Menu(MenuError),
    /// Terminal or editor I/O failed.
    Io(io::Error),
}

impl PromptError {
    /// True when the user asked to stop, as opposed to something failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PromptError::Cancelled)
    }
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::Io(e)
    }
}

impl From<MenuError> for PromptError {
    fn from(e: MenuError) -> Self {
        PromptError::Menu(e)
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuError::Empty => write!(f, "Menu has no items"),
            MenuError::DuplicateKey { key } => write!(f, "Duplicate menu key: {:?}", key),
            MenuError::UnselectableKey { key } => {
                write!(f, "Menu key can never be selected: {:?}", key)
            }
        }
    }
}

impl std::error::Error for MenuError {}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptError::Cancelled => write!(f, "Input cancelled"),
            PromptError::AttemptsExhausted { attempts } => {
                write!(f, "No valid input after {} attempts", attempts)
            }
            PromptError::Menu(e) => write!(f, "Invalid menu: {}", e),
            PromptError::Io(e) => write!(f, "Terminal I/O failed: {}", e),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PromptError::Menu(e) => Some(e),
            PromptError::Io(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_config_defaults_to_unbounded() {
        assert_eq!(SessionConfig::default().max_attempts, None);
    }

    #[test]
    fn editor_config_defaults_to_in_memory_history() {
        let config = EditorConfig::default();
        assert!(config.history_file.is_none());
        assert_eq!(config.max_history, 1000);
        assert_eq!(config.output, OutputStream::Stdout);
    }

    #[test]
    fn only_cancelled_is_cancelled() {
        assert!(PromptError::Cancelled.is_cancelled());
        assert!(!PromptError::AttemptsExhausted { attempts: 3 }.is_cancelled());
        assert!(!PromptError::Menu(MenuError::Empty).is_cancelled());
    }

    #[test]
    fn menu_error_converts_and_chains_source() {
        use std::error::Error;

        let err: PromptError = MenuError::DuplicateKey { key: "a".into() }.into();
        assert_eq!(err.to_string(), "Invalid menu: Duplicate menu key: \"a\"");
        assert!(err.source().is_some());
    }

    #[test]
    fn io_error_converts() {
        let err: PromptError = io::Error::other("broken pipe").into();
        assert!(matches!(err, PromptError::Io(_)));
        assert!(err.to_string().contains("broken pipe"));
    }
}
