//! boxprompt CLI
//!
//! Walks through every prompt kind: a menu, then string, non-empty string,
//! integer and float prompts, echoing each answer.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use boxprompt::editor::{default_history_path, LineEditor, RustylineEditor};
use boxprompt::report::{format_answers, format_echo, Answer, AnswerValue};
use boxprompt::session::Session;
use boxprompt::types::{EditorConfig, OutputFormat, OutputStream, PromptError, SessionConfig};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "BOXPROMPT_LOG";

#[derive(Parser)]
#[command(name = "boxprompt")]
#[command(about = "Interactive walkthrough of boxed menus and validated prompts")]
#[command(version)]
struct Cli {
    /// Output format for answers
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormatArg,

    /// Give up after this many invalid inputs to a single prompt (at least 1)
    #[arg(long)]
    max_attempts: Option<NonZeroUsize>,

    /// History file (default: platform data directory)
    #[arg(long, conflicts_with = "no_history")]
    history: Option<PathBuf>,

    /// Keep history in memory only
    #[arg(long)]
    no_history: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let format: OutputFormat = cli.format.into();
    let editor_config = EditorConfig {
        history_file: if cli.no_history {
            None
        } else {
            Some(cli.history.unwrap_or_else(default_history_path))
        },
        output: interactive_stream(format),
        ..Default::default()
    };
    let session_config = SessionConfig {
        max_attempts: cli.max_attempts,
    };

    match run(&editor_config, session_config, format) {
        Ok(()) => ExitCode::SUCCESS,
        // Ctrl-D / Ctrl-C: the user is done, not an error.
        Err(PromptError::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never interleave with prompts on stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// WALKTHROUGH
// ============================================================================

/// Stream for menus, prompts and echoes.
///
/// JSON mode keeps stdout for the answer document alone.
fn interactive_stream(format: OutputFormat) -> OutputStream {
    match format {
        OutputFormat::Human => OutputStream::Stdout,
        OutputFormat::Json => OutputStream::Stderr,
    }
}

fn run(
    editor_config: &EditorConfig,
    session_config: SessionConfig,
    format: OutputFormat,
) -> Result<(), PromptError> {
    let editor = RustylineEditor::open(editor_config)?;
    let out: Box<dyn Write> = match editor_config.output {
        OutputStream::Stdout => Box::new(io::stdout()),
        OutputStream::Stderr => Box::new(io::stderr()),
    };
    let mut session = Session::with_writer(editor, out, session_config);

    let result = walkthrough(&mut session, format);

    // Keep what was typed even if the walkthrough was cut short.
    if let Err(e) = session.editor_mut().save_history() {
        tracing::warn!(error = %e, "could not save history");
    }

    let answers = result?;
    emit_document(&mut io::stdout(), &answers, format)?;

    Ok(())
}

/// Write the final answer document. Human mode already echoed everything.
fn emit_document(out: &mut impl Write, answers: &[Answer], format: OutputFormat) -> io::Result<()> {
    if format == OutputFormat::Json {
        out.write_all(format_answers(answers, format).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn walkthrough<E: LineEditor, W: Write>(
    session: &mut Session<E, W>,
    format: OutputFormat,
) -> Result<Vec<Answer>, PromptError> {
    let mut answers = Vec::new();

    session.clear()?;

    let choice = session.prompt_menu(
        "My Title",
        vec![],
        [("a", "Ace"), ("b", "Base"), ("c", "Case?")],
    )?;
    record(session, &mut answers, format, Answer::new("My Title", AnswerValue::Text(choice)))?;

    let prompt = "String input";
    let s = session.line(prompt)?;
    record(session, &mut answers, format, Answer::new(prompt, AnswerValue::Text(s)))?;

    let prompt = "String input (not empty)";
    let s = session.non_empty(prompt)?;
    record(session, &mut answers, format, Answer::new(prompt, AnswerValue::Text(s)))?;

    let prompt = "Integer input";
    let i = session.int(prompt)?;
    record(session, &mut answers, format, Answer::new(prompt, AnswerValue::Int(i)))?;

    let prompt = "Float input";
    let x = session.float(prompt)?;
    record(session, &mut answers, format, Answer::new(prompt, AnswerValue::Float(x)))?;

    Ok(answers)
}

/// Keep an answer, echoing it first in human mode.
fn record<E: LineEditor, W: Write>(
    session: &mut Session<E, W>,
    answers: &mut Vec<Answer>,
    format: OutputFormat,
    answer: Answer,
) -> Result<(), PromptError> {
    if format == OutputFormat::Human {
        session.write_text(&format_echo(&answer))?;
        session.rule()?;
    }
    answers.push(answer);
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use boxprompt::editor::ScriptedEditor;

    const SCRIPT: [&str; 6] = ["z", "a", "hi", "x", "1", "2.5"];

    fn scripted(lines: &[&str]) -> Session<ScriptedEditor, Vec<u8>> {
        Session::with_writer(
            ScriptedEditor::new(lines.iter().copied()),
            Vec::new(),
            SessionConfig::default(),
        )
    }

    // --- Output separation ---

    #[test]
    fn json_stream_carries_only_the_document() {
        let mut session = scripted(&SCRIPT);
        let answers = walkthrough(&mut session, OutputFormat::Json).unwrap();

        let mut document = Vec::new();
        emit_document(&mut document, &answers, OutputFormat::Json).unwrap();
        let document = String::from_utf8(document).unwrap();

        assert_eq!(document, format_answers(&answers, OutputFormat::Json));
        let parsed: serde_json::Value = serde_json::from_str(&document).expect("Invalid JSON");
        assert_eq!(parsed["answers"].as_array().unwrap().len(), 5);

        // Menus went to the interactive stream, echoes were suppressed.
        let interactive = String::from_utf8(session.writer().clone()).unwrap();
        assert!(interactive.contains("│ My Title │"));
        assert!(!interactive.contains("Input:"));
    }

    #[test]
    fn human_mode_echoes_on_interactive_stream_and_emits_nothing_else() {
        let mut session = scripted(&SCRIPT);
        let answers = walkthrough(&mut session, OutputFormat::Human).unwrap();

        let mut document = Vec::new();
        emit_document(&mut document, &answers, OutputFormat::Human).unwrap();
        assert!(document.is_empty());

        let interactive = String::from_utf8(session.writer().clone()).unwrap();
        assert!(interactive.contains("Input: a\n┅"));
        assert!(interactive.contains("Input: 2.5\n"));
        assert_eq!(session.editor().clears, 2);
    }

    #[test]
    fn json_mode_draws_on_stderr() {
        assert_eq!(interactive_stream(OutputFormat::Json), OutputStream::Stderr);
        assert_eq!(interactive_stream(OutputFormat::Human), OutputStream::Stdout);
    }

    #[test]
    fn walkthrough_stops_on_cancel() {
        let mut session = scripted(&["a", "hi"]);
        let err = walkthrough(&mut session, OutputFormat::Json).unwrap_err();
        assert!(err.is_cancelled());
    }

    // --- Arguments ---

    #[test]
    fn zero_max_attempts_is_rejected() {
        assert!(Cli::try_parse_from(["boxprompt", "--max-attempts", "0"]).is_err());
    }

    #[test]
    fn positive_max_attempts_is_accepted() {
        let cli = Cli::try_parse_from(["boxprompt", "--max-attempts", "3"]).unwrap();
        assert_eq!(cli.max_attempts, NonZeroUsize::new(3));
    }

    #[test]
    fn history_flags_conflict() {
        let result = Cli::try_parse_from(["boxprompt", "--history", "h.txt", "--no-history"]);
        assert!(result.is_err());
    }
}
