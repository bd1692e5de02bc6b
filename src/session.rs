//! Prompt session: the single handle through which all terminal interaction flows.
//!
//! A `Session` owns the line editor (input, history, clearing) and the output
//! writer (boxes, rules, menus). Every operation takes `&mut self`: the
//! terminal is one shared resource and interaction is strictly sequential.
//!
//! Layering:
//! - `line`: the prompt primitive (trim, record history)
//! - `non_empty`, `int`, `float`, `menu`: retry loops built on `line`
//! - `clear`, `rule`, `draw_box`: display primitives, independent leaves

use std::io::{self, Write};

use crate::draw::{boxed, rule};
use crate::editor::LineEditor;
use crate::menu::{Menu, MenuItem};
use crate::parse::{parse_float, parse_int};
use crate::types::{PromptError, SessionConfig};

/// Prompt used by the menu loop.
const SELECTION_PROMPT: &str = "Selection";

/// Interactive session over an editor `E`, writing to `W`.
pub struct Session<E, W = io::Stdout> {
    editor: E,
    out: W,
    config: SessionConfig,
}

impl<E: LineEditor> Session<E, io::Stdout> {
    /// Session writing to standard output.
    pub fn new(editor: E, config: SessionConfig) -> Self {
        Self::with_writer(editor, io::stdout(), config)
    }
}

impl<E: LineEditor, W: Write> Session<E, W> {
    pub fn with_writer(editor: E, out: W, config: SessionConfig) -> Self {
        Self { editor, out, config }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Give back the editor and writer.
    pub fn into_parts(self) -> (E, W) {
        (self.editor, self.out)
    }

    // ========================================================================
    // DISPLAY PRIMITIVES
    // ========================================================================

    /// Clear the screen.
    pub fn clear(&mut self) -> Result<(), PromptError> {
        self.out.flush()?;
        self.editor.clear_screen()?;
        Ok(())
    }

    /// Write a full-width horizontal rule.
    pub fn rule(&mut self) -> Result<(), PromptError> {
        self.out.write_all(rule().as_bytes())?;
        Ok(())
    }

    /// Write `text` as is, for callers interleaving their own output.
    pub fn write_text(&mut self, text: &str) -> Result<(), PromptError> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Write `text` framed in a box.
    pub fn draw_box(&mut self, text: &str) -> Result<(), PromptError> {
        self.out.write_all(boxed(text).as_bytes())?;
        Ok(())
    }

    // ========================================================================
    // PROMPT PRIMITIVE
    // ========================================================================

    /// Ask for one line of text. The prompt is shown with `": "` appended.
    ///
    /// Returns the input with surrounding whitespace removed, possibly
    /// empty. Non-empty input is added to the editor's history.
    ///
    /// # Errors
    /// `PromptError::Cancelled` when the user ends input (Ctrl-D / Ctrl-C).
    /// Callers that want the classic "quit quietly" behavior should exit
    /// the process with a success status on that variant.
    pub fn line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.out.flush()?;

        let raw = self
            .editor
            .read_line(&format!("{prompt}: "))?
            .ok_or(PromptError::Cancelled)?;
        tracing::trace!(prompt, "line read");

        let text = raw.trim();
        if !text.is_empty() {
            self.editor.add_history(text);
        }

        Ok(text.to_string())
    }

    // ========================================================================
    // TYPED PROMPTS
    // ========================================================================

    /// Ask until the user enters something other than whitespace.
    pub fn non_empty(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.retry(prompt, |text| (!text.is_empty()).then(|| text.to_string()))
    }

    /// Ask until the input is a base-10 integer.
    pub fn int(&mut self, prompt: &str) -> Result<i64, PromptError> {
        self.retry(prompt, parse_int)
    }

    /// Ask until the input is a floating point number.
    pub fn float(&mut self, prompt: &str) -> Result<f64, PromptError> {
        self.retry(prompt, parse_float)
    }

    /// Prompt repeatedly until `accept` yields a value.
    ///
    /// Rejections are silent for the user. Bounded by `max_attempts` if set.
    fn retry<T>(
        &mut self,
        prompt: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<T, PromptError> {
        let mut rejected = 0;
        loop {
            let text = self.line(prompt)?;
            if let Some(value) = accept(&text) {
                return Ok(value);
            }

            rejected += 1;
            tracing::debug!(prompt, input = %text, rejected, "input rejected");
            self.check_attempts(rejected)?;
        }
    }

    // ========================================================================
    // MENU
    // ========================================================================

    /// Show `menu` and ask for a key until one of its keys is entered.
    ///
    /// An invalid selection clears the screen and redraws the whole menu.
    pub fn menu(&mut self, menu: &Menu) -> Result<String, PromptError> {
        let frame = menu.render();
        let mut rejected = 0;

        loop {
            self.out.write_all(frame.as_bytes())?;

            let selection = self.line(SELECTION_PROMPT)?;
            if menu.is_valid(&selection) {
                tracing::debug!(title = menu.title(), %selection, "menu selection");
                return Ok(selection);
            }

            rejected += 1;
            tracing::debug!(
                title = menu.title(),
                %selection,
                rejected,
                "invalid selection, redrawing"
            );
            self.check_attempts(rejected)?;
            self.clear()?;
        }
    }

    /// Build a menu from its parts and run it.
    ///
    /// # Errors
    /// `PromptError::Menu` if the specification is invalid, before anything
    /// is drawn.
    pub fn prompt_menu<I, T>(
        &mut self,
        title: &str,
        extra_lines: Vec<String>,
        items: I,
    ) -> Result<String, PromptError>
    where
        I: IntoIterator<Item = T>,
        T: Into<MenuItem>,
    {
        let menu = Menu::new(title, extra_lines, items)?;
        self.menu(&menu)
    }

    fn check_attempts(&self, rejected: usize) -> Result<(), PromptError> {
        match self.config.max_attempts {
            Some(max) if rejected >= max.get() => {
                Err(PromptError::AttemptsExhausted { attempts: rejected })
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
