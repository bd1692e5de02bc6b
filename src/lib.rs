//! boxprompt: Boxed titles, separator rules and validated line prompts.
//!
//! All interaction goes through a [`session::Session`], which owns the line
//! editor and the output stream. Cancellation (Ctrl-D / Ctrl-C) comes back
//! as [`types::PromptError::Cancelled`]; the caller decides whether to exit.

pub mod draw;
pub mod editor;
pub mod menu;
pub mod parse;
pub mod report;
pub mod session;
pub mod types;
