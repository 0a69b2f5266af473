// src/picker/mod.rs

//! Pluggable "pick one line" collaborators.
//!
//! The session talks to a `Picker` instead of a concrete process:
//! - [`CommandPicker`] pipes options into an external dmenu-style program
//!   (rofi, dmenu, fzf, ...) and reads back the chosen or typed line.
//! - The terminal console implements `Picker` too (see
//!   `session::console`), for when no command is configured.
//! - Tests provide scripted pickers that never spawn anything.
//!
//! [`UrlOpener`] follows the same shape for "Visit URL".

pub mod command;
pub mod opener;

use std::future::Future;
use std::pin::Pin;

use crate::errors::{DuelistError, Result};

pub use command::CommandPicker;
pub use opener::{CommandOpener, UrlOpener};

/// Boxed future returned by the collaborator traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One question put to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickRequest {
    /// Short prompt, e.g. "Action".
    pub prompt: String,
    /// Longer context shown above the options.
    pub message: String,
    /// Candidate lines in display order. May be empty for free-text input.
    pub options: Vec<String>,
}

impl PickRequest {
    pub fn new(prompt: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            message: message.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}

/// What came back from a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Position of the chosen entry in [`PickRequest::options`].
    Index(usize),
    /// A line of text: typed by the user, or an option echoed back by a
    /// program that cannot report positions.
    Text(String),
}

impl Selection {
    /// The selection as text, looking positions up in `options`.
    pub fn into_text(self, options: &[String]) -> Result<String> {
        match self {
            Selection::Index(index) => {
                options
                    .get(index)
                    .cloned()
                    .ok_or(DuelistError::IndexOutOfRange {
                        index,
                        len: options.len(),
                    })
            }
            Selection::Text(text) => Ok(text),
        }
    }
}

/// Trait abstracting how the user picks (or types) a single line.
///
/// - `Ok(Some(selection))`: the chosen option or freshly typed text.
/// - `Ok(None)`: the user made no choice; the caller does nothing.
/// - `Err(_)`: the collaborator itself failed; the caller aborts the
///   operation and leaves the store unchanged.
pub trait Picker: Send {
    fn pick(&mut self, request: PickRequest) -> BoxFuture<'_, Result<Option<Selection>>>;
}
