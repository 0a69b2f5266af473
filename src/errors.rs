// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::schedule::ScheduleError;

#[derive(Error, Debug)]
pub enum DuelistError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed date, tag or persisted record.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A display-key lookup found nothing. Callers usually treat this as
    /// "the user typed a new task".
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Index {index} is out of range (store has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The picker or URL opener could not be launched or piped.
    #[error("External command failed: {0}")]
    ExternalCollaborator(String),

    #[error("Scheduling precondition violated: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, DuelistError>;
