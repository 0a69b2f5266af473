// src/storage/mod.rs

//! Persistence of the task store.
//!
//! The file is read once at startup and rewritten after every committed
//! change. Reading sniffs the encoding (a JSON document starts with `{`), so
//! switching `[storage].format` migrates the file on the next save.

pub mod json;
pub mod legacy;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::task::{Task, TaskStore};
use crate::types::StoreFormat;

/// Tasks recovered from a file plus the number of records that were skipped.
#[derive(Debug, Default)]
pub struct Decoded {
    pub tasks: Vec<Task>,
    pub skipped: usize,
}

/// Guess the encoding of file contents.
pub fn detect_format(text: &str) -> StoreFormat {
    match text.trim_start().chars().next() {
        Some('{') => StoreFormat::Json,
        _ => StoreFormat::Legacy,
    }
}

pub fn decode(text: &str) -> Result<Decoded> {
    match detect_format(text) {
        StoreFormat::Json => json::decode(text),
        StoreFormat::Legacy => legacy::decode(text),
    }
}

pub fn encode(tasks: &[Task], format: StoreFormat) -> Result<String> {
    match format {
        StoreFormat::Json => json::encode(tasks),
        StoreFormat::Legacy => Ok(legacy::encode(tasks)),
    }
}

/// A task file at a fixed path, written in a fixed format.
#[derive(Debug, Clone)]
pub struct Storage<F: FileSystem> {
    fs: F,
    path: PathBuf,
    format: StoreFormat,
}

impl<F: FileSystem> Storage<F> {
    pub fn new(fs: F, path: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self {
            fs,
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the store. A missing file is an empty store.
    pub fn load(&self) -> Result<TaskStore> {
        if !self.fs.exists(&self.path) {
            info!(path = %self.path.display(), "no task file yet; starting empty");
            return Ok(TaskStore::new());
        }

        let text = self.fs.read_to_string(&self.path)?;
        let decoded = decode(&text)?;
        if decoded.skipped > 0 {
            warn!(
                path = %self.path.display(),
                skipped = decoded.skipped,
                "some records in the task file could not be read"
            );
        }
        debug!(
            path = %self.path.display(),
            tasks = decoded.tasks.len(),
            "loaded task file"
        );
        Ok(TaskStore::from_tasks(decoded.tasks))
    }

    /// Write the store through a temporary file and rename it into place.
    pub fn save(&self, store: &TaskStore) -> Result<()> {
        let text = encode(store.tasks(), self.format)?;
        let tmp = self.tmp_path();
        self.fs.write(&tmp, text.as_bytes())?;
        self.fs.rename(&tmp, &self.path)?;
        debug!(
            path = %self.path.display(),
            format = %self.format,
            tasks = store.len(),
            "saved task file"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("tasks"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
