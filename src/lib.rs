// src/lib.rs

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod picker;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod task;
pub mod types;

use anyhow::Result;
use tokio::io::BufReader;
use tracing::{debug, info};

use crate::clock::SystemClock;
use crate::config::model::ConfigFile;
use crate::display::DisplayStyle;
use crate::fs::RealFileSystem;
use crate::picker::{CommandOpener, CommandPicker};
use crate::session::{Console, SessionCore, Shell};
use crate::storage::Storage;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the task file (`[storage]`)
/// - the pure session core
/// - terminal console, optional external picker, URL opener
/// - the async menu loop
pub async fn run(cfg: ConfigFile) -> Result<()> {
    let path = cfg.storage.resolved_path();
    info!(path = %path.display(), format = %cfg.storage.format, "opening task file");
    let storage = Storage::new(RealFileSystem, path, cfg.storage.format);
    let store = storage.load()?;
    debug!(tasks = store.len(), "task store loaded");

    let core = SessionCore::new(store, DisplayStyle::from(&cfg.display));
    let console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    // An empty `[picker].command` leaves picking to the console.
    let picker = CommandPicker::new(cfg.picker.command.clone());
    if picker.is_none() {
        debug!("no picker command configured; using the terminal");
    }
    let opener = CommandOpener::new(cfg.open.command.clone());

    let mut shell = Shell::new(core, console, picker, opener, storage, Box::new(SystemClock));
    shell.run().await?;
    Ok(())
}
