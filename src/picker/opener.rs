// src/picker/opener.rs

use tokio::process::Command;
use tracing::info;

use crate::errors::{DuelistError, Result};
use crate::picker::BoxFuture;

/// Opens a task's URL somewhere outside the program.
pub trait UrlOpener: Send {
    fn open(&mut self, url: &str) -> BoxFuture<'_, Result<()>>;
}

/// Hands the URL to a command such as `xdg-open`.
///
/// The command is waited for but its exit status is only logged: openers
/// commonly detach and report nothing useful.
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl UrlOpener for CommandOpener {
    fn open(&mut self, url: &str) -> BoxFuture<'_, Result<()>> {
        let url = url.to_string();
        Box::pin(async move {
            info!(program = %self.program, url = %url, "opening url");
            let status = Command::new(&self.program)
                .arg(&url)
                .status()
                .await
                .map_err(|e| {
                    DuelistError::ExternalCollaborator(format!(
                        "failed to launch '{}': {e}",
                        self.program
                    ))
                })?;
            info!(?status, "url opener exited");
            Ok(())
        })
    }
}
