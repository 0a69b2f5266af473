// src/picker/command.rs

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{DuelistError, Result};
use crate::picker::{BoxFuture, PickRequest, Picker, Selection};

/// Runs an external picker such as `rofi -dmenu`.
///
/// Options are written to the child's stdin, one per line, and the first
/// line of its stdout is the answer. Placeholders `{prompt}` and `{message}`
/// in the configured argv are replaced per request.
#[derive(Debug, Clone)]
pub struct CommandPicker {
    argv: Vec<String>,
}

impl CommandPicker {
    /// `None` if `argv` is empty.
    pub fn new(argv: Vec<String>) -> Option<Self> {
        if argv.is_empty() {
            None
        } else {
            Some(Self { argv })
        }
    }

    /// Concrete argv for one request.
    pub fn expand_argv(&self, request: &PickRequest) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| {
                arg.replace("{prompt}", &request.prompt)
                    .replace("{message}", &request.message)
            })
            .collect()
    }

    async fn run(&self, request: PickRequest) -> Result<Option<Selection>> {
        let argv = self.expand_argv(&request);
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| DuelistError::ExternalCollaborator("empty picker command".to_string()))?;

        info!(program = %program, options = request.options.len(), "opening picker");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DuelistError::ExternalCollaborator(format!("failed to launch '{program}': {e}"))
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            DuelistError::ExternalCollaborator(format!("no stdin pipe for '{program}'"))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            DuelistError::ExternalCollaborator(format!("no stdout pipe for '{program}'"))
        })?;

        let mut input = request.options.join("\n");
        if !input.is_empty() {
            input.push('\n');
        }
        if let Err(e) = stdin.write_all(input.as_bytes()).await {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(DuelistError::ExternalCollaborator(format!(
                    "writing options to '{program}': {e}"
                )));
            }
            debug!(program = %program, "picker closed its input early");
        }
        // Closing stdin tells the picker the list is complete.
        drop(stdin);

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        reader.read_line(&mut line).await.map_err(|e| {
            DuelistError::ExternalCollaborator(format!("reading answer from '{program}': {e}"))
        })?;

        let status = child.wait().await.map_err(|e| {
            DuelistError::ExternalCollaborator(format!("waiting for '{program}': {e}"))
        })?;
        // dmenu-style pickers exit non-zero when dismissed.
        if !status.success() {
            debug!(program = %program, ?status, "picker dismissed");
        }

        let answer = line.trim_end_matches(['\r', '\n']).trim();
        if answer.is_empty() {
            debug!("picker returned nothing");
            return Ok(None);
        }
        debug!(answer, "picker answered");
        Ok(Some(Selection::Text(answer.to_string())))
    }
}

impl Picker for CommandPicker {
    fn pick(&mut self, request: PickRequest) -> BoxFuture<'_, Result<Option<Selection>>> {
        Box::pin(async move {
            let result = self.run(request).await;
            if let Err(err) = &result {
                warn!(error = %err, "picker failed");
            }
            result
        })
    }
}
