// src/session/console.rs

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::errors::Result;
use crate::picker::{BoxFuture, PickRequest, Picker, Selection};

/// Line-oriented terminal IO.
///
/// Generic over the reader and writer so tests can drive it with byte
/// slices and collect output in a `Vec<u8>`.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `text` followed by a newline.
    pub async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Prompt and read one trimmed line. `None` at end of input.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.output.write_all(question.as_bytes()).await?;
        self.output.write_all(b" ").await?;
        self.output.flush().await?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).await?;
        if read == 0 {
            trace!("console input closed");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn pick_line(&mut self, request: PickRequest) -> Result<Option<Selection>> {
        if !request.message.is_empty() {
            self.say(&request.message).await?;
        }
        for (i, option) in request.options.iter().enumerate() {
            self.say(&format!("  {}. {option}", i + 1)).await?;
        }

        let Some(answer) = self.ask(&format!("{}>", request.prompt)).await? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(None);
        }

        let numbered = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < request.options.len());
        Ok(Some(match numbered {
            Some(index) => Selection::Index(index),
            None => Selection::Text(answer),
        }))
    }
}

/// Fallback picker when no external command is configured: numbered
/// options on the terminal, answered by number or by typing.
impl<R, W> Picker for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    fn pick(&mut self, request: PickRequest) -> BoxFuture<'_, Result<Option<Selection>>> {
        Box::pin(self.pick_line(request))
    }
}
