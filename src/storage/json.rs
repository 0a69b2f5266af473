// src/storage/json.rs

//! JSON document codec: `{"tasks": [ ... ]}`.
//!
//! Each record is decoded on its own so that one bad record costs only
//! itself. A document that is not JSON at all is an error: saving over it
//! would destroy data we could not read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::{DuelistError, Result};
use crate::storage::Decoded;
use crate::task::Task;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    tasks: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct DocumentRef<'a> {
    tasks: &'a [Task],
}

pub fn decode(text: &str) -> Result<Decoded> {
    let doc: RawDocument = serde_json::from_str(text).map_err(|e| {
        DuelistError::ParseError(format!("task file is not a valid JSON document: {e}"))
    })?;

    let mut decoded = Decoded::default();
    for (index, record) in doc.tasks.into_iter().enumerate() {
        match decode_record(record) {
            Ok(task) => decoded.tasks.push(task),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed task record");
                decoded.skipped += 1;
            }
        }
    }
    Ok(decoded)
}

fn decode_record(record: Value) -> Result<Task> {
    let task: Task = serde_json::from_value(record)
        .map_err(|e| DuelistError::ParseError(e.to_string()))?;
    if task.name.trim().is_empty() {
        return Err(DuelistError::ParseError("task has an empty name".to_string()));
    }
    Ok(task)
}

pub fn encode(tasks: &[Task]) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&DocumentRef { tasks })?;
    text.push('\n');
    Ok(text)
}
