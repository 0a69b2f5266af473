// src/storage/legacy.rs

//! Line-oriented task file.
//!
//! The first line is a version number. Each following line starts with a
//! one-letter tag:
//!
//! ```text
//! 2
//! T 20261020 - call the bank
//! I 4
//! G work
//! T 20261024 3 write report
//! I 5
//! U https://example.org/report
//! G
//! T - - someday task
//! I 6
//! S 20261101
//! C
//! ```
//!
//! - `G <name>` sets the group of every following `T` line (`G` alone means
//!   ungrouped).
//! - `T <yyyymmdd> <span> <name...>` is a task.
//!
//! Version 1 is the original layout. It has only `G` and `T` lines, and
//! dates and spans are mandatory. Version 2 allows `-` for an absent date or
//! span, and adds attribute lines that belong to the preceding `T`:
//! - `I <id>`
//! - `S <yyyymmdd>` (snoozed until)
//! - `C` (complete)
//! - `U <url>`
//!
//! Only version 2 is written.

use tracing::warn;

use crate::errors::{DuelistError, Result};
use crate::schedule::calendar::{format_compact_date, parse_compact_date};
use crate::storage::Decoded;
use crate::task::{Task, TaskId};

pub const CURRENT_VERSION: u32 = 2;

pub fn decode(text: &str) -> Result<Decoded> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Decoded::default());
    };
    let version: u32 = header.trim().parse().map_err(|_| {
        DuelistError::ParseError(format!("'{header}' is not a task file version number"))
    })?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(DuelistError::ParseError(format!(
            "unsupported task file version {version}"
        )));
    }

    let mut decoded = Decoded::default();
    let mut group = String::new();
    // Attribute lines may only follow a task that parsed.
    let mut last_task_ok = false;

    for (line_no, line) in lines {
        let (tag, rest) = line.split_once(' ').unwrap_or((line, ""));
        let outcome = match tag {
            "G" => {
                group = rest.trim().to_string();
                last_task_ok = false;
                Ok(())
            }
            "T" => match parse_task(version, rest) {
                Ok(mut task) => {
                    task.group = group.clone();
                    decoded.tasks.push(task);
                    last_task_ok = true;
                    Ok(())
                }
                Err(err) => {
                    last_task_ok = false;
                    Err(err)
                }
            },
            "I" | "S" | "C" | "U" if version >= 2 => {
                match decoded.tasks.last_mut().filter(|_| last_task_ok) {
                    Some(task) => apply_attribute(task, tag, rest),
                    None => Err(DuelistError::ParseError(
                        "attribute line without a preceding task".to_string(),
                    )),
                }
            }
            other => Err(DuelistError::ParseError(format!("unknown record tag '{other}'"))),
        };

        if let Err(err) = outcome {
            warn!(line = line_no, error = %err, "skipping malformed line in task file");
            decoded.skipped += 1;
        }
    }

    Ok(decoded)
}

fn parse_task(version: u32, rest: &str) -> Result<Task> {
    let mut fields = rest.splitn(3, ' ');
    let date = fields.next().unwrap_or("");
    let span = fields.next().unwrap_or("");
    let name = fields.next().unwrap_or("").trim();

    if name.is_empty() {
        return Err(DuelistError::ParseError("task line has no name".to_string()));
    }

    let mut task = Task::new(name);
    task.user_due_date = match date {
        "-" if version >= 2 => None,
        d => Some(parse_compact_date(d)?),
    };
    task.span = match span {
        "-" if version >= 2 => None,
        s => Some(s.parse().map_err(|_| {
            DuelistError::ParseError(format!("span '{s}' is not a whole number"))
        })?),
    };
    Ok(task)
}

fn apply_attribute(task: &mut Task, tag: &str, value: &str) -> Result<()> {
    let value = value.trim();
    match tag {
        "I" => {
            let id: u64 = value
                .parse()
                .map_err(|_| DuelistError::ParseError(format!("'{value}' is not a task id")))?;
            task.id = TaskId(id);
        }
        "S" => task.snoozed_until = Some(parse_compact_date(value)?),
        "C" => task.complete = true,
        "U" if !value.is_empty() => task.url = Some(value.to_string()),
        _ => {
            return Err(DuelistError::ParseError(format!("empty '{tag}' attribute")));
        }
    }
    Ok(())
}

/// Write tasks in store order, emitting a `G` line whenever the group changes.
pub fn encode(tasks: &[Task]) -> String {
    let mut out = format!("{CURRENT_VERSION}\n");
    let mut group = "";

    for task in tasks {
        if task.group != group {
            group = &task.group;
            if group.is_empty() {
                out.push_str("G\n");
            } else {
                out.push_str(&format!("G {group}\n"));
            }
        }

        let date = task
            .user_due_date
            .map(format_compact_date)
            .unwrap_or_else(|| "-".to_string());
        let span = task
            .span
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!("T {date} {span} {}\n", task.name));

        if task.id.is_assigned() {
            out.push_str(&format!("I {}\n", task.id.0));
        }
        if let Some(until) = task.snoozed_until {
            out.push_str(&format!("S {}\n", format_compact_date(until)));
        }
        if task.complete {
            out.push_str("C\n");
        }
        if let Some(url) = &task.url {
            out.push_str(&format!("U {url}\n"));
        }
    }

    out
}
