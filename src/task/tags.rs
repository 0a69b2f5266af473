// src/task/tags.rs

//! Parsing of free-text task input.
//!
//! A line is split on whitespace. Words shaped like `key:value` with a known
//! key are metadata; every other word is part of the name:
//!
//! ```text
//! write report due:fri group:work span:3
//! renew passport due:2026-11-30 url:https://example.org/renew
//! call mom snooze:tomorrow
//! ```
//!
//! Dates accept `YYYY-MM-DD`, `M/D/YYYY`, `YYYYMMDD`, `today`, `tomorrow`,
//! `+N` and weekday names (`monday`, `mon`, ...). `none` clears the due
//! date, group or URL.

use chrono::{Days, NaiveDate, Weekday};

use crate::errors::{DuelistError, Result};
use crate::schedule::calendar::{add_days, ensure_storable, next_weekday, parse_compact_date};
use crate::task::model::Task;

/// Everything a single line of input asked for. `None` fields were not
/// mentioned and leave the task unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub name: Option<String>,
    /// `Some(None)` clears the due date.
    pub due: Option<Option<NaiveDate>>,
    /// `Some("")` ungroups the task.
    pub group: Option<String>,
    pub snooze: Option<NaiveDate>,
    pub span: Option<u32>,
    /// `Some(None)` removes the URL.
    pub url: Option<Option<String>>,
}

impl TaskInput {
    /// Build a brand-new task. A name is required.
    pub fn into_task(self) -> Result<Task> {
        if self.name.is_none() {
            return Err(DuelistError::ParseError(
                "a task needs a name besides its tags".to_string(),
            ));
        }
        let mut task = Task::new(String::new());
        self.apply_to(&mut task);
        Ok(task)
    }

    /// Apply the mentioned fields to an existing task.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.rename(name);
        }
        if let Some(due) = self.due {
            task.reschedule(due);
        }
        if let Some(group) = self.group {
            task.regroup(group);
        }
        if let Some(until) = self.snooze {
            task.snooze_until(until);
        }
        if let Some(span) = self.span {
            task.span = Some(span);
        }
        if let Some(url) = self.url {
            task.url = url;
        }
    }
}

/// Parse a line of user input relative to `today`.
pub fn parse_input(line: &str, today: NaiveDate) -> Result<TaskInput> {
    let mut input = TaskInput::default();
    let mut name_words = Vec::new();

    for word in line.split_whitespace() {
        let Some((key, value)) = word.split_once(':') else {
            name_words.push(word);
            continue;
        };

        match key.to_lowercase().as_str() {
            "due" => {
                input.due = Some(if is_none_word(value) {
                    None
                } else {
                    Some(parse_date(value, today)?)
                });
            }
            "group" => {
                input.group = Some(if is_none_word(value) {
                    String::new()
                } else {
                    value.to_string()
                });
            }
            "snooze" => input.snooze = Some(parse_date(value, today)?),
            "span" => input.span = Some(parse_span(value)?),
            "url" => {
                input.url = Some(if is_none_word(value) {
                    None
                } else {
                    Some(value.to_string())
                });
            }
            _ => name_words.push(word),
        }
    }

    if !name_words.is_empty() {
        input.name = Some(name_words.join(" "));
    }
    Ok(input)
}

/// Parse a date typed by the user, relative to `today`.
///
/// Dates outside years 1-9999 are rejected, since no task file could hold
/// them.
pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    ensure_storable(parse_any_date(s, today)?)
}

fn parse_any_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    let lower = s.to_lowercase();

    match lower.as_str() {
        "" => {
            return Err(DuelistError::ParseError("empty date".to_string()));
        }
        "today" => return Ok(today),
        "tomorrow" => return Ok(add_days(today, 1)),
        _ => {}
    }

    if let Some(offset) = lower.strip_prefix('+') {
        let days: u64 = offset
            .parse()
            .map_err(|_| DuelistError::ParseError(format!("'{s}' is not a day offset like +3")))?;
        return today.checked_add_days(Days::new(days)).ok_or_else(|| {
            DuelistError::ParseError(format!("'{s}' is too far in the future"))
        });
    }

    if let Ok(weekday) = lower.parse::<Weekday>() {
        return Ok(next_weekday(today, weekday));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Ok(date);
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact_date(s);
    }

    Err(DuelistError::ParseError(format!(
        "'{s}' is not a date (try 2026-10-31, 10/31/2026, tomorrow, +3 or fri)"
    )))
}

fn parse_span(s: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| DuelistError::ParseError(format!("span '{s}' is not a whole number of days")))
}

fn is_none_word(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("none")
}
