// src/display/urgency.rs

use std::fmt::Write;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::model::DEFAULT_DATE_FORMAT;
use crate::config::DisplaySection;
use crate::schedule::calendar::days_between;

/// Presentation settings shared by urgency text, labels and the agenda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStyle {
    pub date_format: String,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl From<&DisplaySection> for DisplayStyle {
    fn from(section: &DisplaySection) -> Self {
        Self {
            date_format: section.date_format.clone(),
        }
    }
}

impl DisplayStyle {
    /// Render `date` with the configured pattern, or with the default one
    /// when the pattern cannot render a plain date.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_ok() {
            return out;
        }
        warn!(format = %self.date_format, "date format cannot render a date; using the default");
        date.format(DEFAULT_DATE_FORMAT).to_string()
    }
}

/// The date the user should plan to have the task done by.
///
/// A smoothed date that has already passed is pulled forward to today:
/// the task is late against the plan but not against the deadline.
pub fn effective_date(
    optimal: Option<NaiveDate>,
    user: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let user = user?;
    Some(optimal.unwrap_or(user).max(today))
}

/// Human-readable urgency of a task, or `None` when it has no due date.
///
/// - "overdue" / "overdue by N days" once the user's deadline has passed
/// - otherwise, from the effective date: "due today", "due tomorrow",
///   "due on <Weekday>" within a week, "due in N days" within two weeks,
///   and "due on <date>" beyond that.
pub fn urgency(
    optimal: Option<NaiveDate>,
    user: Option<NaiveDate>,
    today: NaiveDate,
    style: &DisplayStyle,
) -> Option<String> {
    let deadline = user?;

    let late_by = days_between(deadline, today);
    if late_by > 1 {
        return Some(format!("overdue by {late_by} days"));
    }
    if late_by == 1 {
        return Some("overdue".to_string());
    }

    let effective = effective_date(optimal, user, today)?;
    let text = match days_between(today, effective) {
        0 => "due today".to_string(),
        1 => "due tomorrow".to_string(),
        d if d < 7 => format!("due on {}", effective.format("%A")),
        d if d <= 14 => format!("due in {d} days"),
        _ => format!("due on {}", style.format_date(effective)),
    };
    Some(text)
}
