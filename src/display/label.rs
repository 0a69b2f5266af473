// src/display/label.rs

use chrono::NaiveDate;

use crate::display::urgency::{urgency, DisplayStyle};
use crate::task::Task;

/// One-line rendering of a task, as shown in pickers and lists.
///
/// `write report [work] (due on Monday) (deadline 10/23/2026)`
///
/// Labels double as the lookup key for text coming back from a picker, so
/// they must be a pure function of the task and `today`.
pub fn label(task: &Task, today: NaiveDate, style: &DisplayStyle) -> String {
    let mut out = task.name.clone();

    if !task.group.is_empty() {
        out.push_str(&format!(" [{}]", task.group));
    }

    if let Some(text) = urgency(task.optimal_due_date, task.user_due_date, today, style) {
        out.push_str(&format!(" ({text})"));
    }

    if let (Some(optimal), Some(user)) = (task.optimal_due_date, task.user_due_date) {
        if optimal != user && user >= today {
            out.push_str(&format!(" (deadline {})", style.format_date(user)));
        }
    }

    if task.complete {
        out.push_str(" (complete)");
    } else if let Some(until) = task.snoozed_until.filter(|_| task.is_snoozed(today)) {
        out.push_str(&format!(" (snoozed until {})", style.format_date(until)));
    }

    out
}
