// src/task/ordering.rs

//! The total order tasks are displayed and scheduled in.
//!
//! Levels, each consulted only when the previous one ties:
//! 1. active before dormant (complete, or snoozed past today)
//! 2. due date ascending, undated last
//! 3. group ascending (ungrouped first)
//! 4. name ascending

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::task::model::Task;

pub fn compare(a: &Task, b: &Task, today: NaiveDate) -> Ordering {
    a.is_dormant(today)
        .cmp(&b.is_dormant(today))
        .then_with(|| compare_due(a.user_due_date, b.user_due_date))
        .then_with(|| a.group.cmp(&b.group))
        .then_with(|| a.name.cmp(&b.name))
}

/// `true` when `a` sorts strictly before `b`.
pub fn is_less_than(a: &Task, b: &Task, today: NaiveDate) -> bool {
    compare(a, b, today) == Ordering::Less
}

/// Stable sort by [`compare`].
pub fn sort_tasks(tasks: &mut [Task], today: NaiveDate) {
    tasks.sort_by(|a, b| compare(a, b, today));
}

fn compare_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
