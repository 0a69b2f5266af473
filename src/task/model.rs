// src/task/model.rs

//! The `Task` record and its lifecycle mutators.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the [`TaskStore`](crate::task::TaskStore).
///
/// `TaskId(0)` is never handed out; records deserialized without an id carry
/// it until the store assigns a real one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub const UNASSIGNED: TaskId = TaskId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: TaskId,

    pub name: String,

    /// Free-text category; empty means "ungrouped".
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub group: String,

    /// The user's deadline. `None` means "no deadline".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_due_date: Option<NaiveDate>,

    /// Smoothed due date computed by the scheduler. Never persisted.
    #[serde(skip)]
    pub optimal_due_date: Option<NaiveDate>,

    #[serde(default)]
    pub complete: bool,

    /// Hidden from the active view while today is before this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_until: Option<NaiveDate>,

    /// Advisory estimate of how many days of work the task needs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Task {
    /// A new, ungrouped, undated task. The store assigns the id on insert.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            name: name.into(),
            group: String::new(),
            user_due_date: None,
            optimal_due_date: None,
            complete: false,
            snoozed_until: None,
            span: None,
            url: None,
        }
    }

    pub fn with_due(mut self, due: NaiveDate) -> Self {
        self.user_due_date = Some(due);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn is_snoozed(&self, today: NaiveDate) -> bool {
        self.snoozed_until.is_some_and(|until| today < until)
    }

    /// Complete, or snoozed past `today`. Dormant tasks sort after active ones
    /// and are not smoothed by the scheduler.
    pub fn is_dormant(&self, today: NaiveDate) -> bool {
        self.complete || self.is_snoozed(today)
    }

    /// Completion is terminal; calling this twice is harmless.
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Hide the task until tomorrow.
    pub fn mark_done_for_today(&mut self, today: NaiveDate) {
        self.snoozed_until = today.checked_add_days(Days::new(1));
    }

    pub fn snooze_until(&mut self, until: NaiveDate) {
        self.snoozed_until = Some(until);
    }

    /// Move the user's deadline. The optimal date is stale until the next
    /// scheduler run, so it is cleared here.
    pub fn reschedule(&mut self, due: Option<NaiveDate>) {
        self.user_due_date = due;
        self.optimal_due_date = None;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn regroup(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }
}
