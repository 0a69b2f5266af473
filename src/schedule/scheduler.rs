// src/schedule/scheduler.rs

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, trace};

use crate::errors::Result;
use crate::schedule::calendar::{add_days, days_between};
use crate::task::{Task, TaskStore};

/// Precondition violations of [`Scheduler::spread_clusters`].
///
/// Unreachable through [`Scheduler::optimize`], which sorts and filters first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("task at index {index} has no due date")]
    Undated { index: usize },

    #[error("due dates descend at index {index} ({previous} before {current})")]
    Unsorted {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
}

/// What a scheduling pass touched, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScheduleSummary {
    /// Tasks that took part in smoothing (active and dated).
    pub scheduled: usize,
    /// Clusters whose dates were spread over the preceding gap.
    pub clusters_spread: usize,
}

/// Computes smoothed ("optimal") due dates.
///
/// Tasks sharing a due date cannot all be worked on that day, so each such
/// cluster is spread evenly over the days since the previous distinct due
/// date. User deadlines are never touched; only `optimal_due_date` is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler;

impl Scheduler {
    /// Sort the store and recompute every task's optimal due date.
    ///
    /// - Active dated tasks form the sorted prefix of the store and are
    ///   smoothed.
    /// - Dormant dated tasks keep `optimal == user`.
    /// - Undated tasks keep `None`.
    pub fn optimize(store: &mut TaskStore, today: NaiveDate) -> Result<ScheduleSummary> {
        store.sort(today);

        let tasks = store.tasks_mut();
        for task in tasks.iter_mut() {
            task.optimal_due_date = task.user_due_date;
        }

        let scheduled = tasks
            .iter()
            .take_while(|t| !t.is_dormant(today) && t.user_due_date.is_some())
            .count();

        let clusters_spread = Self::spread_clusters(&mut tasks[..scheduled])?;

        let summary = ScheduleSummary {
            scheduled,
            clusters_spread,
        };
        debug!(
            total = tasks.len(),
            scheduled, clusters_spread, "optimized task store"
        );
        Ok(summary)
    }

    /// Owned variant of [`Scheduler::optimize`]: returns the tasks in display
    /// order with optimal dates filled in.
    pub fn optimized(tasks: Vec<Task>, today: NaiveDate) -> Result<Vec<Task>> {
        let mut store = TaskStore::from_tasks(tasks);
        Self::optimize(&mut store, today)?;
        Ok(store.into_tasks())
    }

    /// Smooth a slice of dated tasks sorted ascending by due date.
    ///
    /// Single backward pass. `anchor` marks the latest task of the cluster
    /// being collected. When the walk reaches a task with an earlier date,
    /// the `n` tasks after it (up to and including the anchor) get
    /// `earlier + floor(gap * k / n)` for `k = 1..=n`. The earliest task
    /// always keeps its own date.
    ///
    /// Returns the number of clusters spread. Empty input is a no-op.
    pub fn spread_clusters(tasks: &mut [Task]) -> std::result::Result<usize, ScheduleError> {
        check_sorted_and_dated(tasks)?;

        for task in tasks.iter_mut() {
            task.optimal_due_date = task.user_due_date;
        }
        if tasks.len() < 2 {
            return Ok(0);
        }

        let mut anchor = tasks.len() - 1;
        let mut clusters_spread = 0;

        for current in (0..anchor).rev() {
            let current_due = due_at(tasks, current)?;
            let anchor_due = due_at(tasks, anchor)?;

            if current_due == anchor_due {
                trace!(
                    task = %tasks[current].name,
                    anchor = %tasks[anchor].name,
                    "same due date; extending cluster"
                );
                continue;
            }

            let gap = days_between(current_due, anchor_due);
            let cluster_size = (anchor - current) as i64;
            trace!(
                from = %current_due,
                to = %anchor_due,
                gap,
                cluster_size,
                "spreading cluster"
            );

            for k in 1..=cluster_size {
                let offset = gap * k / cluster_size;
                let task = &mut tasks[current + k as usize];
                task.optimal_due_date = Some(add_days(current_due, offset as u64));
                trace!(
                    task = %task.name,
                    optimal = ?task.optimal_due_date,
                    "assigned optimal due date"
                );
            }

            clusters_spread += 1;
            anchor = current;
        }

        Ok(clusters_spread)
    }
}

fn due_at(tasks: &[Task], index: usize) -> std::result::Result<NaiveDate, ScheduleError> {
    tasks[index]
        .user_due_date
        .ok_or(ScheduleError::Undated { index })
}

fn check_sorted_and_dated(tasks: &[Task]) -> std::result::Result<(), ScheduleError> {
    let mut previous: Option<NaiveDate> = None;
    for index in 0..tasks.len() {
        let current = due_at(tasks, index)?;
        if let Some(previous) = previous {
            if current < previous {
                return Err(ScheduleError::Unsorted {
                    index,
                    previous,
                    current,
                });
            }
        }
        previous = Some(current);
    }
    Ok(())
}
