// src/task/store.rs

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::errors::{DuelistError, Result};
use crate::task::model::{Task, TaskId};
use crate::task::ordering::sort_tasks;

/// The working set of tasks for one session.
///
/// The store owns ordering (recomputed on demand, never persisted) and id
/// assignment. Ids only ever grow, so a deleted task's id is not reused
/// within a session.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a store from loaded records.
    ///
    /// Records without an id, or whose id collides with an earlier record,
    /// get a fresh one.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let highest = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        let mut store = Self {
            tasks: Vec::with_capacity(tasks.len()),
            next_id: highest + 1,
        };

        let mut seen = BTreeSet::new();
        for mut task in tasks {
            if !task.id.is_assigned() || !seen.insert(task.id) {
                task.id = store.allocate_id();
                seen.insert(task.id);
            }
            store.tasks.push(task);
        }
        store
    }

    /// Append a task and return its id. No de-duplication is performed.
    pub fn add(&mut self, mut task: Task) -> TaskId {
        task.id = self.allocate_id();
        debug!(id = %task.id, name = %task.name, "adding task");
        let id = task.id;
        self.tasks.push(task);
        id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        let len = self.tasks.len();
        self.tasks
            .get(index)
            .ok_or(DuelistError::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(DuelistError::IndexOutOfRange { index, len })
    }

    /// Primary lookup.
    pub fn find_by_id(&self, id: TaskId) -> Option<(usize, &Task)> {
        self.tasks.iter().enumerate().find(|(_, t)| t.id == id)
    }

    /// Resolve text coming back from a picker to a task by its rendered label.
    ///
    /// Two tasks that render identically cannot be told apart; the first one
    /// in store order wins.
    pub fn find_by_display_key<F>(&self, key: &str, render: F) -> Result<(usize, &Task)>
    where
        F: Fn(&Task) -> String,
    {
        trace!(key, "looking up task by display key");
        self.tasks
            .iter()
            .enumerate()
            .find(|(_, t)| render(t) == key)
            .ok_or_else(|| DuelistError::NotFound(key.to_string()))
    }

    /// Remove the task at `index`, shifting later tasks down.
    pub fn remove_at(&mut self, index: usize) -> Result<Task> {
        let len = self.tasks.len();
        if index >= len {
            return Err(DuelistError::IndexOutOfRange { index, len });
        }
        let task = self.tasks.remove(index);
        debug!(id = %task.id, name = %task.name, "removed task");
        Ok(task)
    }

    /// Non-empty group names currently in use, for autocompletion.
    pub fn distinct_groups(&self) -> BTreeSet<String> {
        self.tasks
            .iter()
            .filter(|t| !t.group.is_empty())
            .map(|t| t.group.clone())
            .collect()
    }

    /// Sort in place by the display/scheduling order.
    pub fn sort(&mut self, today: NaiveDate) {
        sort_tasks(&mut self.tasks, today);
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }
}

impl FromIterator<Task> for TaskStore {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self::from_tasks(iter.into_iter().collect())
    }
}
