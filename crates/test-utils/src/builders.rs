#![allow(dead_code)]

use chrono::NaiveDate;
use duelist::task::{Task, TaskStore};

/// Builder for `Task` to keep test setup short.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            task: Task::new(name),
        }
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.task.user_due_date = Some(date);
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.task.group = group.to_string();
        self
    }

    pub fn complete(mut self) -> Self {
        self.task.complete = true;
        self
    }

    pub fn snoozed_until(mut self, date: NaiveDate) -> Self {
        self.task.snoozed_until = Some(date);
        self
    }

    pub fn span(mut self, days: u32) -> Self {
        self.task.span = Some(days);
        self
    }

    pub fn url(mut self, url: &str) -> Self {
        self.task.url = Some(url.to_string());
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// Builder for a `TaskStore`. Tasks get ids 1, 2, ... in insertion order.
#[derive(Default)]
pub struct StoreBuilder {
    tasks: Vec<Task>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, task: TaskBuilder) -> Self {
        self.tasks.push(task.build());
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> TaskStore {
        let mut store = TaskStore::new();
        for task in self.tasks {
            store.add(task);
        }
        store
    }
}
