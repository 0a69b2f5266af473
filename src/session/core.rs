// src/session/core.rs

//! Pure session state machine.
//!
//! `SessionCore` owns the task store and applies user intents to it. It has
//! no IO, no Tokio and no prompts: the async shell (`session::shell`) asks
//! the questions, turns the answers into [`EditAction`]s and persists the
//! store when the core reports a change.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::display::{label, Agenda, DisplayStyle};
use crate::errors::{DuelistError, Result};
use crate::picker::Selection;
use crate::schedule::Scheduler;
use crate::task::{parse_input, Task, TaskId, TaskInput, TaskStore};

/// Entries of the per-task action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    MarkComplete,
    DoneForToday,
    Snooze,
    VisitUrl,
    Rename,
    Regroup,
    Reschedule,
    ChangeSpan,
    ChangeUrl,
    Delete,
}

impl ActionChoice {
    pub fn label(self) -> &'static str {
        match self {
            ActionChoice::MarkComplete => "Mark it complete",
            ActionChoice::DoneForToday => "Mark it done for today",
            ActionChoice::Snooze => "Snooze it",
            ActionChoice::VisitUrl => "Visit URL",
            ActionChoice::Rename => "Change its name",
            ActionChoice::Regroup => "Change its group",
            ActionChoice::Reschedule => "Change its due date",
            ActionChoice::ChangeSpan => "Change its span",
            ActionChoice::ChangeUrl => "Change its URL",
            ActionChoice::Delete => "Delete this task",
        }
    }

    /// Menu offered for `task`; "Visit URL" only when it has one.
    pub fn menu_for(task: &Task) -> Vec<ActionChoice> {
        let mut menu = vec![ActionChoice::MarkComplete, ActionChoice::DoneForToday, ActionChoice::Snooze];
        if task.url.is_some() {
            menu.push(ActionChoice::VisitUrl);
        }
        menu.extend([
            ActionChoice::Rename,
            ActionChoice::Regroup,
            ActionChoice::Reschedule,
            ActionChoice::ChangeSpan,
            ActionChoice::ChangeUrl,
            ActionChoice::Delete,
        ]);
        menu
    }

    pub fn from_label(text: &str) -> Option<ActionChoice> {
        [
            ActionChoice::MarkComplete,
            ActionChoice::DoneForToday,
            ActionChoice::Snooze,
            ActionChoice::VisitUrl,
            ActionChoice::Rename,
            ActionChoice::Regroup,
            ActionChoice::Reschedule,
            ActionChoice::ChangeSpan,
            ActionChoice::ChangeUrl,
            ActionChoice::Delete,
        ]
        .into_iter()
        .find(|choice| choice.label() == text)
    }
}

/// A fully specified change to one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    MarkComplete,
    DoneForToday,
    Snooze(NaiveDate),
    VisitUrl,
    Rename(String),
    Regroup(String),
    Reschedule(Option<NaiveDate>),
    SetSpan(Option<u32>),
    SetUrl(Option<String>),
    Delete,
    /// Free text typed at the action menu, applied as tags.
    ApplyTags(TaskInput),
}

/// Result of applying an [`EditAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The task changed and the store should be saved.
    Updated,
    Deleted(Task),
    /// Nothing changed; the shell should open this URL.
    OpenUrl(String),
}

impl EditOutcome {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, EditOutcome::OpenUrl(_))
    }
}

/// What a line coming back from the picker refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Picked {
    Existing(TaskId),
    /// No task renders like this; treat it as a new task.
    New(String),
}

/// Tasks as offered to a picker: labels in display order, each paired with
/// the id of the task it shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    ids: Vec<TaskId>,
    labels: Vec<String>,
}

impl Listing {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the task shown at `index`.
    pub fn id_at(&self, index: usize) -> Result<TaskId> {
        self.ids.get(index).copied().ok_or(DuelistError::IndexOutOfRange {
            index,
            len: self.ids.len(),
        })
    }
}

#[derive(Debug)]
pub struct SessionCore {
    store: TaskStore,
    style: DisplayStyle,
}

impl SessionCore {
    pub fn new(store: TaskStore, style: DisplayStyle) -> Self {
        Self { store, style }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn style(&self) -> &DisplayStyle {
        &self.style
    }

    pub fn into_store(self) -> TaskStore {
        self.store
    }

    /// Sort and recompute optimal dates. Run before anything is shown.
    pub fn refresh(&mut self, today: NaiveDate) -> Result<()> {
        Scheduler::optimize(&mut self.store, today)?;
        Ok(())
    }

    pub fn agenda(&mut self, today: NaiveDate) -> Result<Agenda> {
        self.refresh(today)?;
        Ok(Agenda::build(self.store.tasks(), today, &self.style))
    }

    /// Every task in display order.
    pub fn labels(&mut self, today: NaiveDate) -> Result<Listing> {
        self.refresh(today)?;
        Ok(self.render_all(today, |_| true))
    }

    /// Tasks that can still be marked done.
    pub fn active_labels(&mut self, today: NaiveDate) -> Result<Listing> {
        self.refresh(today)?;
        Ok(self.render_all(today, |t| !t.is_dormant(today)))
    }

    pub fn groups(&self) -> BTreeSet<String> {
        self.store.distinct_groups()
    }

    pub fn task(&self, id: TaskId) -> Result<&Task> {
        self.store
            .find_by_id(id)
            .map(|(_, task)| task)
            .ok_or_else(|| DuelistError::NotFound(id.to_string()))
    }

    /// Map picker output for `listing` to a task, or to new-task text.
    ///
    /// A chosen position goes straight to that task's id. Text is matched
    /// against the rendered labels; when two tasks render alike the first
    /// one wins.
    pub fn resolve_pick(&self, selection: Selection, listing: &Listing, today: NaiveDate) -> Result<Picked> {
        let line = match selection {
            Selection::Index(index) => return Ok(Picked::Existing(listing.id_at(index)?)),
            Selection::Text(line) => line,
        };
        let picked = match self
            .store
            .find_by_display_key(&line, |t| label(t, today, &self.style))
        {
            Ok((_, task)) => Picked::Existing(task.id),
            Err(_) => Picked::New(line),
        };
        Ok(picked)
    }

    /// Parse a line of input and add it as a new task.
    pub fn add_from_input(&mut self, line: &str, today: NaiveDate) -> Result<TaskId> {
        let task = parse_input(line, today)?.into_task()?;
        Ok(self.add(task))
    }

    pub fn add(&mut self, task: Task) -> TaskId {
        let id = self.store.add(task);
        info!(id = %id, "task added");
        id
    }

    pub fn apply(&mut self, id: TaskId, action: EditAction, today: NaiveDate) -> Result<EditOutcome> {
        let (index, _) = self
            .store
            .find_by_id(id)
            .ok_or_else(|| DuelistError::NotFound(id.to_string()))?;

        debug!(id = %id, ?action, "applying edit");
        let task = match action {
            EditAction::Delete => {
                let removed = self.store.remove_at(index)?;
                info!(id = %id, name = %removed.name, "task deleted");
                return Ok(EditOutcome::Deleted(removed));
            }
            _ => self.store.get_mut(index)?,
        };
        match action {
            EditAction::MarkComplete => task.mark_complete(),
            EditAction::DoneForToday => task.mark_done_for_today(today),
            EditAction::Snooze(until) => task.snooze_until(until),
            EditAction::VisitUrl => {
                return match &task.url {
                    Some(url) => Ok(EditOutcome::OpenUrl(url.clone())),
                    None => Err(DuelistError::NotFound(format!("URL of task {id}"))),
                };
            }
            EditAction::Rename(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DuelistError::ParseError("a task name cannot be empty".to_string()));
                }
                task.rename(name);
            }
            EditAction::Regroup(group) => task.regroup(group.trim()),
            EditAction::Reschedule(due) => task.reschedule(due),
            EditAction::SetSpan(span) => task.span = span,
            EditAction::SetUrl(url) => task.url = url,
            EditAction::ApplyTags(input) => input.apply_to(task),
            EditAction::Delete => {}
        }
        Ok(EditOutcome::Updated)
    }

    fn render_all<F>(&self, today: NaiveDate, keep: F) -> Listing
    where
        F: Fn(&Task) -> bool,
    {
        let mut listing = Listing::default();
        for task in self.store.iter().filter(|t| keep(t)) {
            listing.ids.push(task.id);
            listing.labels.push(label(task, today, &self.style));
        }
        listing
    }
}

/// Interpret an answer to "which group?".
///
/// - A number picks from `groups` (1-based, in set order).
/// - Text that is a case-insensitive prefix of exactly one existing group
///   completes to it.
/// - Anything else is taken literally.
/// - `none` or an empty answer ungroups.
pub fn resolve_group_answer(answer: &str, groups: &BTreeSet<String>) -> String {
    let answer = answer.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case("none") {
        return String::new();
    }
    if let Ok(n) = answer.parse::<usize>() {
        if let Some(group) = n.checked_sub(1).and_then(|i| groups.iter().nth(i)) {
            return group.clone();
        }
    }
    if groups.contains(answer) {
        return answer.to_string();
    }
    let lower = answer.to_lowercase();
    let mut matches = groups
        .iter()
        .filter(|g| g.to_lowercase().starts_with(&lower));
    match (matches.next(), matches.next()) {
        (Some(only), None) => only.clone(),
        _ => answer.to_string(),
    }
}
