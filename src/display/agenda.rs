// src/display/agenda.rs

//! Day-by-day rendering of an optimized store.

use std::fmt;

use chrono::NaiveDate;

use crate::display::label::label;
use crate::display::urgency::{effective_date, DisplayStyle};
use crate::schedule::calendar::days_between;
use crate::task::Task;

/// A heading and the labels listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaSection {
    pub heading: String,
    pub labels: Vec<String>,
}

/// The "view" screen: overdue tasks, one section per planned day, undated
/// tasks, snoozed tasks, and a count of completed ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Agenda {
    pub sections: Vec<AgendaSection>,
    pub completed: usize,
}

impl Agenda {
    /// Build from tasks that have already been sorted and optimized.
    pub fn build(tasks: &[Task], today: NaiveDate, style: &DisplayStyle) -> Self {
        let mut overdue = Vec::new();
        let mut days: Vec<(NaiveDate, Vec<String>)> = Vec::new();
        let mut undated = Vec::new();
        let mut snoozed = Vec::new();
        let mut completed = 0;

        for task in tasks {
            if task.complete {
                completed += 1;
                continue;
            }
            let text = label(task, today, style);
            if task.is_snoozed(today) {
                snoozed.push(text);
                continue;
            }
            match (task.user_due_date, effective_date(task.optimal_due_date, task.user_due_date, today)) {
                (Some(deadline), _) if deadline < today => overdue.push(text),
                (_, Some(day)) => match days.iter_mut().find(|(d, _)| *d == day) {
                    Some((_, labels)) => labels.push(text),
                    None => days.push((day, vec![text])),
                },
                _ => undated.push(text),
            }
        }

        // Smoothed dates are not monotonic in store order once overdue
        // tasks are pulled out, so order the day buckets explicitly.
        days.sort_by_key(|(day, _)| *day);

        let mut sections = Vec::new();
        push_section(&mut sections, "Overdue".to_string(), overdue);
        for (day, labels) in days {
            push_section(&mut sections, day_heading(day, today, style), labels);
        }
        push_section(&mut sections, "No due date".to_string(), undated);
        push_section(&mut sections, "Snoozed".to_string(), snoozed);

        Self {
            sections,
            completed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.completed == 0
    }
}

fn push_section(sections: &mut Vec<AgendaSection>, heading: String, labels: Vec<String>) {
    if !labels.is_empty() {
        sections.push(AgendaSection { heading, labels });
    }
}

fn day_heading(day: NaiveDate, today: NaiveDate, style: &DisplayStyle) -> String {
    match days_between(today, day) {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d if d < 7 => day.format("%A").to_string(),
        _ => day.format("%A, ").to_string() + &style.format_date(day),
    }
}

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Nothing to do. Add a task with \"add\".");
        }
        for section in &self.sections {
            writeln!(f, "{}:", section.heading)?;
            for label in &section.labels {
                writeln!(f, "  - {label}")?;
            }
            writeln!(f)?;
        }
        match self.completed {
            0 => Ok(()),
            1 => writeln!(f, "1 task completed."),
            n => writeln!(f, "{n} tasks completed."),
        }
    }
}
