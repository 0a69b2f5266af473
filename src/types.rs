use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// On-disk encoding of the task file.
///
/// - `Json`: a single document `{"tasks": [...]}` (default).
/// - `Legacy`: the line-oriented layout with a leading version number and
///   `G`/`T` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    Json,
    Legacy,
}

impl Default for StoreFormat {
    fn default() -> Self {
        StoreFormat::Json
    }
}

impl FromStr for StoreFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(StoreFormat::Json),
            "legacy" => Ok(StoreFormat::Legacy),
            other => Err(format!(
                "invalid storage format: {other} (expected \"json\" or \"legacy\")"
            )),
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFormat::Json => f.write_str("json"),
            StoreFormat::Legacy => f.write_str("legacy"),
        }
    }
}

/// Top-level commands of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    Edit,
    MarkDone,
    View,
    Quit,
    Help,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 6] = [
        MenuCommand::Add,
        MenuCommand::Edit,
        MenuCommand::MarkDone,
        MenuCommand::View,
        MenuCommand::Quit,
        MenuCommand::Help,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            MenuCommand::Add => "add",
            MenuCommand::Edit => "edit",
            MenuCommand::MarkDone => "mark-done",
            MenuCommand::View => "view",
            MenuCommand::Quit => "quit",
            MenuCommand::Help => "help",
        }
    }

    /// Single-letter abbreviation accepted at the prompt.
    pub fn shortcut(self) -> char {
        match self {
            MenuCommand::MarkDone => 'd',
            other => other.keyword().chars().next().unwrap_or('?'),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuCommand::Add => "add a task",
            MenuCommand::Edit => "pick a task to edit, or type a new one",
            MenuCommand::MarkDone => "mark a task as complete",
            MenuCommand::View => "view the todo list",
            MenuCommand::Quit => "save and quit",
            MenuCommand::Help => "show this help",
        }
    }
}

impl FromStr for MenuCommand {
    type Err = String;

    /// Accepts the full keyword or its first letter (`d` for `mark-done`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "add" => Ok(MenuCommand::Add),
            "e" | "edit" => Ok(MenuCommand::Edit),
            "d" | "done" | "mark-done" => Ok(MenuCommand::MarkDone),
            "v" | "view" => Ok(MenuCommand::View),
            "q" | "quit" => Ok(MenuCommand::Quit),
            "h" | "help" | "?" => Ok(MenuCommand::Help),
            other => Err(format!("unknown command: {other} (type \"help\")")),
        }
    }
}
