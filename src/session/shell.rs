// src/session/shell.rs

use std::fmt;

use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::display::label;
use crate::errors::{DuelistError, Result};
use crate::fs::FileSystem;
use crate::picker::{PickRequest, Picker, Selection, UrlOpener};
use crate::storage::Storage;
use crate::task::{parse_date, parse_input, TaskId};
use crate::types::MenuCommand;

use super::console::Console;
use super::core::{resolve_group_answer, ActionChoice, EditAction, EditOutcome, Picked, SessionCore};

/// Interactive menu loop around a [`SessionCore`].
///
/// The shell owns every side effect: prompts, the picker, the URL opener and
/// the task file. The core decides what each answer means. The store is saved
/// after each change and once more on quit.
pub struct Shell<R, W, P, O, F>
where
    F: FileSystem,
{
    core: SessionCore,
    console: Console<R, W>,
    /// `None` means the console itself is the picker.
    picker: Option<P>,
    opener: O,
    storage: Storage<F>,
    clock: Box<dyn Clock + Send>,
}

impl<R, W, P, O, F> fmt::Debug for Shell<R, W, P, O, F>
where
    F: FileSystem,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
            .field("core", &self.core)
            .field("storage", &self.storage)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<R, W, P, O, F> Shell<R, W, P, O, F>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    P: Picker,
    O: UrlOpener,
    F: FileSystem,
{
    pub fn new(
        core: SessionCore,
        console: Console<R, W>,
        picker: Option<P>,
        opener: O,
        storage: Storage<F>,
        clock: Box<dyn Clock + Send>,
    ) -> Self {
        Self {
            core,
            console,
            picker,
            opener,
            storage,
            clock,
        }
    }

    pub fn core(&self) -> &SessionCore {
        &self.core
    }

    /// Hand back the console, e.g. to inspect what a test session printed.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Main menu loop. Returns on `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        info!(path = %self.storage.path().display(), "session started");
        self.console
            .say("Type \"help\" for a list of commands.")
            .await?;

        loop {
            let Some(line) = self.console.ask("duelist>").await? else {
                debug!("end of input; quitting");
                break;
            };
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<MenuCommand>() {
                Ok(command) => command,
                Err(msg) => {
                    self.console.say(&msg).await?;
                    continue;
                }
            };
            if command == MenuCommand::Quit {
                break;
            }

            debug!(?command, "menu command");
            if let Err(err) = self.dispatch(command).await {
                // Console failures end the session; everything else aborts
                // just this operation.
                if matches!(err, DuelistError::IoError(_)) {
                    return Err(err);
                }
                warn!(error = %err, ?command, "operation aborted");
                self.console.say(&err.to_string()).await?;
            }
        }

        self.commit().await?;
        info!("session finished");
        Ok(())
    }

    async fn dispatch(&mut self, command: MenuCommand) -> Result<()> {
        match command {
            MenuCommand::Add => self.add().await,
            MenuCommand::Edit => self.edit().await,
            MenuCommand::MarkDone => self.mark_done().await,
            MenuCommand::View => self.view().await,
            MenuCommand::Help => self.help().await,
            MenuCommand::Quit => Ok(()),
        }
    }

    async fn add(&mut self) -> Result<()> {
        let today = self.clock.today();
        let Some(line) = self
            .ask_text("Task", "New task (name plus optional due:, group:, span:, url:)")
            .await?
        else {
            return Ok(());
        };
        self.add_line(&line, today).await
    }

    /// Add a task from typed text, asking for a due date and group when the
    /// text has no tags for them.
    async fn add_line(&mut self, line: &str, today: NaiveDate) -> Result<()> {
        let mut input = parse_input(line, today)?;
        if input.name.is_none() {
            return Err(DuelistError::ParseError(
                "a task needs a name besides its tags".to_string(),
            ));
        }

        if input.due.is_none() {
            input.due = Some(self.ask_date("Due", "When is it due? (blank for none)", today).await?);
        }
        if input.group.is_none() {
            input.group = Some(self.ask_group("Which group? (blank for none)").await?.unwrap_or_default());
        }

        let id = self.core.add(input.into_task()?);
        self.core.refresh(today)?;
        let shown = label(self.core.task(id)?, today, self.core.style());
        self.console.say(&format!("Added: {shown}")).await?;
        self.commit().await
    }

    async fn edit(&mut self) -> Result<()> {
        let today = self.clock.today();
        let listing = self.core.labels(today)?;
        let request = PickRequest::new("Task", "Pick a task to edit, or type a new one")
            .with_options(listing.labels().to_vec());
        let Some(selection) = self.pick(request).await? else {
            return Ok(());
        };

        match self.core.resolve_pick(selection, &listing, today)? {
            Picked::Existing(id) => self.edit_task(id, today).await,
            Picked::New(text) => {
                debug!(text = %text, "picked text matches no task; adding it");
                self.add_line(&text, today).await
            }
        }
    }

    async fn edit_task(&mut self, id: TaskId, today: NaiveDate) -> Result<()> {
        let task = self.core.task(id)?.clone();
        let menu = ActionChoice::menu_for(&task)
            .into_iter()
            .map(|choice| choice.label().to_string())
            .collect();
        let request = PickRequest::new("Action", label(&task, today, self.core.style()))
            .with_options(menu);
        let Some(answer) = self.pick_text(request).await? else {
            return Ok(());
        };

        let action = match ActionChoice::from_label(&answer) {
            Some(choice) => match self.action_for(choice, &task.name, today).await? {
                Some(action) => action,
                None => return Ok(()),
            },
            None => EditAction::ApplyTags(parse_input(&answer, today)?),
        };

        match self.core.apply(id, action, today)? {
            EditOutcome::OpenUrl(url) => {
                if let Err(err) = self.opener.open(&url).await {
                    warn!(error = %err, url = %url, "could not open url");
                    self.console.say(&err.to_string()).await?;
                }
                Ok(())
            }
            EditOutcome::Deleted(task) => {
                self.console.say(&format!("Deleted: {}", task.name)).await?;
                self.commit().await
            }
            EditOutcome::Updated => {
                self.core.refresh(today)?;
                let shown = label(self.core.task(id)?, today, self.core.style());
                self.console.say(&format!("Updated: {shown}")).await?;
                self.commit().await
            }
        }
    }

    /// Ask the follow-up question for a menu choice. `None` backs out.
    async fn action_for(
        &mut self,
        choice: ActionChoice,
        name: &str,
        today: NaiveDate,
    ) -> Result<Option<EditAction>> {
        let action = match choice {
            ActionChoice::MarkComplete => EditAction::MarkComplete,
            ActionChoice::DoneForToday => EditAction::DoneForToday,
            ActionChoice::VisitUrl => EditAction::VisitUrl,
            ActionChoice::Snooze => match self.ask_date("Snooze", "Snooze until when?", today).await? {
                Some(until) => EditAction::Snooze(until),
                None => return Ok(None),
            },
            ActionChoice::Rename => match self.ask_text("Name", "New name").await? {
                Some(name) => EditAction::Rename(name),
                None => return Ok(None),
            },
            ActionChoice::Regroup => match self.ask_group("New group (none to ungroup)").await? {
                Some(group) => EditAction::Regroup(group),
                None => return Ok(None),
            },
            ActionChoice::Reschedule => {
                let Some(answer) = self.ask_text("Due", "New due date (none to clear)").await? else {
                    return Ok(None);
                };
                if answer.eq_ignore_ascii_case("none") {
                    EditAction::Reschedule(None)
                } else {
                    EditAction::Reschedule(Some(parse_date(&answer, today)?))
                }
            }
            ActionChoice::ChangeSpan => {
                let Some(answer) = self.ask_text("Span", "Days of work needed (none to clear)").await? else {
                    return Ok(None);
                };
                if answer.eq_ignore_ascii_case("none") {
                    EditAction::SetSpan(None)
                } else {
                    let span = answer.parse().map_err(|_| {
                        DuelistError::ParseError(format!("span '{answer}' is not a whole number of days"))
                    })?;
                    EditAction::SetSpan(Some(span))
                }
            }
            ActionChoice::ChangeUrl => {
                let Some(answer) = self.ask_text("URL", "New URL (none to clear)").await? else {
                    return Ok(None);
                };
                if answer.eq_ignore_ascii_case("none") {
                    EditAction::SetUrl(None)
                } else {
                    EditAction::SetUrl(Some(answer))
                }
            }
            ActionChoice::Delete => {
                let request = PickRequest::new("Delete", format!("Delete \"{name}\"?"))
                    .with_options(vec!["yes".to_string(), "no".to_string()]);
                match self.pick_text(request).await? {
                    Some(answer) if answer.eq_ignore_ascii_case("yes") || answer.eq_ignore_ascii_case("y") => {
                        EditAction::Delete
                    }
                    _ => return Ok(None),
                }
            }
        };
        Ok(Some(action))
    }

    async fn mark_done(&mut self) -> Result<()> {
        let today = self.clock.today();
        let listing = self.core.active_labels(today)?;
        if listing.is_empty() {
            self.console.say("Nothing left to mark done.").await?;
            return Ok(());
        }

        let request = PickRequest::new("Done", "Which task is complete?")
            .with_options(listing.labels().to_vec());
        let Some(selection) = self.pick(request).await? else {
            return Ok(());
        };
        let id = match self.core.resolve_pick(selection, &listing, today)? {
            Picked::Existing(id) => id,
            Picked::New(text) => return Err(DuelistError::NotFound(text)),
        };

        self.core.apply(id, EditAction::MarkComplete, today)?;
        let name = self.core.task(id)?.name.clone();
        self.console.say(&format!("Completed: {name}")).await?;
        self.commit().await
    }

    async fn view(&mut self) -> Result<()> {
        let today = self.clock.today();
        let agenda = self.core.agenda(today)?;
        let text = agenda.to_string();
        self.console.say(text.trim_end()).await
    }

    async fn help(&mut self) -> Result<()> {
        let mut text = String::from("Commands:");
        for command in MenuCommand::ALL {
            text.push_str(&format!(
                "\n  {:<10} ({}) {}",
                command.keyword(),
                command.shortcut(),
                command.description()
            ));
        }
        self.console.say(&text).await
    }

    /// Persist the store. A failed save is reported but keeps the session
    /// going, since the tasks are still in memory.
    async fn commit(&mut self) -> Result<()> {
        if let Err(err) = self.storage.save(self.core.store()) {
            error!(error = %err, path = %self.storage.path().display(), "failed to save tasks");
            self.console
                .say(&format!("Could not save tasks: {err}"))
                .await?;
        }
        Ok(())
    }

    async fn pick(&mut self, request: PickRequest) -> Result<Option<Selection>> {
        match self.picker.as_mut() {
            Some(picker) => picker.pick(request).await,
            None => self.console.pick(request).await,
        }
    }

    /// Pick where only the text of the answer matters.
    async fn pick_text(&mut self, request: PickRequest) -> Result<Option<String>> {
        let options = request.options.clone();
        match self.pick(request).await? {
            Some(selection) => Ok(Some(selection.into_text(&options)?)),
            None => Ok(None),
        }
    }

    /// Free-text question. Blank answers are `None`.
    async fn ask_text(&mut self, prompt: &str, message: &str) -> Result<Option<String>> {
        let answer = self.pick_text(PickRequest::new(prompt, message)).await?;
        Ok(answer.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()))
    }

    async fn ask_date(&mut self, prompt: &str, message: &str, today: NaiveDate) -> Result<Option<NaiveDate>> {
        match self.ask_text(prompt, message).await? {
            Some(answer) => Ok(Some(parse_date(&answer, today)?)),
            None => Ok(None),
        }
    }

    /// Offer existing groups; the answer may be a number, a unique prefix or
    /// a new name.
    async fn ask_group(&mut self, message: &str) -> Result<Option<String>> {
        let groups = self.core.groups();
        let request = PickRequest::new("Group", message).with_options(groups.iter().cloned().collect());
        let answer = self.pick_text(request).await?;
        Ok(answer
            .filter(|a| !a.trim().is_empty())
            .map(|a| resolve_group_answer(&a, &groups)))
    }
}
