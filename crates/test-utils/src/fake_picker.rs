use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use duelist::errors::{DuelistError, Result};
use duelist::picker::{BoxFuture, PickRequest, Picker, Selection, UrlOpener};

#[derive(Debug, Clone)]
enum Step {
    Answer(String),
    Choose(usize),
    Dismiss,
    Fail,
}

/// A picker that replays a fixed script and records every request.
///
/// Once the script runs out, every further pick is dismissed (`Ok(None)`).
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    steps: Arc<Mutex<VecDeque<Step>>>,
    requests: Arc<Mutex<Vec<PickRequest>>>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(self, line: &str) -> Self {
        self.push(Step::Answer(line.to_string()))
    }

    /// Pick the option at `index` (0-based) by position, like a picker that
    /// reports which row was chosen.
    pub fn choose(self, index: usize) -> Self {
        self.push(Step::Choose(index))
    }

    pub fn dismiss(self) -> Self {
        self.push(Step::Dismiss)
    }

    /// Make the next pick fail as if the picker could not be launched.
    pub fn fail(self) -> Self {
        self.push(Step::Fail)
    }

    /// Requests seen so far, in order. Shared between clones.
    pub fn requests(&self) -> Vec<PickRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(self, step: Step) -> Self {
        self.steps.lock().unwrap().push_back(step);
        self
    }
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, request: PickRequest) -> BoxFuture<'_, Result<Option<Selection>>> {
        let step = self.steps.lock().unwrap().pop_front();
        self.requests.lock().unwrap().push(request);

        Box::pin(async move {
            match step {
                Some(Step::Answer(line)) => Ok(Some(Selection::Text(line))),
                Some(Step::Choose(index)) => Ok(Some(Selection::Index(index))),
                Some(Step::Dismiss) | None => Ok(None),
                Some(Step::Fail) => Err(DuelistError::ExternalCollaborator(
                    "scripted picker failure".to_string(),
                )),
            }
        })
    }
}

/// Records URLs instead of opening them.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> BoxFuture<'_, Result<()>> {
        self.opened.lock().unwrap().push(url.to_string());
        Box::pin(async { Ok(()) })
    }
}
