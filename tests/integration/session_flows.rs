// Whole menu sessions driven by scripted console input and a scripted picker.

use duelist::clock::FixedClock;
use duelist::display::DisplayStyle;
use duelist::fs::mock::MockFileSystem;
use duelist::session::{Console, SessionCore, Shell};
use duelist::storage::Storage;
use duelist::task::TaskStore;
use duelist::types::StoreFormat;
use duelist_test_utils::builders::{StoreBuilder, TaskBuilder};
use duelist_test_utils::fake_picker::{RecordingOpener, ScriptedPicker};
use duelist_test_utils::{day, init_tracing, today, with_timeout};

const PATH: &str = "/home/user/.duelist.json";

type TestShell = Shell<&'static [u8], Vec<u8>, ScriptedPicker, RecordingOpener, MockFileSystem>;

struct Harness {
    fs: MockFileSystem,
    picker: ScriptedPicker,
    opener: RecordingOpener,
}

impl Harness {
    fn new(picker: ScriptedPicker) -> Self {
        init_tracing();
        Self {
            fs: MockFileSystem::new(),
            picker,
            opener: RecordingOpener::new(),
        }
    }

    fn shell(&self, input: &'static str, store: TaskStore, use_picker: bool) -> TestShell {
        Shell::new(
            SessionCore::new(store, DisplayStyle::default()),
            Console::new(input.as_bytes(), Vec::new()),
            use_picker.then(|| self.picker.clone()),
            self.opener.clone(),
            Storage::new(self.fs.clone(), PATH, StoreFormat::Json),
            Box::new(FixedClock(today())),
        )
    }

    /// Run a session with the scripted picker; returns everything printed.
    async fn run(&self, input: &'static str, store: TaskStore) -> String {
        let mut shell = self.shell(input, store, true);
        with_timeout(shell.run()).await.unwrap();
        output(shell)
    }

    fn saved(&self) -> TaskStore {
        Storage::new(self.fs.clone(), PATH, StoreFormat::Json).load().unwrap()
    }
}

fn output(shell: TestShell) -> String {
    String::from_utf8(shell.into_console().into_parts().1).unwrap()
}

fn laundry() -> TaskStore {
    StoreBuilder::new().with(TaskBuilder::new("laundry")).build()
}

#[tokio::test]
async fn add_with_tags_asks_nothing_else() {
    let h = Harness::new(ScriptedPicker::new().answer("write report due:+3 group:work"));
    h.run("add\nquit\n", TaskStore::new()).await;

    let saved = h.saved();
    let task = &saved.tasks()[0];
    assert_eq!(task.name, "write report");
    assert_eq!(task.group, "work");
    assert_eq!(task.user_due_date, Some(day(3)));
    assert_eq!(h.picker.requests().len(), 1);
}

#[tokio::test]
async fn add_asks_for_missing_due_date_and_group() {
    let h = Harness::new(
        ScriptedPicker::new()
            .answer("stretch")
            .answer("tomorrow")
            .answer("ho"),
    );
    let store = StoreBuilder::new()
        .with(TaskBuilder::new("sweep").group("home"))
        .build();
    h.run("add\nquit\n", store).await;

    let requests = h.picker.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[2].options, ["home"]);

    let saved = h.saved();
    let task = saved.iter().find(|t| t.name == "stretch").unwrap();
    assert_eq!(task.user_due_date, Some(day(1)));
    assert_eq!(task.group, "home");
}

#[tokio::test]
async fn edit_marks_a_task_complete() {
    let h = Harness::new(ScriptedPicker::new().answer("laundry").answer("Mark it complete"));
    let out = h.run("edit\nquit\n", laundry()).await;

    assert!(h.saved().tasks()[0].complete);
    assert!(out.contains("Updated: laundry (complete)"));

    let requests = h.picker.requests();
    assert_eq!(requests[0].options, ["laundry"]);
    assert!(!requests[1].options.iter().any(|o| o == "Visit URL"));
}

#[tokio::test]
async fn edit_with_unknown_text_adds_it() {
    let h = Harness::new(ScriptedPicker::new().answer("buy milk due:today group:home"));
    h.run("e\nq\n", laundry()).await;

    let saved = h.saved();
    assert_eq!(saved.len(), 2);
    let milk = saved.iter().find(|t| t.name == "buy milk").unwrap();
    assert_eq!(milk.user_due_date, Some(today()));
    assert_eq!(milk.group, "home");
}

#[tokio::test]
async fn action_menu_accepts_typed_tags() {
    let h = Harness::new(ScriptedPicker::new().answer("laundry").answer("due:+2 span:1"));
    h.run("edit\nquit\n", laundry()).await;

    let saved = h.saved();
    let task = &saved.tasks()[0];
    assert_eq!(task.name, "laundry");
    assert_eq!(task.user_due_date, Some(day(2)));
    assert_eq!(task.span, Some(1));
}

#[tokio::test]
async fn rename_and_delete() {
    let h = Harness::new(
        ScriptedPicker::new()
            .answer("laundry")
            .answer("Change its name")
            .answer("wash clothes")
            .answer("wash clothes")
            .answer("Delete this task")
            .answer("yes"),
    );
    let out = h.run("edit\nedit\nquit\n", laundry()).await;

    assert!(out.contains("Updated: wash clothes"));
    assert!(out.contains("Deleted: wash clothes"));
    assert!(h.saved().is_empty());
}

#[tokio::test]
async fn visit_url_hands_the_link_to_the_opener() {
    let h = Harness::new(ScriptedPicker::new().answer("read").answer("Visit URL"));
    let store = StoreBuilder::new()
        .with(TaskBuilder::new("read").url("https://example.org/article"))
        .build();
    h.run("edit\nquit\n", store).await;

    assert_eq!(h.opener.opened(), ["https://example.org/article"]);
}

#[tokio::test]
async fn picker_failure_aborts_and_keeps_the_store() {
    let h = Harness::new(ScriptedPicker::new().fail());
    let mut shell = h.shell("edit\nquit\n", laundry(), true);
    shell.run().await.unwrap();

    let store = shell.core().store();
    assert_eq!(store.len(), 1);
    assert!(!store.tasks()[0].complete);
    assert!(output(shell).contains("External command failed"));
}

#[tokio::test]
async fn dismissed_picker_changes_nothing() {
    let h = Harness::new(ScriptedPicker::new());
    h.run("edit\nmark-done\nquit\n", laundry()).await;

    let saved = h.saved();
    assert_eq!(saved.len(), 1);
    assert!(!saved.tasks()[0].complete);
}

#[tokio::test]
async fn mark_done_completes_or_reports_unknown_tasks() {
    let h = Harness::new(ScriptedPicker::new().answer("nope").answer("laundry"));
    let out = h.run("d\nd\nq\n", laundry()).await;

    assert!(out.contains("Task not found: nope"));
    assert!(out.contains("Completed: laundry"));
    assert!(h.saved().tasks()[0].complete);
}

fn two_calls_to_mom() -> TaskStore {
    StoreBuilder::new()
        .with(TaskBuilder::new("call mom").url("https://first.test"))
        .with(TaskBuilder::new("call mom").url("https://second.test"))
        .build()
}

fn completed_urls(store: &TaskStore) -> Vec<&str> {
    store
        .iter()
        .filter(|t| t.complete)
        .filter_map(|t| t.url.as_deref())
        .collect()
}

#[tokio::test]
async fn numbered_pick_acts_on_that_task_when_labels_repeat() {
    let h = Harness::new(ScriptedPicker::new());
    let mut shell = h.shell("d\n2\nq\n", two_calls_to_mom(), false);
    shell.run().await.unwrap();

    assert!(output(shell).contains("  1. call mom\n  2. call mom\n"));
    assert_eq!(completed_urls(&h.saved()), ["https://second.test"]);
}

#[tokio::test]
async fn chosen_position_reaches_the_action_menu_of_that_task() {
    let h = Harness::new(ScriptedPicker::new().choose(1).answer("Mark it complete"));
    h.run("edit\nquit\n", two_calls_to_mom()).await;

    assert_eq!(completed_urls(&h.saved()), ["https://second.test"]);
    // The action menu was offered for the second task, which has a URL.
    let requests = h.picker.requests();
    assert!(requests[1].options.iter().any(|o| o == "Visit URL"));
}

#[tokio::test]
async fn view_prints_the_agenda() {
    let h = Harness::new(ScriptedPicker::new());
    let store = StoreBuilder::new()
        .with(TaskBuilder::new("pay rent").due(today()))
        .with(TaskBuilder::new("someday"))
        .build();
    let out = h.run("view\nquit\n", store).await;

    assert!(out.contains("Today:\n  - pay rent (due today)\n"));
    assert!(out.contains("No due date:\n  - someday\n"));
}

#[tokio::test]
async fn end_of_input_quits_and_saves() {
    let h = Harness::new(ScriptedPicker::new());
    h.run("", laundry()).await;
    assert_eq!(h.saved().len(), 1);
}

#[tokio::test]
async fn unknown_commands_and_help() {
    let h = Harness::new(ScriptedPicker::new());
    let out = h.run("frobnicate\nh\nq\n", TaskStore::new()).await;

    assert!(out.contains("unknown command: frobnicate"));
    assert!(out.contains("mark-done"));
    assert!(out.contains("(d)"));
}

#[tokio::test]
async fn save_failures_are_reported_not_fatal() {
    let h = Harness::new(ScriptedPicker::new().answer("stretch due:today group:none"));
    h.fs.fail_writes(true);

    let mut shell = h.shell("add\nquit\n", TaskStore::new(), true);
    shell.run().await.unwrap();

    assert_eq!(shell.core().store().len(), 1);
    assert!(output(shell).contains("Could not save tasks"));
}

#[tokio::test]
async fn terminal_is_the_picker_when_none_is_configured() {
    let h = Harness::new(ScriptedPicker::new());
    let mut shell = h.shell(
        "add\nstretch due:today group:none\nedit\n1\n1\nquit\n",
        TaskStore::new(),
        false,
    );
    shell.run().await.unwrap();

    let saved = h.saved();
    assert_eq!(saved.tasks()[0].name, "stretch");
    // Picked task 1, then action 1 ("Mark it complete").
    assert!(saved.tasks()[0].complete);
    assert!(h.picker.requests().is_empty());
}
