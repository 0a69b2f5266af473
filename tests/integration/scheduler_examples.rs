use duelist::schedule::Scheduler;
use duelist::task::Task;
use duelist_test_utils::builders::TaskBuilder;
use duelist_test_utils::{day, today};

fn optimal_by_name(tasks: &[Task], name: &str) -> Option<chrono::NaiveDate> {
    tasks
        .iter()
        .find(|t| t.name == name)
        .and_then(|t| t.optimal_due_date)
}

#[test]
fn two_tasks_sharing_a_date_split_the_gap() {
    let tasks = Scheduler::optimized(
        vec![
            TaskBuilder::new("C").due(day(10)).build(),
            TaskBuilder::new("A").due(day(0)).build(),
            TaskBuilder::new("B").due(day(10)).build(),
        ],
        today(),
    )
    .unwrap();

    let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(optimal_by_name(&tasks, "A"), Some(day(0)));
    assert_eq!(optimal_by_name(&tasks, "B"), Some(day(5)));
    assert_eq!(optimal_by_name(&tasks, "C"), Some(day(10)));
}

#[test]
fn a_lone_task_keeps_its_date() {
    let tasks = Scheduler::optimized(vec![TaskBuilder::new("only").due(day(4)).build()], today()).unwrap();
    assert_eq!(tasks[0].optimal_due_date, Some(day(4)));
}

#[test]
fn a_cluster_with_nothing_before_it_is_unchanged() {
    let tasks = Scheduler::optimized(
        ["x", "y", "z"]
            .into_iter()
            .map(|n| TaskBuilder::new(n).due(day(5)).build())
            .collect(),
        today(),
    )
    .unwrap();
    assert!(tasks.iter().all(|t| t.optimal_due_date == Some(day(5))));
}

#[test]
fn dormant_and_undated_tasks_do_not_anchor_clusters() {
    let tasks = Scheduler::optimized(
        vec![
            TaskBuilder::new("finished").due(day(0)).complete().build(),
            TaskBuilder::new("resting").due(day(1)).snoozed_until(day(3)).build(),
            TaskBuilder::new("someday").build(),
            TaskBuilder::new("p").due(day(8)).build(),
            TaskBuilder::new("q").due(day(8)).build(),
        ],
        today(),
    )
    .unwrap();

    // Nothing active precedes the day-8 cluster, so it stays put.
    assert_eq!(optimal_by_name(&tasks, "p"), Some(day(8)));
    assert_eq!(optimal_by_name(&tasks, "q"), Some(day(8)));
    assert_eq!(optimal_by_name(&tasks, "finished"), Some(day(0)));
    assert_eq!(optimal_by_name(&tasks, "resting"), Some(day(1)));
    assert_eq!(optimal_by_name(&tasks, "someday"), None);
}

#[test]
fn several_clusters_each_fill_their_own_gap() {
    let tasks = Scheduler::optimized(
        vec![
            TaskBuilder::new("a").due(day(0)).build(),
            TaskBuilder::new("b").due(day(4)).build(),
            TaskBuilder::new("c").due(day(4)).build(),
            TaskBuilder::new("d").due(day(4)).build(),
            TaskBuilder::new("e").due(day(6)).build(),
            TaskBuilder::new("f").due(day(6)).build(),
        ],
        today(),
    )
    .unwrap();

    // 4 days over 3 tasks: floor(4/3), floor(8/3), 4.
    assert_eq!(optimal_by_name(&tasks, "b"), Some(day(1)));
    assert_eq!(optimal_by_name(&tasks, "c"), Some(day(2)));
    assert_eq!(optimal_by_name(&tasks, "d"), Some(day(4)));
    // 2 days over 2 tasks, starting from the previous cluster's date.
    assert_eq!(optimal_by_name(&tasks, "e"), Some(day(5)));
    assert_eq!(optimal_by_name(&tasks, "f"), Some(day(6)));
}

#[test]
fn user_deadlines_are_never_rewritten() {
    let tasks = Scheduler::optimized(
        vec![
            TaskBuilder::new("a").due(day(0)).build(),
            TaskBuilder::new("b").due(day(9)).build(),
            TaskBuilder::new("c").due(day(9)).build(),
        ],
        today(),
    )
    .unwrap();
    assert!(tasks[1..].iter().all(|t| t.user_due_date == Some(day(9))));
}
