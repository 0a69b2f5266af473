use proptest::prelude::*;
use duelist::task::{is_less_than, sort_tasks, Task};
use duelist_test_utils::builders::TaskBuilder;
use duelist_test_utils::{day, today};

// Small alphabets so that ties at every level of the order actually happen.
pub fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-c]{1,2}",
        prop_oneof![Just(""), Just("home"), Just("work")],
        proptest::option::of(-5i64..20),
        any::<bool>(),
        proptest::option::of(-3i64..5),
    )
        .prop_map(|(name, group, due, complete, snooze)| {
            let mut builder = TaskBuilder::new(&name).group(group);
            if let Some(offset) = due {
                builder = builder.due(day(offset));
            }
            if complete {
                builder = builder.complete();
            }
            if let Some(offset) = snooze {
                builder = builder.snoozed_until(day(offset));
            }
            builder.build()
        })
}

proptest! {
    #[test]
    fn sorting_is_idempotent(mut tasks in proptest::collection::vec(task_strategy(), 0..30)) {
        sort_tasks(&mut tasks, today());
        let once = tasks.clone();
        sort_tasks(&mut tasks, today());
        prop_assert_eq!(once, tasks);
    }

    #[test]
    fn sorted_output_never_has_an_inversion(mut tasks in proptest::collection::vec(task_strategy(), 0..30)) {
        sort_tasks(&mut tasks, today());
        for pair in tasks.windows(2) {
            prop_assert!(!is_less_than(&pair[1], &pair[0], today()));
        }
    }

    #[test]
    fn active_tasks_come_first(mut tasks in proptest::collection::vec(task_strategy(), 0..30)) {
        sort_tasks(&mut tasks, today());
        let first_dormant = tasks
            .iter()
            .position(|t| t.is_dormant(today()))
            .unwrap_or(tasks.len());
        prop_assert!(tasks[first_dormant..].iter().all(|t| t.is_dormant(today())));
    }
}
