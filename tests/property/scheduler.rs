use proptest::prelude::*;
use duelist::schedule::Scheduler;
use duelist::task::TaskStore;
use duelist_test_utils::builders::TaskBuilder;
use duelist_test_utils::{day, init_tracing, today};

use crate::ordering::task_strategy;

proptest! {
    #[test]
    fn optimize_preserves_membership(tasks in proptest::collection::vec(task_strategy(), 0..40)) {
        let mut store = TaskStore::from_tasks(tasks);
        let mut before: Vec<_> = store.iter().map(|t| (t.id, t.name.clone(), t.user_due_date)).collect();

        Scheduler::optimize(&mut store, today()).unwrap();

        let mut after: Vec<_> = store.iter().map(|t| (t.id, t.name.clone(), t.user_due_date)).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn optimal_dates_stay_between_earliest_and_deadline(
        tasks in proptest::collection::vec(task_strategy(), 0..40)
    ) {
        let mut store = TaskStore::from_tasks(tasks);
        let summary = Scheduler::optimize(&mut store, today()).unwrap();
        let scheduled = &store.tasks()[..summary.scheduled];

        if let Some(earliest) = scheduled.iter().filter_map(|t| t.user_due_date).min() {
            for task in scheduled {
                let optimal = task.optimal_due_date.unwrap();
                prop_assert!(optimal <= task.user_due_date.unwrap());
                prop_assert!(optimal >= earliest);
            }
        }
    }

    #[test]
    fn unscheduled_tasks_are_left_alone(tasks in proptest::collection::vec(task_strategy(), 0..40)) {
        let mut store = TaskStore::from_tasks(tasks);
        let summary = Scheduler::optimize(&mut store, today()).unwrap();

        for task in &store.tasks()[summary.scheduled..] {
            prop_assert_eq!(task.optimal_due_date, task.user_due_date);
            prop_assert!(task.user_due_date.is_none() || task.is_dormant(today()));
        }
    }

    #[test]
    fn cluster_is_spread_by_floor_formula(gap in 1i64..40, n in 1usize..12) {
        init_tracing();

        let mut store = TaskStore::new();
        store.add(TaskBuilder::new("anchor").due(day(0)).build());
        for k in 1..=n {
            store.add(TaskBuilder::new(&format!("t{k:02}")).due(day(gap)).build());
        }

        Scheduler::optimize(&mut store, today()).unwrap();

        prop_assert_eq!(store.tasks()[0].optimal_due_date, Some(day(0)));
        for k in 1..=n {
            let expected = day(gap * k as i64 / n as i64);
            prop_assert_eq!(store.tasks()[k].optimal_due_date, Some(expected));
        }
    }

    #[test]
    fn optimize_is_stable_under_repetition(tasks in proptest::collection::vec(task_strategy(), 0..30)) {
        let mut store = TaskStore::from_tasks(tasks);
        Scheduler::optimize(&mut store, today()).unwrap();
        let first = store.tasks().to_vec();
        Scheduler::optimize(&mut store, today()).unwrap();
        prop_assert_eq!(first, store.tasks().to_vec());
    }
}
