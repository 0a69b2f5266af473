// src/task/mod.rs

//! Task records and the in-memory store.
//!
//! - [`model`] defines `Task` and its lifecycle mutators.
//! - [`ordering`] is the total order used for display and scheduling.
//! - [`store`] owns the working set for one session.
//! - [`tags`] parses free-text input such as `report due:fri group:work`.

pub mod model;
pub mod ordering;
pub mod store;
pub mod tags;

pub use model::{Task, TaskId};
pub use ordering::{compare, is_less_than, sort_tasks};
pub use store::TaskStore;
pub use tags::{parse_date, parse_input, TaskInput};
