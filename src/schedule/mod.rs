// src/schedule/mod.rs

//! Due-date load balancing.
//!
//! - [`calendar`] holds day-granular date helpers.
//! - [`scheduler`] spreads tasks that share a due date backward over the gap
//!   to the previous distinct due date.

pub mod calendar;
pub mod scheduler;

pub use scheduler::{ScheduleError, ScheduleSummary, Scheduler};
