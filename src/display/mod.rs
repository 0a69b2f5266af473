// src/display/mod.rs

//! Presentation of an optimized store. Nothing here mutates a task.
//!
//! - [`urgency`] turns `(optimal, deadline, today)` into "due tomorrow" etc.
//! - [`label`] renders the one-line form used in lists and pickers.
//! - [`agenda`] groups tasks into the day-by-day "view" screen.

pub mod agenda;
pub mod label;
pub mod urgency;

pub use agenda::{Agenda, AgendaSection};
pub use label::label;
pub use urgency::{effective_date, urgency, DisplayStyle};
