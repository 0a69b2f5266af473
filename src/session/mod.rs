// src/session/mod.rs

//! Interactive session.
//!
//! Split the same way as a runtime with a pure core:
//! - [`SessionCore`]: owns the `TaskStore`, applies [`EditAction`]s, resolves
//!   picker output to task ids. No IO.
//! - [`Shell`]: async menu loop doing the prompting, picking, opening and
//!   saving around the core.
//! - [`Console`]: line IO over any async reader/writer; also the fallback
//!   [`Picker`](crate::picker::Picker).

pub mod console;
pub mod core;
pub mod shell;

pub use console::Console;
pub use core::{
    resolve_group_answer, ActionChoice, EditAction, EditOutcome, Listing, Picked, SessionCore,
};
pub use shell::Shell;
