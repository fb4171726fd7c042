//! Worker tasks that back the runtime orchestration.
//!
//! The action worker owns the engine and the world; every command from a
//! [`crate::RuntimeHandle`] is served on its task.

mod action;

pub use action::{ActionWorker, Command};
