//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the task record shared by the store, the file codec and the CLI.
//!
//! # Invariants
//! - Every task is identified by a positive `TaskId` that is never reused
//!   within one store.

pub mod task;
