//! Persistence contracts and the flat-file implementation.
//!
//! # Responsibility
//! - Define the task persistence contract used by the store.
//! - Keep file format details inside the core persistence boundary.
//!
//! # Invariants
//! - Reads validate the whole source before returning any task.
//! - Repository APIs distinguish transport errors (`Io`) from malformed
//!   persisted data (`InvalidData`).

pub mod task_file;
