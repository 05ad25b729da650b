//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory task collection and its id allocation.
//! - Keep front-ends decoupled from file format details.

pub mod todo_store;
