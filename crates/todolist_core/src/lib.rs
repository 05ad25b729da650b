//! Core task-list logic.
//! This crate owns every task invariant; front-ends only call into it.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{normalize_text, Task, TaskId, TaskValidationError};
pub use repo::task_file::{
    encode_line, parse_line, parse_tasks, FlatFileTaskRepository, RepoError, RepoResult,
    TaskRepository,
};
pub use service::todo_store::{StoreError, TodoStore};
