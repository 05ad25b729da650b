//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record (`id`, `text`, `done`).
//! - Provide creation-time text validation.
//!
//! # Invariants
//! - `id` is positive, below `TaskId::MAX`, and immutable once assigned.
//! - Text created through `normalize_text` is trimmed and non-empty.
//! - `done` only moves from `false` to `true` through public store APIs.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier assigned by the store. Starts at 1.
pub type TaskId = u32;

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text was absent, empty or whitespace-only.
    BlankText,
    /// Id `0` and `TaskId::MAX` are never assigned.
    InvalidId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "task text must not be empty"),
            Self::InvalidId(id) => write!(f, "task id {id} is out of range"),
        }
    }
}

impl Error for TaskValidationError {}

/// One entry of the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
}

impl Task {
    /// Creates an open task.
    ///
    /// Does not validate `text`; callers creating user tasks go through
    /// `normalize_text` first.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self::with_state(id, text, false)
    }

    /// Creates a task with an explicit completion flag.
    ///
    /// Used by the file codec where state already exists on disk.
    pub fn with_state(id: TaskId, text: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            text: text.into(),
            done,
        }
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn is_open(&self) -> bool {
        !self.done
    }

    /// Checks invariants that hold for every stored task.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id == 0 || self.id == TaskId::MAX {
            return Err(TaskValidationError::InvalidId(self.id));
        }
        Ok(())
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = if self.done { "✔" } else { " " };
        write!(f, "[{status}] #{} {}", self.id, self.text)
    }
}

/// Trims creation input and rejects blank values.
///
/// # Errors
/// - Returns `BlankText` when `text` is `None` or trims to an empty string.
pub fn normalize_text(text: Option<&str>) -> Result<String, TaskValidationError> {
    match text.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(TaskValidationError::BlankText),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_text, Task, TaskValidationError};

    #[test]
    fn normalize_text_trims_surrounding_whitespace() {
        assert_eq!(normalize_text(Some("  milk \t")).unwrap(), "milk");
    }

    #[test]
    fn normalize_text_rejects_blank_and_absent_input() {
        assert_eq!(normalize_text(Some("")), Err(TaskValidationError::BlankText));
        assert_eq!(
            normalize_text(Some(" \n ")),
            Err(TaskValidationError::BlankText)
        );
        assert_eq!(normalize_text(None), Err(TaskValidationError::BlankText));
    }

    #[test]
    fn display_marks_done_tasks() {
        let mut task = Task::new(7, "water plants");
        assert_eq!(task.to_string(), "[ ] #7 water plants");

        task.mark_done();
        assert_eq!(task.to_string(), "[✔] #7 water plants");
    }

    #[test]
    fn validate_rejects_reserved_ids() {
        let task = Task::new(0, "orphan");
        assert_eq!(task.validate(), Err(TaskValidationError::InvalidId(0)));

        let task = Task::new(u32::MAX, "overflow");
        assert_eq!(
            task.validate(),
            Err(TaskValidationError::InvalidId(u32::MAX))
        );
        assert!(Task::new(1, "ok").validate().is_ok());
    }
}
