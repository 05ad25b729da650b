//! In-memory task store with flat-file persistence.
//!
//! # Responsibility
//! - Provide add/update/remove/complete entry points.
//! - Answer list, filter, search and sort queries with owned snapshots.
//! - Save to and transactionally load from task files.
//!
//! # Invariants
//! - Ids are allocated from `next_id`, start at 1 and are never reused.
//! - `order` and `tasks` always hold the same id set.
//! - A failed load leaves every field untouched.
//! - Saving never mutates the store.

use crate::model::task::{normalize_text, Task, TaskId, TaskValidationError};
use crate::repo::task_file::{FlatFileTaskRepository, RepoError, RepoResult, TaskRepository};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const FIRST_TASK_ID: TaskId = 1;

/// Error returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input rejected before any state change.
    InvalidArgument(TaskValidationError),
    /// No further ids can be allocated.
    IdSpaceExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::IdSpaceExhausted => write!(f, "no task ids left to allocate"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidArgument(err) => Some(err),
            Self::IdSpaceExhausted => None,
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidArgument(value)
    }
}

/// Single-owner task collection.
///
/// Tasks are keyed by id for lookup; `order` keeps insertion (or file) order
/// for every snapshot query.
#[derive(Debug, Clone)]
pub struct TodoStore {
    tasks: HashMap<TaskId, Task>,
    order: Vec<TaskId>,
    next_id: TaskId,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            order: Vec::new(),
            next_id: FIRST_TASK_ID,
        }
    }

    /// Adds a task and returns its newly allocated id.
    ///
    /// Accepts `&str` or `None`; text is stored trimmed.
    ///
    /// # Errors
    /// - `InvalidArgument` when text is absent or blank. The store is unchanged.
    /// - `IdSpaceExhausted` when the id counter cannot advance.
    pub fn add<'a>(&mut self, text: impl Into<Option<&'a str>>) -> Result<TaskId, StoreError> {
        let text = normalize_text(text.into())?;
        let id = self.next_id;
        let next_id = id.checked_add(1).ok_or(StoreError::IdSpaceExhausted)?;

        self.tasks.insert(id, Task::new(id, text));
        self.order.push(id);
        self.next_id = next_id;
        debug!("event=task_add module=store status=ok id={id}");
        Ok(id)
    }

    /// Replaces a task's text verbatim.
    ///
    /// No trimming or blank check is applied here, unlike `add`.
    /// Returns `false` when `id` is unknown.
    ///
    /// The task file format has no escaping: text containing a line break is
    /// cut at the first break after a save and load.
    pub fn update_text(&mut self, id: TaskId, new_text: impl Into<String>) -> bool {
        let Some(task) = self.tasks.get_mut(&id) else {
            return false;
        };
        task.text = new_text.into();
        debug!("event=task_update module=store status=ok id={id}");
        true
    }

    /// Deletes a task. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: TaskId) -> bool {
        if self.tasks.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|existing| *existing != id);
        debug!("event=task_remove module=store status=ok id={id}");
        true
    }

    /// Marks a task done. Idempotent; returns `false` when `id` is unknown.
    pub fn mark_done(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.get_mut(&id) else {
            return false;
        };
        task.mark_done();
        debug!("event=task_done module=store status=ok id={id}");
        true
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(&id).cloned()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Id the next successful `add` will return.
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    /// Snapshot of all tasks in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.iter().cloned().collect()
    }

    /// Snapshot of tasks not yet done, in insertion order.
    pub fn list_open(&self) -> Vec<Task> {
        self.iter().filter(|task| task.is_open()).cloned().collect()
    }

    /// Case-insensitive substring search on task text.
    ///
    /// The query is trimmed first; a blank or absent query returns every task.
    pub fn search<'a>(&self, query: impl Into<Option<&'a str>>) -> Vec<Task> {
        let needle = match query.into().map(str::trim) {
            Some(trimmed) if !trimmed.is_empty() => trimmed.to_lowercase(),
            _ => return self.list(),
        };

        self.iter()
            .filter(|task| task.text.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Snapshot sorted by case-insensitive text.
    ///
    /// Equal keys keep their insertion order in both directions. The store's
    /// own order is left as is.
    pub fn sort_by_text(&self, ascending: bool) -> Vec<Task> {
        let mut keyed: Vec<(String, Task)> = self
            .iter()
            .map(|task| (task.text.to_lowercase(), task.clone()))
            .collect();
        keyed.sort_by(|(left, _), (right, _)| {
            if ascending {
                left.cmp(right)
            } else {
                right.cmp(left)
            }
        });
        keyed.into_iter().map(|(_, task)| task).collect()
    }

    /// Writes all tasks to `path`, replacing any existing file.
    ///
    /// Returns `false` on any I/O failure; the cause is logged.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        match self.try_save(path) {
            Ok(()) => true,
            Err(err) => {
                warn!("event=tasks_save module=store status=error error={err}");
                false
            }
        }
    }

    /// Replaces the store contents with the tasks in `path`.
    ///
    /// Returns `false` on I/O or parse failure and keeps the prior state.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        match self.try_load(path) {
            Ok(_) => true,
            Err(err) => {
                warn!("event=tasks_load module=store status=error error={err}");
                false
            }
        }
    }

    /// `save` with the failure cause preserved.
    pub fn try_save(&self, path: impl AsRef<Path>) -> RepoResult<()> {
        self.save_to(&FlatFileTaskRepository::new(path.as_ref()))
    }

    /// `load` with the failure cause preserved. Returns the loaded task count.
    pub fn try_load(&mut self, path: impl AsRef<Path>) -> RepoResult<usize> {
        self.load_from(&FlatFileTaskRepository::new(path.as_ref()))
    }

    /// Writes a snapshot through any repository implementation.
    pub fn save_to<R: TaskRepository>(&self, repo: &R) -> RepoResult<()> {
        let tasks = self.list();
        repo.write_tasks(&tasks)?;
        info!(
            "event=tasks_save module=store status=ok count={}",
            tasks.len()
        );
        Ok(())
    }

    /// Reads from any repository and swaps state only on full success.
    ///
    /// # Errors
    /// - Repository read errors unchanged.
    /// - `InvalidData` for reserved or duplicate ids, reported with the
    ///   1-based record position.
    pub fn load_from<R: TaskRepository>(&mut self, repo: &R) -> RepoResult<usize> {
        let loaded = repo.read_tasks()?;

        let mut tasks = HashMap::with_capacity(loaded.len());
        let mut order = Vec::with_capacity(loaded.len());
        let mut max_id: TaskId = 0;
        for (index, task) in loaded.into_iter().enumerate() {
            task.validate().map_err(|err| RepoError::InvalidData {
                line: index + 1,
                message: err.to_string(),
            })?;
            let id = task.id;
            if tasks.insert(id, task).is_some() {
                return Err(RepoError::InvalidData {
                    line: index + 1,
                    message: format!("duplicate id `{id}`"),
                });
            }
            order.push(id);
            max_id = max_id.max(id);
        }

        let count = order.len();
        self.tasks = tasks;
        self.order = order;
        // `validate` keeps `max_id` below `TaskId::MAX`.
        self.next_id = max_id + 1;
        info!("event=tasks_load module=store status=ok count={count}");
        Ok(count)
    }

    fn iter(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }
}
