//! Flat-file task repository.
//!
//! # Responsibility
//! - Encode tasks as `id;done;text` lines and parse them back.
//! - Provide read/write of whole task files.
//!
//! # Invariants
//! - A line splits on the first two `;` only; `text` keeps any further `;`.
//! - Lines with fewer than three fields are skipped, not rejected.
//! - Unparsable `id`/`done` tokens, non-positive ids and duplicate ids reject
//!   the whole file.

use crate::model::task::{Task, TaskId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const FIELD_SEPARATOR: char = ';';

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for task file persistence.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
    /// `line` is 1-based.
    InvalidData { line: usize, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidData { line, message } => {
                write!(f, "invalid task data on line {line}: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidData { .. } => None,
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Storage contract for whole-collection task persistence.
pub trait TaskRepository {
    fn read_tasks(&self) -> RepoResult<Vec<Task>>;
    fn write_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Task repository backed by one delimited text file.
#[derive(Debug, Clone)]
pub struct FlatFileTaskRepository {
    path: PathBuf,
}

impl FlatFileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskRepository for FlatFileTaskRepository {
    fn read_tasks(&self) -> RepoResult<Vec<Task>> {
        let content = std::fs::read_to_string(&self.path)?;
        parse_tasks(&content)
    }

    /// Overwrites the target file with one line per task.
    fn write_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        for task in tasks {
            writeln!(writer, "{}", encode_line(task))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Encodes one task without a trailing newline.
pub fn encode_line(task: &Task) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        task.id, task.done, task.text
    )
}

/// Parses one line.
///
/// Returns `Ok(None)` when the line has fewer than three fields.
///
/// # Errors
/// - `InvalidData` when the `id` or `done` token cannot be parsed or the id
///   is not positive.
pub fn parse_line(line: &str, line_no: usize) -> RepoResult<Option<Task>> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    let (Some(id_raw), Some(done_raw), Some(text)) = (fields.next(), fields.next(), fields.next())
    else {
        return Ok(None);
    };

    let id = id_raw
        .trim()
        .parse::<TaskId>()
        .map_err(|_| RepoError::InvalidData {
            line: line_no,
            message: format!("invalid id `{id_raw}`"),
        })?;
    let done = parse_done(done_raw.trim()).ok_or_else(|| RepoError::InvalidData {
        line: line_no,
        message: format!("invalid done flag `{done_raw}`"),
    })?;

    let task = Task::with_state(id, text, done);
    task.validate().map_err(|err| RepoError::InvalidData {
        line: line_no,
        message: err.to_string(),
    })?;
    Ok(Some(task))
}

/// Parses a whole file body into tasks in file order.
///
/// # Errors
/// - Propagates the first `parse_line` failure.
/// - `InvalidData` when an id appears twice.
pub fn parse_tasks(content: &str) -> RepoResult<Vec<Task>> {
    let mut tasks = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let Some(task) = parse_line(line, line_no)? else {
            continue;
        };
        if !seen.insert(task.id) {
            return Err(RepoError::InvalidData {
                line: line_no,
                message: format!("duplicate id `{}`", task.id),
            });
        }
        tasks.push(task);
    }

    Ok(tasks)
}

fn parse_done(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
