//! Interactive menu loop over `TodoStore`.
//!
//! # Responsibility
//! - Render menus, read and validate line input, print results.
//! - Call exactly one store operation per menu action.
//!
//! # Invariants
//! - Task files are only touched through `TodoStore::save`/`load`.
//! - End of input ends the loop like the quit entry.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use todolist_core::{Task, TaskId, TodoStore};

const MAIN_MENU: &[&str] = &[
    "Show", "Add", "Edit", "Delete", "Complete", "Save", "Load", "Quit",
];
const SHOW_MENU: &[&str] = &[
    "All",
    "Open only",
    "Search (contains...)",
    "Alphabetical (A-Z)",
    "Alphabetical (Z-A)",
];

/// Marker for exhausted input. Any pending action is abandoned.
struct EndOfInput;

type Step<T> = Result<Result<T, EndOfInput>, io::Error>;

/// Console front-end bound to one store and one pair of streams.
pub struct Console<R, W> {
    store: TodoStore,
    input: R,
    output: W,
    default_file: PathBuf,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(store: TodoStore, input: R, output: W, default_file: impl Into<PathBuf>) -> Self {
        Self {
            store,
            input,
            output,
            default_file: default_file.into(),
        }
    }

    /// Runs until the user quits or input ends.
    ///
    /// # Errors
    /// - Only stream I/O errors; store failures are reported to the user.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "=== Todo List ===")?;
            self.print_menu(MAIN_MENU)?;
            let choice = match self.read_choice(MAIN_MENU.len())? {
                Ok(choice) => choice,
                Err(EndOfInput) => break,
            };
            writeln!(self.output)?;

            let step = match choice {
                1 => self.show()?,
                2 => self.add()?,
                3 => self.edit()?,
                4 => self.delete()?,
                5 => self.complete()?,
                6 => self.save()?,
                7 => self.load()?,
                _ => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
            };
            if step.is_err() {
                break;
            }
            writeln!(self.output)?;
        }

        writeln!(self.output)?;
        writeln!(self.output, "Input closed. Goodbye!")?;
        Ok(())
    }

    /// Gives the store back, e.g. for inspection after a scripted session.
    pub fn into_store(self) -> TodoStore {
        self.store
    }

    fn show(&mut self) -> Step<()> {
        writeln!(self.output, "Show:")?;
        self.print_menu(SHOW_MENU)?;
        let choice = match self.read_choice(SHOW_MENU.len())? {
            Ok(choice) => choice,
            Err(end) => return Ok(Err(end)),
        };

        let tasks = match choice {
            1 => self.store.list(),
            2 => self.store.list_open(),
            3 => match self.read_required("Search text: ")? {
                Ok(query) => self.store.search(query.as_str()),
                Err(end) => return Ok(Err(end)),
            },
            4 => self.store.sort_by_text(true),
            _ => self.store.sort_by_text(false),
        };
        self.print_tasks(&tasks)?;
        Ok(Ok(()))
    }

    fn add(&mut self) -> Step<()> {
        let text = match self.read_required("New task: ")? {
            Ok(text) => text,
            Err(end) => return Ok(Err(end)),
        };
        match self.store.add(text.as_str()) {
            Ok(id) => writeln!(self.output, "Added with id {id}.")?,
            Err(err) => writeln!(self.output, "{err}")?,
        }
        Ok(Ok(()))
    }

    fn edit(&mut self) -> Step<()> {
        let id = match self.pick_existing_id()? {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(Ok(())),
            Err(end) => return Ok(Err(end)),
        };
        let text = match self.read_required("New text: ")? {
            Ok(text) => text,
            Err(end) => return Ok(Err(end)),
        };
        let message = if self.store.update_text(id, text) {
            "Updated."
        } else {
            "Id not found."
        };
        writeln!(self.output, "{message}")?;
        Ok(Ok(()))
    }

    fn delete(&mut self) -> Step<()> {
        let id = match self.pick_existing_id()? {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(Ok(())),
            Err(end) => return Ok(Err(end)),
        };
        let message = if self.store.remove(id) {
            "Deleted."
        } else {
            "Id not found."
        };
        writeln!(self.output, "{message}")?;
        Ok(Ok(()))
    }

    fn complete(&mut self) -> Step<()> {
        let id = match self.pick_existing_id()? {
            Ok(Some(id)) => id,
            Ok(None) => return Ok(Ok(())),
            Err(end) => return Ok(Err(end)),
        };
        let message = if self.store.mark_done(id) {
            "Marked as done."
        } else {
            "Id not found."
        };
        writeln!(self.output, "{message}")?;
        Ok(Ok(()))
    }

    fn save(&mut self) -> Step<()> {
        let target = match self.read_file_name("save")? {
            Ok(target) => target,
            Err(end) => return Ok(Err(end)),
        };
        if self.store.save(&target) {
            writeln!(self.output, "Saved to: {}", target.display())?;
        } else {
            writeln!(self.output, "Saving failed.")?;
        }
        Ok(Ok(()))
    }

    fn load(&mut self) -> Step<()> {
        let source = match self.read_file_name("load")? {
            Ok(source) => source,
            Err(end) => return Ok(Err(end)),
        };
        if !self.store.load(&source) {
            writeln!(self.output, "Loading aborted. Previous tasks are kept.")?;
            return Ok(Ok(()));
        }
        writeln!(self.output, "Loaded from: {}", source.display())?;
        self.show()
    }

    /// Lists ids and reads one that exists. `Ok(Ok(None))` for an empty store.
    fn pick_existing_id(&mut self) -> Step<Option<TaskId>> {
        let tasks = self.store.list();
        if tasks.is_empty() {
            writeln!(self.output, "There are no tasks yet.")?;
            return Ok(Ok(None));
        }

        writeln!(self.output, "Existing ids:")?;
        for task in &tasks {
            writeln!(self.output, " - {}: {}", task.id, task.text)?;
        }
        loop {
            let id = match self.read_number("Id: ")? {
                Ok(id) => id,
                Err(end) => return Ok(Err(end)),
            };
            if let Ok(id) = TaskId::try_from(id) {
                if self.store.contains(id) {
                    return Ok(Ok(Some(id)));
                }
            }
            writeln!(self.output, "This id does not exist. Please try again.")?;
        }
    }

    fn read_file_name(&mut self, verb: &str) -> Step<PathBuf> {
        let prompt = format!(
            "File name to {verb} (Enter for \"{}\"): ",
            self.default_file.display()
        );
        let line = match self.read_line(&prompt)? {
            Ok(line) => line,
            Err(end) => return Ok(Err(end)),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(Ok(self.default_file.clone()))
        } else {
            Ok(Ok(PathBuf::from(trimmed)))
        }
    }

    fn read_choice(&mut self, max: usize) -> Step<usize> {
        loop {
            let value = match self.read_number("Choice: ")? {
                Ok(value) => value,
                Err(end) => return Ok(Err(end)),
            };
            if let Ok(choice) = usize::try_from(value) {
                if (1..=max).contains(&choice) {
                    return Ok(Ok(choice));
                }
            }
            writeln!(self.output, "Please enter a number between 1 and {max}.")?;
        }
    }

    fn read_number(&mut self, prompt: &str) -> Step<i64> {
        loop {
            let line = match self.read_line(prompt)? {
                Ok(line) => line,
                Err(end) => return Ok(Err(end)),
            };
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Ok(value)),
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    /// Reads a trimmed, non-empty line.
    fn read_required(&mut self, prompt: &str) -> Step<String> {
        loop {
            let line = match self.read_line(prompt)? {
                Ok(line) => line,
                Err(end) => return Ok(Err(end)),
            };
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Ok(trimmed.to_string()));
            }
            writeln!(self.output, "Input must not be empty. Please try again.")?;
        }
    }

    fn read_line(&mut self, prompt: &str) -> Step<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Err(EndOfInput));
        }
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Ok(line))
    }

    fn print_menu(&mut self, entries: &[&str]) -> io::Result<()> {
        for (index, entry) in entries.iter().enumerate() {
            writeln!(self.output, "{}) {entry}", index + 1)?;
        }
        Ok(())
    }

    fn print_tasks(&mut self, tasks: &[Task]) -> io::Result<()> {
        if tasks.is_empty() {
            writeln!(self.output, "No tasks.")?;
            return Ok(());
        }
        writeln!(self.output, "Tasks:")?;
        for task in tasks {
            writeln!(self.output, " - {task}")?;
        }
        Ok(())
    }
}
