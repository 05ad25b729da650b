//! Console entry point for the task list.
//!
//! # Responsibility
//! - Parse command-line configuration and start optional file logging.
//! - Hand stdin/stdout to the interactive console loop.

mod console;

use clap::Parser;
use console::Console;
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use todolist_core::{default_log_level, init_logging, TodoStore};

#[derive(Parser, Debug)]
#[command(name = "todolist")]
#[command(about = "Single-user task list with flat-file persistence")]
#[command(version)]
struct Cli {
    /// Task file offered when save/load input is left blank
    #[arg(long, default_value = "todos.csv")]
    file: PathBuf,

    /// Load the task file before showing the menu
    #[arg(long)]
    load: bool,

    /// Log level: trace|debug|info|warn|error (needs --log-dir)
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off when unset
    #[arg(long)]
    log_dir: Option<String>,
}

impl Cli {
    /// Metadata-only record of the session setup.
    fn startup_event(&self, loaded_tasks: usize) -> String {
        format!(
            "event=app_start module=cli status=ok version={} task_file={} load_at_start={} tasks={loaded_tasks}",
            env!("CARGO_PKG_VERSION"),
            self.file.display(),
            self.load
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut store = TodoStore::new();
    if cli.load && !store.load(&cli.file) {
        eprintln!(
            "could not load `{}`; starting with an empty list",
            cli.file.display()
        );
    }
    info!("{}", cli.startup_event(store.len()));

    let stdin = io::stdin();
    let mut console = Console::new(store, stdin.lock(), io::stdout(), cli.file);
    let outcome = console.run();
    let remaining = console.into_store().len();
    match outcome {
        Ok(()) => {
            info!("event=console_exit module=cli status=ok tasks={remaining}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            warn!("event=console_exit module=cli status=error error={err}");
            eprintln!("console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
