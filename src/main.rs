//! # todolite
//!
//! A small single-user to-do list backed by a local SQLite table. Tasks carry a
//! title, a priority from 0 to 10, and soft and hard deadlines. An interactive
//! TUI shows current tasks and a history of completed ones; the CLI exposes
//! the same operations for scripting.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive mode
//! todolite
//!
//! # Add, list, complete
//! todolite add "Write report" -p 5 --soft "2025-01-01 09:00" --hard "2025-01-02 17:00"
//! todolite list
//! todolite complete 1
//!
//! # Bulk import from a JSON array of {title, priority, soft_deadline, hard_deadline}
//! todolite import tasks.json
//! ```
//!
//! #### TUI Key Bindings
//!
//! *   `a`: Add new task
//! *   `Space`: Mark selected task as done
//! *   `d`: Delete selected task (current or history pane)
//! *   `+` / `-`: Raise / lower priority
//! *   `p`: Set priority
//! *   `i`: Import tasks from a file
//! *   `Tab`: Switch between current tasks and history
//! *   `q`: Quit
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/todolite/tasks.db`
//! *   macOS: `~/Library/Application Support/todolite/tasks.db`
//! *   Windows: `%LOCALAPPDATA%\todolite\tasks.db`
//!
//! Override with `--db <path>` or the `TODOLITE_DB` environment variable.
//! Set `TODOLITE_LOG` (e.g. `debug`) to change log verbosity.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use todolite::board::TaskBoard;
use todolite::commands::*;
use todolite::config::Config;
use todolite::error::Result;
use todolite::logging::{init_subscriber, LogTarget};
use todolite::storage::TaskStore;
use todolite::tui::run_tui;

#[derive(Parser)]
#[command(name = "todolite")]
#[command(about = "Simple prioritized to-do list", long_about = None)]
struct Cli {
    /// Path to the task database
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Priority from 0 to 10
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        priority: i64,
        /// Soft deadline, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(short, long)]
        soft: Option<String>,
        /// Hard deadline, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(short = 'H', long)]
        hard: Option<String>,
    },
    /// List tasks
    List {
        /// Show all tasks, highest priority first
        #[arg(short, long, conflicts_with = "completed")]
        all: bool,
        /// Show completed tasks only
        #[arg(short, long)]
        completed: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as complete
    Complete {
        id: i64,
    },
    /// Remove a task
    Remove {
        id: i64,
    },
    /// Change the priority of a task
    Priority {
        id: i64,
        /// New priority from 0 to 10
        #[arg(allow_negative_numbers = true)]
        priority: i64,
    },
    /// Import tasks from a JSON file (all or nothing)
    Import {
        file: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Open interactive TUI
    Ui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "todolite", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let config = Config::resolve(cli.db);
    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Commands>, config: &Config) -> Result<()> {
    let interactive = matches!(command, None | Some(Commands::Ui));
    let target = if interactive {
        LogTarget::File(&config.log_path)
    } else {
        LogTarget::Stderr
    };
    init_subscriber(&config.log_filter, target);

    let store = TaskStore::open(&config.db_path)?;
    let mut board = TaskBoard::new(store)?;

    match command {
        Some(Commands::Add { title, priority, soft, hard }) => {
            cmd_add(&mut board, title, priority, soft, hard)
        }
        Some(Commands::List { all, completed, json }) => {
            let filter = if all {
                ListFilter::All
            } else if completed {
                ListFilter::Completed
            } else {
                ListFilter::Active
            };
            cmd_list(&board, filter, json)
        }
        Some(Commands::Complete { id }) => cmd_complete(&mut board, id),
        Some(Commands::Remove { id }) => cmd_remove(&mut board, id),
        Some(Commands::Priority { id, priority }) => cmd_priority(&mut board, id, priority),
        Some(Commands::Import { file }) => cmd_import(&mut board, &file),
        Some(Commands::Completions { .. }) => Ok(()),
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(board) {
                eprintln!("Error running TUI: {}", e);
            }
            Ok(())
        }
    }
}
