use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const DB_ENV_VAR: &str = "TODOLITE_DB";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "TODOLITE_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";
const DB_FILE_NAME: &str = "tasks.db";
const LOG_FILE_NAME: &str = "todolite.log";

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// Resolves the configuration.
    ///
    /// The database path is determined in the following order:
    /// 1. the `--db` flag (`cli_db`).
    /// 2. the `TODOLITE_DB` environment variable.
    /// 3. `~/.local/share/todolite/tasks.db` (on Linux).
    /// 4. `./tasks.db` (fallback).
    pub fn resolve(cli_db: Option<PathBuf>) -> Config {
        let db_path = cli_db
            .or_else(|| std::env::var(DB_ENV_VAR).ok().map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        let log_filter =
            std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
        Config::with_db_path(db_path, log_filter)
    }

    /// Builds a configuration around an explicit database path; the log file sits beside it.
    pub fn with_db_path(db_path: PathBuf, log_filter: String) -> Config {
        let log_path = sibling(&db_path, LOG_FILE_NAME);
        Config {
            db_path,
            log_path,
            log_filter,
        }
    }
}

fn default_db_path() -> PathBuf {
    match dirs::data_local_dir() {
        Some(mut p) => {
            p.push("todolite");
            if !p.exists() {
                let _ = fs::create_dir_all(&p);
            }
            p.push(DB_FILE_NAME);
            p
        }
        None => PathBuf::from(DB_FILE_NAME),
    }
}

fn sibling(path: &Path, name: &str) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}
