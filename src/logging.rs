use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go.
pub enum LogTarget<'a> {
    /// Human-readable output on stderr, used by one-shot CLI commands.
    Stderr,
    /// Appends to a file; the TUI owns the terminal so it must not log there.
    File(&'a Path),
}

/// Initializes the global tracing subscriber.
///
/// Call once at startup; subsequent calls are no-ops. `filter` is any
/// `EnvFilter` directive, e.g. `"warn"` or `"todolite=debug"`. If a log file
/// is requested but cannot be opened, logging stays off rather than writing
/// to the terminal.
pub fn init_subscriber(filter: &str, target: LogTarget<'_>) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact();

    // try_init is a no-op if a subscriber is already set
    let _ = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => match open_log_file(path) {
            Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).try_init(),
            Err(_) => return,
        },
    };
}

/// Opens `path` for appending, creating its parent directory first.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
