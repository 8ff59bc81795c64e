use tempfile::TempDir;
use todolite::config::Config;
use todolite::logging::{init_subscriber, LogTarget};
use todolite::storage::TaskStore;

// Installs the global subscriber, so this file holds a single test.
#[test]
fn test_tui_log_file_created_beside_new_database_directory() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_db_path(dir.path().join("fresh").join("tasks.db"), "warn".into());

    init_subscriber(&config.log_filter, LogTarget::File(&config.log_path));
    assert!(config.log_path.exists());

    TaskStore::open(&config.db_path).unwrap();
    tracing::warn!("bulk import rolled back");

    let written = std::fs::read_to_string(&config.log_path).unwrap();
    assert!(written.contains("bulk import rolled back"));
    assert!(!written.contains('\u{1b}'));
}
