use femutils::ConfigHandle;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ServerConfig {
    motd: String,
    max_homes: u32,
    database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            motd: "<green>Welcome!</green>".to_string(),
            max_homes: 3,
            database_url: "mongodb://localhost:27017".to_string(),
        }
    }
}

#[test]
fn test_open_creates_file_with_defaults_and_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");

    let handle = ConfigHandle::open_with_header(
        &path,
        "femutils example config\nEdit and /reload to apply",
        ServerConfig::default,
    )
    .unwrap();

    assert_eq!(*handle.get(), ServerConfig::default());

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# femutils example config\n# Edit and /reload to apply\n"));
    assert!(written.contains("max_homes: 3"));
}

#[test]
fn test_reload_picks_up_edits_and_notifies_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    let handle = ConfigHandle::open(&path, ServerConfig::default).unwrap();

    let order = Arc::new(AtomicUsize::new(0));
    let first = order.clone();
    handle.on_reload(move |_: &ServerConfig| {
        // first listener bumps 0 -> 1
        let _ = first.compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst);
    });
    let second = order.clone();
    handle.on_reload(move |_: &ServerConfig| {
        // second listener sees the first one's bump
        let _ = second.compare_exchange(1, 2, Ordering::SeqCst, Ordering::SeqCst);
    });

    std::fs::write(&path, "motd: hi\nmax_homes: 10\n").unwrap();
    let reloaded = handle.reload().unwrap();

    assert_eq!(reloaded.max_homes, 10);
    assert_eq!(handle.get().motd, "hi");
    assert_eq!(order.load(Ordering::SeqCst), 2);
}

#[test]
fn test_env_vars_are_substituted_on_load() {
    std::env::set_var("FEMUTILS_TEST_DB_URL", "mysql://db.internal:3306");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(
        &path,
        "motd: hi\nmax_homes: 5\ndatabase_url: ${FEMUTILS_TEST_DB_URL}\n",
    )
    .unwrap();

    let handle = ConfigHandle::open(&path, ServerConfig::default).unwrap();
    assert_eq!(handle.get().database_url, "mysql://db.internal:3306");
}

#[test]
fn test_empty_file_falls_back_to_field_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(&path, "").unwrap();

    let handle = ConfigHandle::open(&path, ServerConfig::default).unwrap();
    assert_eq!(*handle.get(), ServerConfig::default());
}

#[test]
fn test_set_and_save_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    let handle = ConfigHandle::open(&path, ServerConfig::default).unwrap();

    let mut updated = ServerConfig::default();
    updated.max_homes = 8;
    handle.set_and_save(updated.clone()).unwrap();

    let reopened = ConfigHandle::open(&path, ServerConfig::default).unwrap();
    assert_eq!(*reopened.get(), updated);
    // No temp file left behind by the atomic write.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_invalid_yaml_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yml");
    std::fs::write(&path, "motd: [unclosed\n").unwrap();

    let result = ConfigHandle::open(&path, ServerConfig::default);
    assert!(matches!(result, Err(femutils::FemError::Config { .. })));
}
