use femutils::{DataHandle, DataRef, YamlEngine};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PlayerStats {
    coins: u64,
    rank: String,
    homes: Vec<String>,
}

fn default_stats() -> PlayerStats {
    PlayerStats {
        coins: 0,
        rank: "member".to_string(),
        homes: vec![],
    }
}

#[tokio::test]
async fn test_open_writes_defaults_when_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("players/steve.yml");
    let engine = Arc::new(YamlEngine::new());

    let handle = DataHandle::open(DataRef::path(&path), engine, default_stats)
        .await
        .unwrap();

    assert_eq!(*handle.get(), default_stats());
    assert!(path.exists());
    assert!(handle.exists().await.unwrap());
}

#[tokio::test]
async fn test_set_and_save_round_trips_through_fresh_handle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steve.yml");
    let engine = Arc::new(YamlEngine::new());

    let handle = DataHandle::open(DataRef::path(&path), engine.clone(), default_stats)
        .await
        .unwrap();
    let updated = PlayerStats {
        coins: 1_250,
        rank: "vip".to_string(),
        homes: vec!["base".to_string(), "farm".to_string()],
    };
    handle.set_and_save(updated.clone()).await.unwrap();

    let reopened = DataHandle::open(DataRef::path(&path), engine, default_stats)
        .await
        .unwrap();
    assert_eq!(*reopened.get(), updated);
}

#[tokio::test]
async fn test_reload_picks_up_external_changes_and_notifies() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steve.yml");
    let engine = Arc::new(YamlEngine::new());

    let handle = DataHandle::open(DataRef::path(&path), engine, default_stats)
        .await
        .unwrap();

    let notified = Arc::new(AtomicUsize::new(0));
    let seen = notified.clone();
    handle.on_reload(move |stats: &PlayerStats| {
        if stats.rank == "admin" {
            seen.fetch_add(1, Ordering::SeqCst);
        }
    });

    std::fs::write(&path, "coins: 9000\nrank: admin\nhomes: [spawn]\n").unwrap();
    let reloaded = handle.reload().await.unwrap();

    assert_eq!(reloaded.coins, 9_000);
    assert_eq!(handle.get().rank, "admin");
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_resets_to_defaults_without_saving() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("steve.yml");
    let engine = Arc::new(YamlEngine::new());

    let handle = DataHandle::open(DataRef::path(&path), engine, default_stats)
        .await
        .unwrap();
    handle
        .set_and_save(PlayerStats {
            coins: 42,
            rank: "vip".to_string(),
            homes: vec![],
        })
        .await
        .unwrap();

    handle.delete().await.unwrap();

    assert!(!handle.exists().await.unwrap());
    assert!(!path.exists());
    assert_eq!(*handle.get(), default_stats());
}

#[tokio::test]
async fn test_key_ref_against_yaml_engine_is_a_storage_error() {
    let engine = Arc::new(YamlEngine::new());
    let result = DataHandle::open(DataRef::key("player:1"), engine, default_stats).await;
    assert!(matches!(result, Err(femutils::FemError::Storage { .. })));
}
