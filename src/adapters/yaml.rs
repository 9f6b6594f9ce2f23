use crate::config::write_atomically;
use crate::domain::model::DataRef;
use crate::domain::ports::DataEngine;
use crate::utils::error::{FemError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// File-backed [`DataEngine`] storing one YAML document per [`DataRef::Path`].
///
/// Saves go through a sibling temp file and a rename, so readers never see
/// a truncated document.
#[derive(Debug, Default, Clone)]
pub struct YamlEngine;

impl YamlEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataEngine for YamlEngine {
    async fn load(&self, data_ref: &DataRef) -> Result<Option<Value>> {
        let path = require_path(data_ref)?;
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Some(Value::Object(serde_json::Map::new())));
        }
        let tree = serde_yaml::from_str(&text).map_err(|e| {
            FemError::storage(format!("failed to parse YAML at {}: {e}", path.display()))
        })?;
        Ok(Some(tree))
    }

    async fn save(&self, data_ref: &DataRef, value: &Value) -> Result<()> {
        let path = require_path(data_ref)?;
        let text = serde_yaml::to_string(value)?;
        write_atomically(path, &text)
    }

    async fn exists(&self, data_ref: &DataRef) -> Result<bool> {
        Ok(require_path(data_ref)?.exists())
    }

    async fn delete(&self, data_ref: &DataRef) -> Result<()> {
        let path = require_path(data_ref)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn require_path(data_ref: &DataRef) -> Result<&Path> {
    match data_ref {
        DataRef::Path(path) => Ok(path),
        DataRef::Key(key) => Err(FemError::storage(format!(
            "YAML engine requires a path reference, got key '{key}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_key_ref_is_rejected() {
        let engine = YamlEngine::new();
        let result = engine.load(&DataRef::key("abc")).await;
        assert!(matches!(result, Err(FemError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let engine = YamlEngine::new();
        let data_ref = DataRef::path(dir.path().join("absent.yml"));
        assert_eq!(engine.load(&data_ref).await.unwrap(), None);
        assert!(!engine.exists(&data_ref).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let engine = YamlEngine::new();
        let data_ref = DataRef::path(dir.path().join("nested/dir/data.yml"));
        let value = serde_json::json!({"name": "spawn", "radius": 16});

        engine.save(&data_ref, &value).await.unwrap();
        assert!(engine.exists(&data_ref).await.unwrap());
        assert_eq!(engine.load(&data_ref).await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_empty_file_loads_as_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.yml");
        std::fs::write(&path, "").unwrap();

        let engine = YamlEngine::new();
        let loaded = engine.load(&DataRef::path(path)).await.unwrap();
        assert_eq!(loaded, Some(serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let engine = YamlEngine::new();
        let data_ref = DataRef::path(dir.path().join("gone.yml"));

        engine.save(&data_ref, &serde_json::json!({"a": 1})).await.unwrap();
        engine.delete(&data_ref).await.unwrap();
        assert!(!engine.exists(&data_ref).await.unwrap());
        engine.delete(&data_ref).await.unwrap();
    }
}
