use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Pointer describing where a payload is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRef {
    /// Path based reference for file-backed stores.
    Path(PathBuf),
    /// Identifier based reference for keyed stores.
    Key(String),
}

impl DataRef {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        DataRef::Path(path.into())
    }

    pub fn key(key: impl Into<String>) -> Self {
        DataRef::Key(key.into())
    }

    /// Render for log and error messages: the absolute path or the key.
    pub fn describe(&self) -> String {
        match self {
            DataRef::Path(path) => normalize(path).display().to_string(),
            DataRef::Key(key) => key.clone(),
        }
    }
}

impl fmt::Display for DataRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn normalize(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(absolute) => absolute,
        Err(_) => std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}

/// Coordinate triple parsed from command arguments, with an optional world
/// name when the sender did not imply one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub world: Option<String>,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            world: None,
        }
    }

    pub fn in_world(x: f64, y: f64, z: f64, world: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            world: Some(world.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ref_describe() {
        assert_eq!(DataRef::key("player:42").describe(), "player:42");
    }

    #[test]
    fn test_path_ref_describe_is_absolute() {
        let described = DataRef::path("some/nested/file.yml").describe();
        assert!(described.ends_with("file.yml"));
        assert_ne!(described, "some/nested/file.yml");
    }
}
