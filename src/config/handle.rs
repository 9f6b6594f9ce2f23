use crate::config::{substitute_env_vars, write_atomically};
use crate::utils::error::{FemError, Result};
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

type Defaults<T> = Box<dyn Fn() -> T + Send + Sync>;
type ReloadListener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Reloadable view over a YAML config file.
///
/// Config files are small and read at startup, so loading is synchronous.
/// A missing file is created from the defaults on open. `${VAR}` references
/// in the file are substituted from the environment before parsing.
pub struct ConfigHandle<T> {
    path: PathBuf,
    header: Option<String>,
    defaults: Defaults<T>,
    value: RwLock<Arc<T>>,
    listeners: Mutex<Vec<ReloadListener<T>>>,
}

impl<T> ConfigHandle<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn open(
        path: impl Into<PathBuf>,
        defaults: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::open_inner(path.into(), None, Box::new(defaults))
    }

    /// Like [`open`](Self::open), but every save renders `header` as leading
    /// `#` comment lines at the top of the file.
    pub fn open_with_header(
        path: impl Into<PathBuf>,
        header: impl Into<String>,
        defaults: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<Self> {
        Self::open_inner(path.into(), Some(header.into()), Box::new(defaults))
    }

    fn open_inner(path: PathBuf, header: Option<String>, defaults: Defaults<T>) -> Result<Self> {
        let initial = load(&path, header.as_deref(), &defaults)?;
        Ok(Self {
            path,
            header,
            defaults,
            value: RwLock::new(Arc::new(initial)),
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current value snapshot.
    pub fn get(&self) -> Arc<T> {
        self.value.read().clone()
    }

    /// Re-reads the file, swaps the value in, and notifies reload listeners
    /// in registration order.
    pub fn reload(&self) -> Result<Arc<T>> {
        let reloaded = Arc::new(load(&self.path, self.header.as_deref(), &self.defaults)?);
        *self.value.write() = reloaded.clone();
        for listener in self.listeners.lock().iter() {
            listener(&reloaded);
        }
        Ok(reloaded)
    }

    /// Persists the current value atomically.
    pub fn save(&self) -> Result<()> {
        let snapshot = self.get();
        write(&self.path, self.header.as_deref(), &*snapshot)
    }

    pub fn set_and_save(&self, new_value: T) -> Result<()> {
        *self.value.write() = Arc::new(new_value);
        self.save()
    }

    pub fn on_reload(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }
}

fn load<T>(path: &Path, header: Option<&str>, defaults: &Defaults<T>) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    if !path.exists() {
        let value = defaults();
        write(path, header, &value)?;
        return Ok(value);
    }

    let raw = std::fs::read_to_string(path)?;
    let substituted = substitute_env_vars(&raw);
    // An empty document means "all defaults", same as an empty mapping.
    let effective = if substituted.trim().is_empty() {
        "{}"
    } else {
        substituted.as_str()
    };
    serde_yaml::from_str(effective)
        .map_err(|e| FemError::config(format!("failed to parse config {}: {e}", path.display())))
}

fn write<T>(path: &Path, header: Option<&str>, value: &T) -> Result<()>
where
    T: Serialize,
{
    let body = serde_yaml::to_string(value)?;
    let content = match header {
        Some(header) => {
            let mut out = String::with_capacity(header.len() + body.len() + 16);
            for line in header.lines() {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
            out.push_str(&body);
            out
        }
        None => body,
    };
    write_atomically(path, &content)
}
