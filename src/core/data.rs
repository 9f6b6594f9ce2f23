use crate::domain::model::DataRef;
use crate::domain::ports::DataEngine;
use crate::utils::error::Result;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

type Defaults<T> = Box<dyn Fn() -> T + Send + Sync>;
type ReloadListener<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Mutable, reloadable view over a persisted payload.
///
/// Opening a handle loads immediately; when the engine reports nothing
/// stored, the defaults are produced, saved through the engine, and become
/// the current value. The handle hands out cheap [`Arc`] snapshots, so
/// readers are never blocked by a reload in progress.
pub struct DataHandle<T> {
    data_ref: DataRef,
    engine: Arc<dyn DataEngine>,
    defaults: Defaults<T>,
    value: RwLock<Arc<T>>,
    listeners: Mutex<Vec<ReloadListener<T>>>,
}

impl<T> DataHandle<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub async fn open(
        data_ref: DataRef,
        engine: Arc<dyn DataEngine>,
        defaults: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<Self> {
        let defaults: Defaults<T> = Box::new(defaults);
        let initial = load_or_init(&data_ref, engine.as_ref(), &defaults).await?;
        Ok(Self {
            data_ref,
            engine,
            defaults,
            value: RwLock::new(Arc::new(initial)),
            listeners: Mutex::new(Vec::new()),
        })
    }

    pub fn data_ref(&self) -> &DataRef {
        &self.data_ref
    }

    /// Current value snapshot.
    pub fn get(&self) -> Arc<T> {
        self.value.read().clone()
    }

    /// Reloads from the engine, swaps the value in, and notifies reload
    /// listeners in registration order.
    pub async fn reload(&self) -> Result<Arc<T>> {
        let reloaded = load_or_init(&self.data_ref, self.engine.as_ref(), &self.defaults).await?;
        let reloaded = Arc::new(reloaded);
        *self.value.write() = reloaded.clone();
        tracing::debug!("reloaded data handle {}", self.data_ref.describe());
        for listener in self.listeners.lock().iter() {
            listener(&reloaded);
        }
        Ok(reloaded)
    }

    pub async fn exists(&self) -> Result<bool> {
        self.engine.exists(&self.data_ref).await
    }

    /// Persists the current value.
    pub async fn save(&self) -> Result<()> {
        let snapshot = self.get();
        let tree = serde_json::to_value(&*snapshot)?;
        self.engine.save(&self.data_ref, &tree).await
    }

    pub async fn set_and_save(&self, new_value: T) -> Result<()> {
        *self.value.write() = Arc::new(new_value);
        self.save().await
    }

    /// Deletes the stored payload and resets the in-memory value to the
    /// defaults without saving them.
    pub async fn delete(&self) -> Result<()> {
        self.engine.delete(&self.data_ref).await?;
        *self.value.write() = Arc::new((self.defaults)());
        Ok(())
    }

    pub fn on_reload(&self, listener: impl Fn(&T) + Send + Sync + 'static) {
        self.listeners.lock().push(Box::new(listener));
    }

    pub async fn close(&self) -> Result<()> {
        self.engine.close().await
    }
}

async fn load_or_init<T>(
    data_ref: &DataRef,
    engine: &dyn DataEngine,
    defaults: &Defaults<T>,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    match engine.load(data_ref).await? {
        Some(tree) => Ok(serde_json::from_value(tree)?),
        None => {
            let value = defaults();
            engine.save(data_ref, &serde_json::to_value(&value)?).await?;
            Ok(value)
        }
    }
}
