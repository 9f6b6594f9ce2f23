use crate::domain::model::DataRef;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Storage backend for [`DataHandle`](crate::core::data::DataHandle).
///
/// Engines exchange payloads as JSON value trees; the handle converts
/// between trees and typed values. An engine that only supports one
/// [`DataRef`] variant returns a storage error when handed the other.
#[async_trait]
pub trait DataEngine: Send + Sync {
    /// Loads the payload tree, or `None` when nothing is stored yet.
    async fn load(&self, data_ref: &DataRef) -> Result<Option<Value>>;

    async fn save(&self, data_ref: &DataRef, value: &Value) -> Result<()>;

    async fn exists(&self, data_ref: &DataRef) -> Result<bool>;

    /// Removes the payload. Deleting something absent is not an error.
    async fn delete(&self, data_ref: &DataRef) -> Result<()>;

    /// Releases any backing resources. Default is a no-op.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// The party a command is executed for: a player or the console.
pub trait CommandSender: Send + Sync {
    fn name(&self) -> &str;

    fn is_player(&self) -> bool;

    fn has_permission(&self, node: &str) -> bool;

    /// Delivers a rendered message. Styling tags inside the text are the
    /// embedding platform's concern.
    fn send_message(&self, text: &str);
}

/// Live server lookups used by tab completion and player arguments.
pub trait ServerDirectory: Send + Sync {
    fn online_players(&self) -> Vec<String>;

    fn worlds(&self) -> Vec<String>;
}
