use crate::domain::model::DataRef;
use crate::domain::ports::DataEngine;
use crate::utils::error::{FemError, Result};
use async_trait::async_trait;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection};
use parking_lot::Mutex;
use serde_json::Value;

/// [`DataEngine`] storing one document per [`DataRef::Key`] in a MongoDB
/// collection, keyed by `_id`.
///
/// Mapping payloads store their fields beside `_id`; anything else is
/// wrapped as `{"value": ...}` and unwrapped again on load.
pub struct MongoEngine {
    collection: Collection<Document>,
    owned_client: Mutex<Option<Client>>,
}

impl MongoEngine {
    /// Engine over a shared client. Closing the engine leaves the client up.
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
            owned_client: Mutex::new(None),
        }
    }

    /// Engine that owns its client and shuts it down on [`DataEngine::close`].
    pub fn with_owned_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self {
            collection,
            owned_client: Mutex::new(Some(client)),
        }
    }
}

#[async_trait]
impl DataEngine for MongoEngine {
    async fn load(&self, data_ref: &DataRef) -> Result<Option<Value>> {
        let key = require_key(data_ref)?;
        let found = self.collection.find_one(doc! { "_id": key }).await?;
        match found {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, data_ref: &DataRef, value: &Value) -> Result<()> {
        let key = require_key(data_ref)?;
        let document = to_document(key, value)?;
        self.collection
            .replace_one(doc! { "_id": key }, document)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn exists(&self, data_ref: &DataRef) -> Result<bool> {
        let key = require_key(data_ref)?;
        let found = self.collection.find_one(doc! { "_id": key }).await?;
        Ok(found.is_some())
    }

    async fn delete(&self, data_ref: &DataRef) -> Result<()> {
        let key = require_key(data_ref)?;
        self.collection.delete_one(doc! { "_id": key }).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let owned = self.owned_client.lock().take();
        if let Some(client) = owned {
            client.shutdown().await;
        }
        Ok(())
    }
}

fn require_key<'a>(data_ref: &'a DataRef) -> Result<&'a str> {
    match data_ref {
        DataRef::Key(key) => Ok(key),
        DataRef::Path(path) => Err(FemError::storage(format!(
            "Mongo engine requires a key reference, got path '{}'",
            path.display()
        ))),
    }
}

fn to_document(key: &str, tree: &Value) -> Result<Document> {
    let body = bson::to_bson(tree)
        .map_err(|e| FemError::storage(format!("failed to encode document for '{key}': {e}")))?;
    let mut document = match body {
        Bson::Document(document) => document,
        other => {
            let mut document = Document::new();
            document.insert("value", other);
            document
        }
    };
    document.insert("_id", key);
    Ok(document)
}

fn from_document(mut document: Document) -> Result<Value> {
    document.remove("_id");
    let body = if document.len() == 1 && document.contains_key("value") {
        document.remove("value").unwrap_or(Bson::Null)
    } else {
        Bson::Document(document)
    };
    bson::from_bson(body)
        .map_err(|e| FemError::storage(format!("failed to decode stored document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_payload_flattens_beside_id() {
        let tree = serde_json::json!({"coins": 120, "rank": "vip"});
        let document = to_document("player:1", &tree).unwrap();
        assert_eq!(document.get_str("_id").unwrap(), "player:1");
        assert!(document.contains_key("coins"));
        assert_eq!(document.get_str("rank").unwrap(), "vip");
        assert!(!document.contains_key("value"));

        let round = from_document(document).unwrap();
        assert_eq!(round, tree);
    }

    #[test]
    fn test_scalar_payload_wraps_as_value() {
        let tree = serde_json::json!(42);
        let document = to_document("counter", &tree).unwrap();
        assert!(document.contains_key("value"));

        let round = from_document(document).unwrap();
        assert_eq!(round, tree);
    }

    #[test]
    fn test_path_ref_is_rejected() {
        let err = require_key(&DataRef::path("/tmp/data.yml")).unwrap_err();
        assert!(matches!(err, FemError::Storage { .. }));
    }
}
