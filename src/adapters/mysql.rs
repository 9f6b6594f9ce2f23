use crate::domain::model::DataRef;
use crate::domain::ports::DataEngine;
use crate::utils::error::{FemError, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::MySqlPool;
use tokio::sync::OnceCell;

/// [`DataEngine`] storing payloads as JSON text in a MySQL key/payload
/// table, one row per [`DataRef::Key`].
///
/// Table and column names are validated at construction and only then
/// interpolated into statements; keys and payloads are always bound.
pub struct MySqlEngine {
    pool: MySqlPool,
    table: String,
    id_column: String,
    payload_column: String,
    auto_create_table: bool,
    table_ready: OnceCell<()>,
}

impl MySqlEngine {
    pub fn new(
        pool: MySqlPool,
        table: &str,
        id_column: &str,
        payload_column: &str,
        auto_create_table: bool,
    ) -> Result<Self> {
        Ok(Self {
            pool,
            table: validate_identifier("table", table)?,
            id_column: validate_identifier("id_column", id_column)?,
            payload_column: validate_identifier("payload_column", payload_column)?,
            auto_create_table,
            table_ready: OnceCell::new(),
        })
    }

    async fn ensure_table(&self) -> Result<()> {
        if !self.auto_create_table {
            return Ok(());
        }
        self.table_ready
            .get_or_try_init(|| async {
                let ddl = format!(
                    "CREATE TABLE IF NOT EXISTS `{}` (\
                     `{}` VARCHAR(191) NOT NULL PRIMARY KEY, \
                     `{}` LONGTEXT NOT NULL)",
                    self.table, self.id_column, self.payload_column
                );
                sqlx::query(&ddl).execute(&self.pool).await?;
                Ok::<(), FemError>(())
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DataEngine for MySqlEngine {
    async fn load(&self, data_ref: &DataRef) -> Result<Option<Value>> {
        self.ensure_table().await?;
        let key = require_key(data_ref)?;
        let sql = format!(
            "SELECT `{}` FROM `{}` WHERE `{}`=? LIMIT 1",
            self.payload_column, self.table, self.id_column
        );
        let row: Option<(String,)> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((payload,)) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, data_ref: &DataRef, value: &Value) -> Result<()> {
        self.ensure_table().await?;
        let key = require_key(data_ref)?;
        let payload = serde_json::to_string(value)?;
        let sql = format!(
            "INSERT INTO `{table}`(`{id}`, `{payload}`) VALUES (?, ?) \
             ON DUPLICATE KEY UPDATE `{payload}`=VALUES(`{payload}`)",
            table = self.table,
            id = self.id_column,
            payload = self.payload_column
        );
        sqlx::query(&sql)
            .bind(key)
            .bind(&payload)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exists(&self, data_ref: &DataRef) -> Result<bool> {
        self.ensure_table().await?;
        let key = require_key(data_ref)?;
        let sql = format!(
            "SELECT COUNT(*) FROM `{}` WHERE `{}`=?",
            self.table, self.id_column
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    async fn delete(&self, data_ref: &DataRef) -> Result<()> {
        self.ensure_table().await?;
        let key = require_key(data_ref)?;
        let sql = format!(
            "DELETE FROM `{}` WHERE `{}`=?",
            self.table, self.id_column
        );
        sqlx::query(&sql).bind(key).execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

fn require_key<'a>(data_ref: &'a DataRef) -> Result<&'a str> {
    match data_ref {
        DataRef::Key(key) => Ok(key),
        DataRef::Path(path) => Err(FemError::storage(format!(
            "MySQL engine requires a key reference, got path '{}'",
            path.display()
        ))),
    }
}

fn validate_identifier(label: &str, name: &str) -> Result<String> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(FemError::validation(format!(
            "invalid {label} name: '{name}'"
        )));
    }
    Ok(name.to_string())
}
