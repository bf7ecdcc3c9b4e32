use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{DocumentStore, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl DocumentStore for SqliteRepository {
    async fn get_document(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Value>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT body
            FROM documents
            WHERE collection = ?1 AND key = ?2
            ",
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let body: String = row.try_get("body").map_err(ser)?;
        serde_json::from_str(&body).map(Some).map_err(ser)
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &Value,
    ) -> Result<(), StorageError> {
        let body = serde_json::to_string(document).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO documents (collection, key, body, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(collection, key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            ",
        )
        .bind(collection)
        .bind(key)
        .bind(body)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
