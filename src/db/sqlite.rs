//! SQLite-backed store: one `records` row per document, JSON bodies.

use super::Store;
use crate::domain::record::ID_FIELD;
use crate::domain::{Document, RecordId};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Store over a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap a pool whose schema is already migrated (see `init_db`).
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn decode_body(collection: &str, body: &str) -> StoreResult<Document> {
        match serde_json::from_str::<Value>(body)? {
            Value::Object(doc) => Ok(doc),
            _ => Err(StoreError::invalid_document(
                collection,
                "stored body is not a field mapping",
            )),
        }
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn scan(&self, collection: &str) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT body
            FROM records
            WHERE collection = ?
            ORDER BY id ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let body: String = row.get("body");
                Self::decode_body(collection, &body)
            })
            .collect()
    }

    async fn get(&self, collection: &str, id: RecordId) -> StoreResult<Option<Document>> {
        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM records WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        body.map(|b| Self::decode_body(collection, &b)).transpose()
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> StoreResult<RecordId> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO id_sequences (collection, last_id) VALUES (?, 1)
            ON CONFLICT(collection) DO UPDATE SET last_id = last_id + 1
            RETURNING last_id
            "#,
        )
        .bind(collection)
        .fetch_one(&mut *tx)
        .await?;

        doc.insert(ID_FIELD.to_string(), Value::from(id));
        let body = serde_json::to_string(&doc)?;

        sqlx::query("INSERT INTO records (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(id)
            .bind(&body)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(RecordId::new(id))
    }

    async fn put(&self, collection: &str, id: RecordId, mut doc: Document) -> StoreResult<()> {
        doc.insert(ID_FIELD.to_string(), Value::from(id));
        let body = serde_json::to_string(&doc)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO records (collection, id, body) VALUES (?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(collection)
        .bind(id.as_i64())
        .bind(&body)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO id_sequences (collection, last_id) VALUES (?, ?)
            ON CONFLICT(collection) DO UPDATE SET last_id = MAX(last_id, excluded.last_id)
            "#,
        )
        .bind(collection)
        .bind(id.as_i64())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn remove(&self, collection: &str, id: RecordId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn collections(&self) -> StoreResult<Vec<String>> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT collection FROM id_sequences ORDER BY collection ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    async fn last_id(&self, collection: &str) -> StoreResult<i64> {
        let last_id: Option<i64> =
            sqlx::query_scalar("SELECT last_id FROM id_sequences WHERE collection = ?")
                .bind(collection)
                .fetch_optional(&self.pool)
                .await?;
        Ok(last_id.unwrap_or(0))
    }

    async fn advance_counter(&self, collection: &str, last_id: i64) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO id_sequences (collection, last_id) VALUES (?, ?)
            ON CONFLICT(collection) DO UPDATE SET last_id = MAX(last_id, excluded.last_id)
            "#,
        )
        .bind(collection)
        .bind(last_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
