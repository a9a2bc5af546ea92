//! SQLite-backed cache store.

use crate::cache::{CacheEntry, CacheError, CacheKey, CacheScope, CacheStore};
use crate::domain::TimeMs;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

/// Stored in place of `None` so the primary key stays non-null.
const NO_ROUND: i64 = -1;

fn round_column(key: &CacheKey) -> i64 {
    key.round_count.map(i64::from).unwrap_or(NO_ROUND)
}

/// Durable `CacheStore` over the `cache_entries` table.
#[derive(Debug, Clone)]
pub struct SqliteCacheStore {
    pool: SqlitePool,
}

impl SqliteCacheStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCacheStore { pool }
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let row = sqlx::query(
            r#"
            SELECT payload, stored_at_ms
            FROM cache_entries
            WHERE scope = ? AND id = ? AND round_count = ?
            "#,
        )
        .bind(key.scope.as_str())
        .bind(&key.id)
        .bind(round_column(key))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| CacheEntry {
            payload: row.get("payload"),
            stored_at: TimeMs::new(row.get("stored_at_ms")),
        }))
    }

    async fn put(&self, key: CacheKey, entry: CacheEntry) -> Result<(), CacheError> {
        sqlx::query(
            r#"
            INSERT INTO cache_entries (scope, id, round_count, payload, stored_at_ms)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(scope, id, round_count) DO UPDATE SET
                payload = excluded.payload,
                stored_at_ms = excluded.stored_at_ms
            "#,
        )
        .bind(key.scope.as_str())
        .bind(&key.id)
        .bind(round_column(&key))
        .bind(&entry.payload)
        .bind(entry.stored_at.as_ms())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn invalidate(&self, scope: CacheScope, id: &str) -> Result<usize, CacheError> {
        let result = sqlx::query("DELETE FROM cache_entries WHERE scope = ? AND id = ?")
            .bind(scope.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() as usize)
    }
}
