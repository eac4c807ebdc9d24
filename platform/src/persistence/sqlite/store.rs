//! SQLite implementation of [`EntityStore`].
//!
//! Statements are assembled from each record's table and column list; only
//! values are bound, and column names in filters are checked against the
//! record's declared columns before they reach SQL.

use sqlx::SqlitePool;

use super::Database;
use crate::persistence::traits::EntityStore;
use crate::persistence::{PersistenceError, Record, SqlValue};

/// Shared handle to the SQLite pool. Cloning is cheap.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn from_database(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn select_sql<E: Record>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

impl EntityStore for SqliteStore {
    async fn insert<E: Record>(&self, record: &E) -> Result<(), PersistenceError> {
        let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for value in record.values() {
            query = value.bind(query);
        }
        query
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        tracing::trace!(table = E::TABLE, id = %record.id(), "Inserted row");
        Ok(())
    }

    async fn fetch<E: Record>(&self, id: &str) -> Result<Option<E>, PersistenceError> {
        let sql = format!("{} WHERE id = ?", select_sql::<E>());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        row.map(|row| E::decode(&row))
            .transpose()
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))
    }

    async fn fetch_all<E: Record>(&self) -> Result<Vec<E>, PersistenceError> {
        let sql = format!("{} ORDER BY created_at, id", select_sql::<E>());
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        rows.iter()
            .map(E::decode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))
    }

    async fn fetch_by<E: Record>(
        &self,
        column: &str,
        value: SqlValue,
    ) -> Result<Vec<E>, PersistenceError> {
        if !E::has_column(column) {
            return Err(PersistenceError::UnknownColumn {
                table: E::TABLE,
                column: column.to_string(),
            });
        }

        let sql = format!(
            "{} WHERE {} IS ? ORDER BY created_at, id",
            select_sql::<E>(),
            column
        );
        let rows = value
            .bind(sqlx::query(&sql))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        rows.iter()
            .map(E::decode)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))
    }

    async fn replace<E: Record>(&self, record: &E) -> Result<bool, PersistenceError> {
        let assignments = E::COLUMNS[1..]
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments);

        let mut values = record.values();
        let id = values.remove(0);
        let mut query = sqlx::query(&sql);
        for value in values {
            query = value.bind(query);
        }
        let result = id
            .bind(query)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove<E: Record>(&self, id: &str) -> Result<bool, PersistenceError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count<E: Record>(&self) -> Result<u64, PersistenceError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        Ok(count as u64)
    }

    async fn truncate<E: Record>(&self) -> Result<u64, PersistenceError> {
        let sql = format!("DELETE FROM {}", E::TABLE);
        let result = sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| PersistenceError::from_sqlx(E::TABLE, e))?;

        tracing::debug!(table = E::TABLE, rows = result.rows_affected(), "Truncated table");
        Ok(result.rows_affected())
    }
}
