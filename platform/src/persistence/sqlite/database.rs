//! SQLite database handle for the platform.
//!
//! Every connection runs with foreign keys enforced, which the repositories
//! rely on to report referential violations. File databases use WAL so reads
//! from other processes do not block a seeding run.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

use crate::persistence::PersistenceError;

const POOL_SIZE: u32 = 5;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file at `path`, creating it and its parent
    /// directories if needed, and bring the schema up to date.
    pub async fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self::connect(options, POOL_SIZE).await?;
        tracing::info!(path = %path.display(), "Opened database");
        Ok(db)
    }

    /// Fresh in-memory database with the schema applied. One connection, so
    /// every query sees the same database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        Self::connect(options, 1).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        max_connections: u32,
    ) -> Result<Self, PersistenceError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options.foreign_keys(true))
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PersistenceError::Migration(e.to_string()))?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_create_tables() {
        let db = Database::new_in_memory().await.unwrap();
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        for table in [
            "guests",
            "games",
            "users",
            "badges",
            "word_scramble_puzzles",
            "user_badges",
            "game_results",
        ] {
            assert!(names.contains(&table), "missing table {table}");
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let db = Database::new_in_memory().await.unwrap();
        let row: (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0, 1);
    }

    #[tokio::test]
    async fn test_file_database_keeps_data_across_reopen() {
        use crate::persistence::{Repository, SqliteStore, UserRepository};
        use daily_domain::UserAttributes;

        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("daily-games.db");

        let db = Database::open(&db_path).await.unwrap();
        let users = UserRepository::new(SqliteStore::from_database(&db));
        let user = users
            .create(
                UserAttributes::default()
                    .name("Ada")
                    .email("ada@example.com")
                    .password("secret")
                    .unwrap(),
            )
            .await
            .unwrap();
        db.close().await;
        assert!(db_path.exists());

        let reopened = Database::open(&db_path).await.unwrap();
        let users = UserRepository::new(SqliteStore::from_database(&reopened));
        assert_eq!(users.find_by_email("ada@example.com").await.unwrap(), user);
    }
}
