//! Local ledger of published post identifiers

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::path::Path;

use crate::error::{DbError, Result};

/// SQLite-backed record of every post id the publisher has seen succeed
#[derive(Clone)]
pub struct Ledger {
    pool: SqlitePool,
}

impl Ledger {
    /// Open the ledger, creating the file and the `tweets` table if absent
    pub async fn new(db_path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(DbError::IoError)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(DbError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DbError::MigrationError)?;

        Ok(Self { pool })
    }

    /// Record a post id; recording an id that is already present is a no-op
    pub async fn record_if_absent(&self, id: &str) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO tweets (id) VALUES (?)")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(())
    }

    pub async fn contains(&self, id: &str) -> Result<bool> {
        let row: Option<(String,)> = sqlx::query_as("SELECT id FROM tweets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(row.is_some())
    }

    /// Number of recorded ids
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tweets")
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::SqlxError)?;

        Ok(count)
    }
}
