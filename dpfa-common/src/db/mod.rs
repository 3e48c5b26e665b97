//! Database access layer
//!
//! The catalog database is an external collaborator. View builders talk to it
//! only through the [`RowSource`] trait, which hands back ordered
//! [`FlatRow`] sequences for parameterized [`SqlQuery`] values.

mod row;
mod source;

#[cfg(any(test, feature = "test-support"))]
mod fixture;

pub use row::{FlatRow, Scalar};
pub use source::{Param, RowSource, SqlQuery};

#[cfg(feature = "sqlx")]
pub use source::SqliteRowSource;

#[cfg(any(test, feature = "test-support"))]
pub use fixture::FixtureRowSource;

#[cfg(feature = "sqlx")]
use crate::{Error, Result};
#[cfg(feature = "sqlx")]
use sqlx::SqlitePool;
#[cfg(feature = "sqlx")]
use std::path::Path;

/// Connect to the catalog database in read-only mode
///
/// The service never writes to the catalog; `mode=ro` makes SQLite reject
/// any statement that would.
#[cfg(feature = "sqlx")]
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {}",
            db_path.display()
        )));
    }

    let db_url = format!("sqlite://{}?mode=ro", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

#[cfg(all(test, feature = "sqlx"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_database_is_config_error() {
        let result = connect_readonly(Path::new("/nonexistent/dpfa/archive.db")).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_readonly_connection_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("archive.db");

        // Create the file with a writable connection first
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let writable = SqlitePool::connect(&url).await.unwrap();
        sqlx::query("CREATE TABLE songs (id INTEGER PRIMARY KEY, title TEXT)")
            .execute(&writable)
            .await
            .unwrap();
        writable.close().await;

        let pool = connect_readonly(&db_path).await.unwrap();
        let result = sqlx::query("INSERT INTO songs (title) VALUES ('x')")
            .execute(&pool)
            .await;

        assert!(result.is_err(), "Write operation should fail in read-only mode");
    }
}
