//! Row Source abstraction

use async_trait::async_trait;

use super::FlatRow;
use crate::Result;

/// Positional query parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Param {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(i64::from(value))
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Null)
    }
}

/// A named, parameterized statement.
///
/// `name` identifies the statement in logs and lets fixture sources answer
/// without parsing SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub name: &'static str,
    pub sql: &'static str,
    pub params: Vec<Param>,
}

impl SqlQuery {
    pub fn new(name: &'static str, sql: &'static str) -> Self {
        Self {
            name,
            sql,
            params: Vec::new(),
        }
    }

    /// Append the next positional parameter
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Capability to execute catalog queries.
///
/// Implementations return rows in the statement's declared order and must
/// release any connection they acquire before returning, on every path.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_all(&self, query: &SqlQuery) -> Result<Vec<FlatRow>>;

    /// First row only, `None` when the result set is empty
    async fn fetch_optional(&self, query: &SqlQuery) -> Result<Option<FlatRow>> {
        Ok(self.fetch_all(query).await?.into_iter().next())
    }
}

/// Row source backed by a SQLite connection pool
#[cfg(feature = "sqlx")]
#[derive(Clone)]
pub struct SqliteRowSource {
    pool: sqlx::SqlitePool,
}

#[cfg(feature = "sqlx")]
impl SqliteRowSource {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}

#[cfg(feature = "sqlx")]
#[async_trait]
impl RowSource for SqliteRowSource {
    async fn fetch_all(&self, query: &SqlQuery) -> Result<Vec<FlatRow>> {
        let mut statement = sqlx::query(query.sql);
        for param in &query.params {
            statement = match param {
                Param::Null => statement.bind(None::<String>),
                Param::Int(v) => statement.bind(*v),
                Param::Text(v) => statement.bind(v.as_str()),
            };
        }

        // The pooled connection is checked out for this call only
        let rows = statement.fetch_all(&self.pool).await.map_err(|e| {
            tracing::error!(query = query.name, "Query failed: {}", e);
            e
        })?;

        tracing::debug!(query = query.name, rows = rows.len(), "Query executed");

        Ok(rows.iter().map(FlatRow::from_sqlite).collect())
    }
}
