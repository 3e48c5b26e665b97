//! Canned-row source for tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{FlatRow, Param, RowSource, SqlQuery};
use crate::{Error, Result};

/// Row source answering from in-memory rows keyed by query name.
///
/// Rows registered for an exact `(name, params)` pair take precedence over
/// rows registered for the name alone. Unknown queries return no rows.
/// Every executed query is recorded.
#[derive(Default)]
pub struct FixtureRowSource {
    by_name: HashMap<&'static str, Vec<FlatRow>>,
    by_params: HashMap<(&'static str, Vec<Param>), Vec<FlatRow>>,
    failing: HashSet<&'static str>,
    executed: Mutex<Vec<SqlQuery>>,
}

impl FixtureRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every execution of `name` with `rows`
    pub fn with_rows(mut self, name: &'static str, rows: Vec<FlatRow>) -> Self {
        self.by_name.insert(name, rows);
        self
    }

    /// Answer `name` executed with exactly `params` with `rows`
    pub fn with_rows_for(
        mut self,
        name: &'static str,
        params: Vec<Param>,
        rows: Vec<FlatRow>,
    ) -> Self {
        self.by_params.insert((name, params), rows);
        self
    }

    /// Make every execution of `name` fail
    pub fn failing(mut self, name: &'static str) -> Self {
        self.failing.insert(name);
        self
    }

    /// Names of executed queries, in execution order
    pub fn executed(&self) -> Vec<&'static str> {
        self.executed
            .lock()
            .map(|q| q.iter().map(|query| query.name).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RowSource for FixtureRowSource {
    async fn fetch_all(&self, query: &SqlQuery) -> Result<Vec<FlatRow>> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(query.clone());
        }

        if self.failing.contains(query.name) {
            return Err(Error::Internal(format!("fixture failure: {}", query.name)));
        }

        let rows = self
            .by_params
            .get(&(query.name, query.params.clone()))
            .or_else(|| self.by_name.get(query.name))
            .cloned()
            .unwrap_or_default();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exact_params_take_precedence() {
        let source = FixtureRowSource::new()
            .with_rows("q", vec![FlatRow::new().with("id", 1)])
            .with_rows_for("q", vec![Param::Int(7)], vec![FlatRow::new().with("id", 7)]);

        let any = source.fetch_all(&SqlQuery::new("q", "")).await.unwrap();
        let exact = source.fetch_all(&SqlQuery::new("q", "").bind(7)).await.unwrap();

        assert_eq!(any[0].int("id"), Some(1));
        assert_eq!(exact[0].int("id"), Some(7));
        assert_eq!(source.executed(), vec!["q", "q"]);
    }

    #[tokio::test]
    async fn test_failing_query_errors() {
        let source = FixtureRowSource::new().failing("boom");
        assert!(source.fetch_all(&SqlQuery::new("boom", "")).await.is_err());
    }
}
