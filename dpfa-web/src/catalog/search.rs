//! Search term and result-limit shaping
//!
//! Terms are trimmed and rejected when blank before any query runs. The
//! database receives a LIKE-escaped `%term%` pattern with ASCII letters
//! lowercased. SQLite's `lower()` folds ASCII only, so non-ASCII letters are
//! passed through unchanged and match their stored spelling.

use dpfa_common::{Error, Result};

/// Longest accepted search term, in characters
pub const MAX_QUERY_CHARS: usize = 100;

/// Result cap applied when the caller gives none
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// Upper bound on caller-supplied limits; larger values are clamped
pub const MAX_SEARCH_LIMIT: i64 = 200;

/// A validated, trimmed search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput(
                "Query parameter 'q' is required".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_QUERY_CHARS {
            return Err(Error::InvalidInput(format!(
                "Query parameter 'q' must be at most {} characters",
                MAX_QUERY_CHARS
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Parse an optional page query; blank input means "no search"
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>> {
        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::parse(raw).map(Some),
            _ => Ok(None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring pattern for `lower(column) LIKE ? ESCAPE '\'`
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.to_ascii_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Result cap for search endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimit(i64);

impl SearchLimit {
    /// `None` yields the default; values below 1 are rejected; values above
    /// [`MAX_SEARCH_LIMIT`] are clamped
    pub fn from_request(requested: Option<i64>) -> Result<Self> {
        match requested {
            None => Ok(Self(DEFAULT_SEARCH_LIMIT)),
            Some(n) if n < 1 => Err(Error::InvalidInput(format!(
                "limit must be a positive integer, got {}",
                n
            ))),
            Some(n) => Ok(Self(n.min(MAX_SEARCH_LIMIT))),
        }
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Default for SearchLimit {
    fn default() -> Self {
        Self(DEFAULT_SEARCH_LIMIT)
    }
}
