//! Flat result rows

use serde::{Serialize, Serializer};

/// A single column value as returned by the catalog database
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Int(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_none(),
            Scalar::Int(v) => serializer.serialize_i64(*v),
            Scalar::Real(v) => serializer.serialize_f64(*v),
            Scalar::Text(v) => serializer.serialize_str(v),
        }
    }
}

impl From<&Scalar> for serde_json::Value {
    fn from(value: &Scalar) -> Self {
        match value {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Int(v) => serde_json::Value::from(*v),
            Scalar::Real(v) => serde_json::Value::from(*v),
            Scalar::Text(v) => serde_json::Value::String(v.clone()),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Scalar::Null)
    }
}

static NULL: Scalar = Scalar::Null;

/// One denormalized result record, columns in select order.
///
/// Columns that are not present read as `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRow {
    columns: Vec<(String, Scalar)>,
}

impl FlatRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column (builder style)
    pub fn with(mut self, name: &str, value: impl Into<Scalar>) -> Self {
        self.columns.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> &Scalar {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
            .unwrap_or(&NULL)
    }

    pub fn is_null(&self, name: &str) -> bool {
        self.get(name).is_null()
    }

    /// Integer column; reals are truncated, text is parsed
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Scalar::Int(v) => Some(*v),
            Scalar::Real(v) => Some(*v as i64),
            Scalar::Text(v) => v.trim().parse().ok(),
            Scalar::Null => None,
        }
    }

    /// Numeric column as f64
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Real(v) => Some(*v),
            Scalar::Text(v) => v.trim().parse().ok(),
            Scalar::Null => None,
        }
    }

    /// Text column; numbers are rendered
    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Scalar::Text(v) => Some(v.clone()),
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Real(v) => Some(v.to_string()),
            Scalar::Null => None,
        }
    }

    /// Text column with empty strings treated as absent
    pub fn non_empty_text(&self, name: &str) -> Option<String> {
        self.text(name).filter(|s| !s.is_empty())
    }

    /// Boolean flag stored as 0/1 (or `true`/`false` text); null is false
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Scalar::Int(v) => *v != 0,
            Scalar::Real(v) => *v != 0.0,
            Scalar::Text(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "t" | "true"),
            Scalar::Null => false,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(feature = "sqlx")]
impl FlatRow {
    /// Convert a SQLite row, keeping column order
    pub fn from_sqlite(row: &sqlx::sqlite::SqliteRow) -> Self {
        use sqlx::{Column, Row};

        let columns = row
            .columns()
            .iter()
            .map(|col| (col.name().to_string(), read_scalar(row, col.ordinal())))
            .collect();

        Self { columns }
    }
}

#[cfg(feature = "sqlx")]
fn read_scalar(row: &sqlx::sqlite::SqliteRow, index: usize) -> Scalar {
    use sqlx::{Row, ValueRef};

    match row.try_get_raw(index) {
        Ok(value) if !value.is_null() => {}
        _ => return Scalar::Null,
    }

    row.try_get::<i64, _>(index)
        .map(Scalar::Int)
        .or_else(|_| row.try_get::<f64, _>(index).map(Scalar::Real))
        .or_else(|_| row.try_get::<String, _>(index).map(Scalar::Text))
        .unwrap_or(Scalar::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_null() {
        let row = FlatRow::new().with("id", 1);
        assert!(row.is_null("title"));
        assert_eq!(row.int("id"), Some(1));
        assert_eq!(row.text("title"), None);
    }

    #[test]
    fn test_flag_variants() {
        let row = FlatRow::new()
            .with("a", 1)
            .with("b", 0)
            .with("c", "true")
            .with("d", None::<i64>);
        assert!(row.flag("a"));
        assert!(!row.flag("b"));
        assert!(row.flag("c"));
        assert!(!row.flag("d"));
    }

    #[test]
    fn test_scalar_serializes_as_plain_json() {
        let row = FlatRow::new()
            .with("n", None::<String>)
            .with("i", 3)
            .with("s", "x");
        let values: Vec<serde_json::Value> = row.columns().map(|(_, v)| v.into()).collect();
        assert_eq!(values, vec![serde_json::Value::Null, 3.into(), "x".into()]);
        assert_eq!(serde_json::to_string(&Scalar::Real(1.5)).unwrap(), "1.5");
    }
}
