//! Error type shared by the archive crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Catalog query or connection failure
    #[cfg(feature = "sqlx")]
    #[error("Catalog query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be resolved (missing database, bad TOML file)
    #[error("Bad configuration: {0}")]
    Config(String),

    /// Lookup by id or slug found nothing
    #[error("{0} not found")]
    NotFound(String),

    /// Rejected request parameter (blank search term, bad limit)
    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal failure: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_read_as_plain_messages() {
        let err = Error::InvalidInput("Query parameter 'q' is required".into());
        assert_eq!(err.to_string(), "Query parameter 'q' is required");
        assert_eq!(Error::NotFound("Song 9".into()).to_string(), "Song 9 not found");
    }
}
