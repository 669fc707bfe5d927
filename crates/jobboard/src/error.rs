//! Error types for jobboard

use thiserror::Error;

/// Result type alias for jobboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for data-access operations
#[derive(Debug, Error)]
pub enum Error {
    /// Update payload contained no fields
    #[error("No data")]
    EmptyUpdate,

    /// Caller-supplied input was rejected
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),
}

impl Error {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this error should surface as an HTTP 400-class response.
    ///
    /// Covers empty updates and rejected caller input. Callers own the
    /// actual status-code mapping; this crate only classifies.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::EmptyUpdate | Self::BadRequest(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Parse a tokio_postgres error into a more specific Error
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_message_is_exact() {
        assert_eq!(Error::EmptyUpdate.to_string(), "No data");
    }

    #[test]
    fn empty_update_is_bad_request_class() {
        assert!(Error::EmptyUpdate.is_bad_request());
        assert!(Error::bad_request("nope").is_bad_request());
        assert!(!Error::not_found("gone").is_bad_request());
    }

    #[test]
    fn not_found_classification() {
        assert!(Error::not_found("No company: c1").is_not_found());
        assert!(!Error::EmptyUpdate.is_not_found());
    }
}
