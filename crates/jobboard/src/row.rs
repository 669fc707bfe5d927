//! Row mapping traits and utilities

use crate::error::{Error, Result};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Maps a database row to a Rust struct.
pub trait FromRow: Sized {
    /// Build `Self` from a row, reporting the failing column on mismatch.
    fn from_row(row: &Row) -> Result<Self>;
}

/// Column access that reports the column name on decode failure.
pub trait RowExt {
    /// Get a column value by name.
    fn decode<'a, T: FromSql<'a>>(&'a self, column: &str) -> Result<T>;
}

impl RowExt for Row {
    fn decode<'a, T: FromSql<'a>>(&'a self, column: &str) -> Result<T> {
        self.try_get(column)
            .map_err(|e| Error::decode(column, e.to_string()))
    }
}
