//! Named-column row views and recursive result materialization.
//!
//! A query returns flat, table-qualified columns (`user.name`, `user.age`);
//! application types declare, once, how those columns map onto their fields.
//! [`materialize`] then reconstructs fully populated instances, recursing
//! into nested types through their own declared bindings — no per-call
//! parsing or lookup code in the application.

mod materializer;
mod result;
mod schema;

pub use materializer::{materialize, RowBound};
pub use result::RowView;
pub use schema::{FieldKind, FieldSpec, RowSchema};

/// Result type alias using the crate's error type.
pub type DatabaseResult<T> = std::result::Result<T, DatabaseError>;

/// Errors that can occur while materializing rows.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The view has no column under the qualified label.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// The column value cannot be coerced to the field's type.
    #[error("type mismatch at column {column}: stored value is not {requested}")]
    TypeMismatch {
        column: String,
        requested: &'static str,
    },

    /// Driver-level error while reading a row.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
