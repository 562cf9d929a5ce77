//! Error types for table binding

use thiserror::Error;

/// Errors raised when registering or binding tables in a [`Document`](crate::data::document::Document)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// No table with this identifier exists in the document
    #[error("Table not found: {0}")]
    NotFound(String),

    /// A table with this identifier is already registered
    #[error("Table '{0}' is already registered")]
    DuplicateTable(String),
}
