//! Table-specific error types for runtime operations.

/// Errors raised by join table implementations.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A reader or writer panicked while holding the table's state lock.
    #[error("State lock for table '{table}' is poisoned")]
    LockPoisoned { table: String },

    /// The backing store rejected or failed an operation.
    #[error("Table '{table}' storage failure during {operation}: {message}")]
    StorageFailure {
        table: String,
        operation: String,
        message: String,
    },
}

impl TableError {
    /// Create a lock-poisoned error for the named table.
    pub fn lock_poisoned(table: impl Into<String>) -> Self {
        TableError::LockPoisoned {
            table: table.into(),
        }
    }
}

/// Result type alias for table operations
pub type TableResult<T> = Result<T, TableError>;
