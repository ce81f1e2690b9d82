//! Join-specific error types with proper context preservation.
//!
//! The engine performs no local recovery: configuration errors abort engine
//! construction, and every per-fragment failure surfaces to the caller of
//! `submit` carrying the offending key, so per-message remediation (skip,
//! retry, dead-letter) stays a caller decision.

use crate::streamjoin::table::config::DefaultPolicy;
use crate::streamjoin::table::error::TableError;
use std::fmt;

/// Stage of the submit sequence in which a caller-supplied callable failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStage {
    /// The merge function combining the new fragment with the prior value.
    Merge,
    /// The sufficiency predicate over the updated composite.
    Sufficiency,
    /// The processing function invoked on a sufficient composite.
    Process,
    /// The incomplete handler invoked on an insufficient composite.
    Incomplete,
}

impl fmt::Display for JoinStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinStage::Merge => write!(f, "merge"),
            JoinStage::Sufficiency => write!(f, "sufficiency"),
            JoinStage::Process => write!(f, "process"),
            JoinStage::Incomplete => write!(f, "incomplete-handler"),
        }
    }
}

/// Main error type for join engine operations
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// The backing table vivifies defaults for missing keys, which would let
    /// a materialized default take part in merges as if it were real data.
    /// Raised at construction time only; not retryable without
    /// reconfiguring the table.
    #[error(
        "Table '{table}' used in a join has default policy {policy:?}, which will break joining \
         logic. Ensure the table is configured with DefaultPolicy::Absent"
    )]
    UnsafeTableDefault { table: String, policy: DefaultPolicy },

    /// A caller-supplied callable failed during `submit`.
    #[error("Join {stage} callable failed for key {key}: {source}")]
    CallableFailed {
        stage: JoinStage,
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backing table failed mid-sequence.
    #[error("Table operation '{operation}' failed for key {key}: {source}")]
    Storage {
        operation: &'static str,
        key: String,
        #[source]
        source: TableError,
    },

    /// The entry written for a key was gone on the immediate re-read.
    #[error("Entry for key {key} vanished from table '{table}' between write and re-read")]
    EntryLost { table: String, key: String },
}

impl JoinError {
    /// Create a callable failure with stage and key attribution.
    pub fn callable<K, E>(stage: JoinStage, key: &K, source: E) -> Self
    where
        K: fmt::Debug,
        E: std::error::Error + Send + Sync + 'static,
    {
        JoinError::CallableFailed {
            stage,
            key: format!("{:?}", key),
            source: Box::new(source),
        }
    }

    /// Create a storage failure with operation and key attribution.
    pub fn storage<K>(operation: &'static str, key: &K, source: TableError) -> Self
    where
        K: fmt::Debug,
    {
        JoinError::Storage {
            operation,
            key: format!("{:?}", key),
            source,
        }
    }

    /// The stage attribution, if this is a callable failure.
    pub fn stage(&self) -> Option<JoinStage> {
        match self {
            JoinError::CallableFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type alias for join operations
pub type JoinResult<T> = Result<T, JoinError>;
