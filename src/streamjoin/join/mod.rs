/*!
# Join Engine Module

This module provides the partial-message join engine: fragments of a logical
record arrive out of order on a keyed stream, are merged per key into a
running composite held in a join table, and are handed to business logic the
moment the composite is sufficient.

## Core Components

- `logic`: the `JoinLogic` trait: caller-supplied key extraction, merging,
  sufficiency testing, processing, and the optional incomplete handler
- `joiner`: the `Joiner` engine: construction-time table validation plus the
  per-fragment fetch/merge/write/test/evict sequence
- `error`: `JoinError` taxonomy for configuration, callable, and storage
  failures
- `streaming`: `JoinRunner`, which drains an async stream of fragments through a
  `Joiner` on a single task

## Re-exports

Public interface for join functionality.
*/

pub mod error;
pub mod joiner;
pub mod logic;
pub mod streaming;

// Re-export public types
pub use error::{JoinError, JoinResult, JoinStage};
pub use joiner::Joiner;
pub use logic::{Existing, JoinLogic, JoinOutcome};
pub use streaming::{FailurePolicy, JoinRunner, RunnerStats};
