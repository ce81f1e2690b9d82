//! # streamjoin
//!
//! A partial-message join engine for keyed streams. Fragments of a logical
//! record arrive out of order (possibly from different producers); the engine
//! accumulates them per key in a backing table, merges each new arrival into
//! the running composite, and hands the composite to caller-supplied business
//! logic the moment it becomes sufficient, evicting the entry in the same
//! step.
//!
//! ## Features
//!
//! - **Trait-Based Business Logic**: key extraction, merging, sufficiency and
//!   processing supplied as one [`JoinLogic`] implementation
//! - **Pluggable Join Tables**: any [`JoinStore`] works as the backing state,
//!   from a single in-memory map to a hash-sharded table
//! - **Construction-Time Safety**: tables that vivify default values on
//!   missing keys are rejected before the first fragment is seen
//! - **Stream-Driven Execution**: [`JoinRunner`] drains a `futures::Stream`
//!   of fragments through the engine on a single task
//!
//! ## Quick Start
//!
//! ```rust
//! use streamjoin::{Existing, InMemoryTable, JoinLogic, JoinStore, Joiner, TableConfig};
//! use std::convert::Infallible;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Reading {
//!     sensor: String,
//!     temperature: Option<f64>,
//!     humidity: Option<f64>,
//! }
//!
//! struct ReadingJoin;
//!
//! impl JoinLogic for ReadingJoin {
//!     type Fragment = Reading;
//!     type Key = String;
//!     type Composite = Reading;
//!     type Processed = Reading;
//!     type Deferred = ();
//!     type Error = Infallible;
//!
//!     fn key_of(&self, fragment: &Reading) -> String {
//!         fragment.sensor.clone()
//!     }
//!
//!     fn merge(
//!         &self,
//!         fragment: &Reading,
//!         existing: Existing<'_, Reading, Reading>,
//!     ) -> Result<Reading, Infallible> {
//!         let prior = match existing {
//!             Existing::Fragment(f) => f,
//!             Existing::Composite(c) => c,
//!         };
//!         Ok(Reading {
//!             sensor: fragment.sensor.clone(),
//!             temperature: fragment.temperature.or(prior.temperature),
//!             humidity: fragment.humidity.or(prior.humidity),
//!         })
//!     }
//!
//!     fn is_sufficient(&self, composite: &Reading) -> Result<bool, Infallible> {
//!         Ok(composite.temperature.is_some() && composite.humidity.is_some())
//!     }
//!
//!     fn process(&self, composite: Reading) -> Result<Reading, Infallible> {
//!         Ok(composite)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = InMemoryTable::new(TableConfig::new("readings"));
//!     let joiner = Joiner::try_new(table, ReadingJoin)?;
//!
//!     let first = joiner.submit(Reading {
//!         sensor: "roof-1".to_string(),
//!         temperature: Some(21.5),
//!         humidity: None,
//!     })?;
//!     assert!(first.is_incomplete());
//!
//!     let second = joiner.submit(Reading {
//!         sensor: "roof-1".to_string(),
//!         temperature: None,
//!         humidity: Some(0.4),
//!     })?;
//!     assert!(second.is_processed());
//!     assert!(joiner.store().is_empty());
//!     Ok(())
//! }
//! ```

pub mod streamjoin;

// Re-export main API at crate root for easy access
pub use streamjoin::join::{
    Existing,
    FailurePolicy,
    // Errors
    JoinError,
    // Traits
    JoinLogic,
    JoinOutcome,
    JoinResult,
    JoinRunner,
    JoinStage,
    // Core types
    Joiner,
    RunnerStats,
};
pub use streamjoin::table::{
    DefaultPolicy, InMemoryTable, JoinStore, PartitionedTable, TableConfig, TableError,
    TableResult, TableStats,
};
