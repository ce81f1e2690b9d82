/*!
# Join Table Module

This module provides the keyed associative tables that back join
accumulation. A join table maps keys to in-flight composites and is the only
state the join engine touches between fragments.

## Core Components

- `store`: the `JoinStore` trait: fetch/upsert/remove data path plus the
  membership and length diagnostics the engine and its hosts rely on
- `config`: `TableConfig` and the `DefaultPolicy` read by the engine's
  construction guard
- `memory`: `InMemoryTable`, a shared-state map with update tracking
- `partitioned`: `PartitionedTable`, hash-sharded across in-memory tables
  while presenting a single logical namespace
- `error`: table-level runtime errors

## Re-exports

Public interface for table functionality.
*/

pub mod config;
pub mod error;
pub mod memory;
pub mod partitioned;
pub mod store;

// Re-export public types
pub use config::{DefaultPolicy, TableConfig};
pub use error::{TableError, TableResult};
pub use memory::InMemoryTable;
pub use partitioned::PartitionedTable;
pub use store::{JoinStore, TableStats};
