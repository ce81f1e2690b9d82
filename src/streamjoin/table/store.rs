//! The join store trait: the keyed accessor contract the join engine
//! mutates.
//!
//! A join store maps keys to in-flight composites. The engine's data path
//! uses `fetch`/`upsert`/`remove`; hosts use the diagnostics to observe
//! accumulation (table length is the usual signal in tests and dashboards).
//! The `default_policy` accessor exists for the engine's construction guard
//! and is read exactly once per engine.

use super::config::DefaultPolicy;
use super::error::TableResult;
use std::hash::Hash;
use std::time::SystemTime;

/// Statistics about a join table's state
#[derive(Debug, Clone)]
pub struct TableStats {
    pub table: String,
    pub key_count: usize,
    pub last_updated: Option<SystemTime>,
}

/// Keyed associative store backing join accumulation.
///
/// Implementations own durability, replication, and partitioning; the join
/// engine is merely a privileged mutator. The per-key contract the engine
/// relies on:
///
/// - `fetch` of an absent key returns `Ok(None)` when the table's
///   [`DefaultPolicy`] is `Absent`
/// - `upsert` followed by `fetch` of the same key observes the stored value
///   (which a normalizing store may have transformed on persist)
/// - `remove` deletes the entry and returns what was stored, if anything
pub trait JoinStore<K, V>: Send + Sync
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Table name, used in logs and error messages.
    fn name(&self) -> &str;

    /// What this table yields for absent keys. Inspected once by the join
    /// engine's construction guard; must not change over the table's life.
    fn default_policy(&self) -> DefaultPolicy;

    /// Gets the current value for a key, or `None` if absent.
    fn fetch(&self, key: &K) -> TableResult<Option<V>>;

    /// Inserts or replaces the value for a key.
    fn upsert(&self, key: K, value: V) -> TableResult<()>;

    /// Deletes the entry for a key, returning the stored value if present.
    fn remove(&self, key: &K) -> TableResult<Option<V>>;

    /// Checks if a key exists in the table
    fn contains_key(&self, key: &K) -> bool;

    /// Gets the number of keys in the table
    fn len(&self) -> usize;

    /// Checks if the table is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets all keys currently in the table
    fn keys(&self) -> Vec<K>;

    /// Gets statistics about the table
    fn stats(&self) -> TableStats;
}
