//! Hash-partitioned join table.
//!
//! Wraps N independent [`InMemoryTable`] shards and presents the same
//! single-namespace interface as one table, routing each key to a shard by
//! hash. The join engine never sees the sharding: a key always lands on the
//! same shard, so per-key accumulation behaves exactly as it would against a
//! single table.

use super::config::{DefaultPolicy, TableConfig};
use super::error::TableResult;
use super::memory::InMemoryTable;
use super::store::{JoinStore, TableStats};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A join table sharded across in-memory partitions by key hash.
///
/// # Examples
///
/// ```rust
/// use streamjoin::{JoinStore, PartitionedTable, TableConfig};
///
/// let table: PartitionedTable<String, u64> =
///     PartitionedTable::new(TableConfig::new("sharded").partitions(4));
/// table.upsert("a".to_string(), 1).unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.partition_count(), 4);
/// ```
pub struct PartitionedTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    config: TableConfig,
    shards: Vec<InMemoryTable<K, V>>,
}

impl<K, V> PartitionedTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates a table with `config.partitions` shards (at least one).
    pub fn new(config: TableConfig) -> Self {
        let partitions = config.partitions.max(1);
        let shards = (0..partitions)
            .map(|partition| {
                InMemoryTable::new(TableConfig::new(format!("{}-{}", config.name, partition)))
            })
            .collect();
        PartitionedTable { config, shards }
    }

    /// Gets the number of physical partitions.
    pub fn partition_count(&self) -> usize {
        self.shards.len()
    }

    /// Gets the key count per partition, in partition order.
    pub fn partition_sizes(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.len()).collect()
    }

    /// Gets the partition index a key routes to.
    pub fn partition_for(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }

    fn shard_for(&self, key: &K) -> &InMemoryTable<K, V> {
        &self.shards[self.partition_for(key)]
    }
}

impl<K, V> JoinStore<K, V> for PartitionedTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.config.name
    }

    fn default_policy(&self) -> DefaultPolicy {
        // Shards are constructed without vivify factories.
        DefaultPolicy::Absent
    }

    fn fetch(&self, key: &K) -> TableResult<Option<V>> {
        self.shard_for(key).fetch(key)
    }

    fn upsert(&self, key: K, value: V) -> TableResult<()> {
        self.shard_for(&key).upsert(key, value)
    }

    fn remove(&self, key: &K) -> TableResult<Option<V>> {
        self.shard_for(key).remove(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.shard_for(key).contains_key(key)
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.len()).sum()
    }

    fn keys(&self) -> Vec<K> {
        self.shards.iter().flat_map(|shard| shard.keys()).collect()
    }

    fn stats(&self) -> TableStats {
        let last_updated = self
            .shards
            .iter()
            .filter_map(|shard| shard.stats().last_updated)
            .max();
        TableStats {
            table: self.config.name.clone(),
            key_count: self.len(),
            last_updated,
        }
    }
}
