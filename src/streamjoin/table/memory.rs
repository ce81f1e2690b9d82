//! In-memory join table.
//!
//! `InMemoryTable` keeps per-key composites in a shared `HashMap` guarded by
//! a `RwLock`, tracking the last mutation time for diagnostics. Clones share
//! state, so a table can be handed to the join engine while a host keeps a
//! handle for inspection.
//!
//! The optional vivify factory (`with_default`) reproduces the shape of a
//! keyed store configured with a default value: a missing key materializes
//! the factory's output as a real entry on read. Such a table reports
//! [`DefaultPolicy::Vivify`] and is rejected by the join engine's
//! construction guard, since a vivified value would take part in merges as
//! if a fragment had produced it.

use super::config::{DefaultPolicy, TableConfig};
use super::error::{TableError, TableResult};
use super::store::{JoinStore, TableStats};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

type DefaultFactory<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// A keyed in-memory table holding the latest composite per key.
///
/// # Examples
///
/// ```rust
/// use streamjoin::{InMemoryTable, JoinStore, TableConfig};
///
/// let table: InMemoryTable<String, u64> = InMemoryTable::new(TableConfig::new("counters"));
/// table.upsert("a".to_string(), 1).unwrap();
/// assert_eq!(table.fetch(&"a".to_string()).unwrap(), Some(1));
/// assert_eq!(table.len(), 1);
/// ```
pub struct InMemoryTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    config: TableConfig,
    state: Arc<RwLock<HashMap<K, V>>>,
    last_updated: Arc<RwLock<Option<SystemTime>>>,
    default_factory: Option<DefaultFactory<V>>,
}

impl<K, V> InMemoryTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    /// Creates an empty table with true-absence semantics for missing keys.
    pub fn new(config: TableConfig) -> Self {
        InMemoryTable {
            config,
            state: Arc::new(RwLock::new(HashMap::new())),
            last_updated: Arc::new(RwLock::new(None)),
            default_factory: None,
        }
    }

    /// Creates a table that materializes `factory()` for missing keys on
    /// read. Reported as [`DefaultPolicy::Vivify`]; unusable for joins.
    pub fn with_default<F>(config: TableConfig, factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
    {
        InMemoryTable {
            config,
            state: Arc::new(RwLock::new(HashMap::new())),
            last_updated: Arc::new(RwLock::new(None)),
            default_factory: Some(Arc::new(factory)),
        }
    }

    /// Gets the table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Creates a snapshot of the current state.
    ///
    /// Returns a clone of the entire state. Use with caution for large
    /// tables.
    pub fn snapshot(&self) -> HashMap<K, V> {
        self.state.read().unwrap().clone()
    }

    fn touch(&self) {
        if let Ok(mut last_updated) = self.last_updated.write() {
            *last_updated = Some(SystemTime::now());
        }
    }

    fn read_state(&self) -> TableResult<std::sync::RwLockReadGuard<'_, HashMap<K, V>>> {
        self.state
            .read()
            .map_err(|_| TableError::lock_poisoned(&self.config.name))
    }

    fn write_state(&self) -> TableResult<std::sync::RwLockWriteGuard<'_, HashMap<K, V>>> {
        self.state
            .write()
            .map_err(|_| TableError::lock_poisoned(&self.config.name))
    }
}

impl<K, V> JoinStore<K, V> for InMemoryTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.config.name
    }

    fn default_policy(&self) -> DefaultPolicy {
        if self.default_factory.is_some() {
            DefaultPolicy::Vivify
        } else {
            DefaultPolicy::Absent
        }
    }

    fn fetch(&self, key: &K) -> TableResult<Option<V>> {
        {
            let state = self.read_state()?;
            if let Some(value) = state.get(key) {
                return Ok(Some(value.clone()));
            }
        }

        match &self.default_factory {
            Some(factory) => {
                let value = {
                    let mut state = self.write_state()?;
                    state.entry(key.clone()).or_insert_with(|| factory()).clone()
                };
                self.touch();
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn upsert(&self, key: K, value: V) -> TableResult<()> {
        {
            let mut state = self.write_state()?;
            state.insert(key, value);
        }
        self.touch();
        Ok(())
    }

    fn remove(&self, key: &K) -> TableResult<Option<V>> {
        let removed = {
            let mut state = self.write_state()?;
            state.remove(key)
        };
        if removed.is_some() {
            self.touch();
        }
        Ok(removed)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.state.read().unwrap().contains_key(key)
    }

    fn len(&self) -> usize {
        self.state.read().unwrap().len()
    }

    fn is_empty(&self) -> bool {
        self.state.read().unwrap().is_empty()
    }

    fn keys(&self) -> Vec<K> {
        self.state.read().unwrap().keys().cloned().collect()
    }

    fn stats(&self) -> TableStats {
        TableStats {
            table: self.config.name.clone(),
            key_count: self.len(),
            last_updated: *self.last_updated.read().unwrap(),
        }
    }
}

// Clones share state so the engine and host observe the same table
impl<K, V> Clone for InMemoryTable<K, V>
where
    K: Clone + Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn clone(&self) -> Self {
        InMemoryTable {
            config: self.config.clone(),
            state: self.state.clone(),
            last_updated: self.last_updated.clone(),
            default_factory: self.default_factory.clone(),
        }
    }
}
