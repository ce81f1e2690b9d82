//! Join table configuration.

/// What a table yields when a key is absent.
///
/// Join semantics require true absence: a missing key must be reported as
/// missing, never replaced by a materialized default, because a default that
/// shows up in a lookup would silently participate in the next merge as if
/// it were real data. The join engine inspects this policy once, at
/// construction time, and refuses tables that vivify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultPolicy {
    /// Absent keys are reported as absent. Required for join tables.
    #[default]
    Absent,
    /// Absent keys materialize a configured default value on read.
    Vivify,
}

/// Configuration for a join table.
///
/// # Examples
///
/// ```rust
/// use streamjoin::TableConfig;
///
/// let config = TableConfig::new("order-join").partitions(4);
/// assert_eq!(config.name, "order-join");
/// assert_eq!(config.partitions, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Table name, used in logs, stats, and error messages.
    pub name: String,
    /// Number of physical partitions for sharded tables. A single-shard
    /// table ignores this.
    pub partitions: usize,
}

impl TableConfig {
    /// Creates a configuration with the given table name and one partition.
    pub fn new(name: impl Into<String>) -> Self {
        TableConfig {
            name: name.into(),
            partitions: 1,
        }
    }

    /// Sets the number of physical partitions. Clamped to at least one.
    pub fn partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions.max(1);
        self
    }
}
