//! Construction-guard tests: the join engine must refuse any table whose
//! default policy is not true absence, and accept any table that reports it.

use std::convert::Infallible;
use streamjoin::{
    DefaultPolicy, Existing, InMemoryTable, JoinError, JoinLogic, JoinStore, Joiner,
    PartitionedTable, TableConfig,
};

/// Minimal logic: counts u64 amounts per account until the total reaches a
/// threshold.
struct CountJoin;

impl JoinLogic for CountJoin {
    type Fragment = (String, u64);
    type Key = String;
    type Composite = u64;
    type Processed = u64;
    type Deferred = ();
    type Error = Infallible;

    fn key_of(&self, fragment: &(String, u64)) -> String {
        fragment.0.clone()
    }

    fn merge(
        &self,
        fragment: &(String, u64),
        existing: Existing<'_, (String, u64), u64>,
    ) -> Result<u64, Infallible> {
        Ok(match existing {
            Existing::Fragment(_) => fragment.1,
            Existing::Composite(total) => total + fragment.1,
        })
    }

    fn is_sufficient(&self, total: &u64) -> Result<bool, Infallible> {
        Ok(*total >= 3)
    }

    fn process(&self, total: u64) -> Result<u64, Infallible> {
        Ok(total)
    }
}

#[test]
fn test_vivifying_table_rejected() {
    let table: InMemoryTable<String, u64> =
        InMemoryTable::with_default(TableConfig::new("vivifying"), || 0);
    assert_eq!(table.default_policy(), DefaultPolicy::Vivify);

    match Joiner::try_new(table, CountJoin) {
        Err(JoinError::UnsafeTableDefault { table, policy }) => {
            assert_eq!(table, "vivifying");
            assert_eq!(policy, DefaultPolicy::Vivify);
        }
        Err(other) => panic!("Expected UnsafeTableDefault, got {:?}", other),
        Ok(_) => panic!("Engine construction should have failed"),
    }
}

#[test]
fn test_guard_error_names_the_table() {
    let table: InMemoryTable<String, u64> =
        InMemoryTable::with_default(TableConfig::new("orders-join"), || 0);
    let err = Joiner::try_new(table, CountJoin).err().expect("guard must fire");
    let message = err.to_string();
    assert!(message.contains("orders-join"), "message was: {}", message);
    assert!(message.contains("DefaultPolicy::Absent"), "message was: {}", message);
}

#[test]
fn test_absent_table_accepted() {
    let table: InMemoryTable<String, u64> = InMemoryTable::new(TableConfig::new("safe"));
    assert_eq!(table.default_policy(), DefaultPolicy::Absent);

    let joiner = Joiner::try_new(table, CountJoin).expect("absent default must be accepted");
    assert_eq!(joiner.store().name(), "safe");
}

#[test]
fn test_partitioned_table_accepted() {
    let table: PartitionedTable<String, u64> =
        PartitionedTable::new(TableConfig::new("sharded-safe").partitions(8));
    assert!(Joiner::try_new(table, CountJoin).is_ok());
}

#[test]
fn test_guard_does_not_touch_entries() {
    let table: InMemoryTable<String, u64> = InMemoryTable::new(TableConfig::new("untouched"));
    table.upsert("acct-1".to_string(), 2).unwrap();

    let joiner = Joiner::try_new(table, CountJoin).unwrap();
    // Validation is a pure precondition check; pre-existing state survives.
    assert_eq!(joiner.store().fetch(&"acct-1".to_string()).unwrap(), Some(2));
    assert_eq!(joiner.store().len(), 1);
}
