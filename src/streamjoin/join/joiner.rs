//! The merge/sufficiency/eviction engine.
//!
//! One `Joiner` binds a [`JoinLogic`] implementation to a [`JoinStore`] and
//! exposes a single operation, [`Joiner::submit`], invoked once per inbound
//! fragment. The engine is synchronous and stateless between calls except
//! through the store.
//!
//! ## Ordering precondition
//!
//! All fragments sharing a key must reach `submit` strictly serialized; the
//! engine takes no lock around the fetch/merge/write/evict sequence, so
//! concurrent submits for one key can lose an update. Hosts satisfy this by
//! routing identical keys to the same execution context (a single task, or a
//! per-key worker). Distinct keys may be submitted in parallel freely.

use super::error::{JoinError, JoinResult, JoinStage};
use super::logic::{Existing, JoinLogic, JoinOutcome};
use crate::streamjoin::table::config::DefaultPolicy;
use crate::streamjoin::table::store::JoinStore;
use log::{debug, warn};

/// Partial-message join engine over a keyed table.
///
/// After any completed `submit`, a key is present in the table if and only
/// if its accumulated composite is still insufficient; a sufficient
/// composite is processed and evicted in the same step.
pub struct Joiner<L, S> {
    logic: L,
    store: S,
}

impl<L, S> Joiner<L, S>
where
    L: JoinLogic,
    S: JoinStore<L::Key, L::Composite>,
{
    /// Binds join logic to a backing table, validating the table first.
    ///
    /// The table must report [`DefaultPolicy::Absent`]: a table that
    /// vivifies defaults for missing keys would feed materialized values
    /// into merges, masking true absence. Checked once here, never per
    /// fragment.
    pub fn try_new(store: S, logic: L) -> JoinResult<Self> {
        let policy = store.default_policy();
        if policy != DefaultPolicy::Absent {
            return Err(JoinError::UnsafeTableDefault {
                table: store.name().to_string(),
                policy,
            });
        }
        debug!("Join engine bound to table '{}'", store.name());
        Ok(Joiner { logic, store })
    }

    /// Gets the backing table.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gets the bound join logic.
    pub fn logic(&self) -> &L {
        &self.logic
    }

    /// Submits one fragment: merge into the key's composite, test
    /// sufficiency, then either process-and-evict or retain the entry.
    ///
    /// For a key with no entry the merge's prior value is the fragment
    /// itself ([`Existing::Fragment`]); the table's default never takes
    /// part. The merged composite is written back and re-read before the
    /// sufficiency test, so a store that normalizes values on persist is
    /// judged on what it actually stored.
    ///
    /// Failures in the caller-supplied callables propagate as
    /// [`JoinError::CallableFailed`] with the offending key and stage; the
    /// engine performs no local recovery. If `process` succeeds but
    /// eviction fails, the entry remains and may be reprocessed on the next
    /// fragment for its key.
    pub fn submit(
        &self,
        fragment: L::Fragment,
    ) -> JoinResult<JoinOutcome<L::Processed, L::Deferred>> {
        let key = self.logic.key_of(&fragment);

        let prior = self
            .store
            .fetch(&key)
            .map_err(|e| JoinError::storage("fetch", &key, e))?;

        let merged = match &prior {
            Some(composite) => self.logic.merge(&fragment, Existing::Composite(composite)),
            // First contact: the fragment itself stands in for the prior value.
            None => self.logic.merge(&fragment, Existing::Fragment(&fragment)),
        }
        .map_err(|e| JoinError::callable(JoinStage::Merge, &key, e))?;

        self.store
            .upsert(key.clone(), merged)
            .map_err(|e| JoinError::storage("upsert", &key, e))?;

        // Re-read rather than trust the value we wrote: a schema-enforcing
        // store may transform on persist.
        let updated = self
            .store
            .fetch(&key)
            .map_err(|e| JoinError::storage("fetch", &key, e))?
            .ok_or_else(|| JoinError::EntryLost {
                table: self.store.name().to_string(),
                key: format!("{:?}", key),
            })?;

        let sufficient = self
            .logic
            .is_sufficient(&updated)
            .map_err(|e| JoinError::callable(JoinStage::Sufficiency, &key, e))?;

        if sufficient {
            let processed = self
                .logic
                .process(updated)
                .map_err(|e| JoinError::callable(JoinStage::Process, &key, e))?;

            if let Err(e) = self.store.remove(&key) {
                warn!(
                    "Processed key {:?} but eviction from '{}' failed; entry may be reprocessed",
                    key,
                    self.store.name()
                );
                return Err(JoinError::storage("remove", &key, e));
            }

            debug!(
                "Join complete for key {:?}; entry evicted from '{}'",
                key,
                self.store.name()
            );
            Ok(JoinOutcome::Processed(processed))
        } else {
            debug!(
                "Join incomplete for key {:?}; entry retained in '{}'",
                key,
                self.store.name()
            );
            let deferred = self
                .logic
                .on_incomplete(&updated)
                .map_err(|e| JoinError::callable(JoinStage::Incomplete, &key, e))?;
            Ok(JoinOutcome::Incomplete(deferred))
        }
    }
}
