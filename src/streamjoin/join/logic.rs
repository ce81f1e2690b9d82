//! Caller-supplied join logic.
//!
//! The engine treats fragments and composites opaquely: everything
//! domain-specific (how a key is derived, how two partial arrivals combine,
//! when the combination is ready, and what happens to it then) lives behind
//! the [`JoinLogic`] trait, implemented once by the host application.

use std::fmt::Debug;
use std::hash::Hash;

/// The prior value handed to [`JoinLogic::merge`] alongside a new fragment.
///
/// On first contact for a key there is no stored composite; the incoming
/// fragment itself stands in as the prior value rather than any neutral or
/// zero value, so a merge function always sees real data on at least one
/// side. Merge implementations must handle both variants.
#[derive(Debug)]
pub enum Existing<'a, F, C> {
    /// No entry existed for the key; the prior value is the fragment itself.
    Fragment(&'a F),
    /// The composite accumulated from earlier fragments for this key.
    Composite(&'a C),
}

/// Outcome of a single submit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome<P, D> {
    /// The composite became sufficient; it was processed and its table entry
    /// evicted. Carries the processing result.
    Processed(P),
    /// The composite is still insufficient; the entry remains in the table.
    /// Carries the incomplete handler's result.
    Incomplete(D),
}

impl<P, D> JoinOutcome<P, D> {
    /// True if the sufficient path ran (processed and evicted).
    pub fn is_processed(&self) -> bool {
        matches!(self, JoinOutcome::Processed(_))
    }

    /// True if the composite is still accumulating.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, JoinOutcome::Incomplete(_))
    }

    /// The processing result, if the sufficient path ran.
    pub fn into_processed(self) -> Option<P> {
        match self {
            JoinOutcome::Processed(processed) => Some(processed),
            JoinOutcome::Incomplete(_) => None,
        }
    }
}

/// Business logic for one join: key extraction, merging, sufficiency,
/// processing, and the optional incomplete handler.
///
/// Fragments and composites need not share a shape; a merge may project
/// into a richer result type than any single arrival carries.
pub trait JoinLogic: Send + Sync {
    /// One partial arrival of a logical record.
    type Fragment: Send;
    /// Identifies one logical record's in-flight accumulation.
    type Key: Clone + Eq + Hash + Debug + Send + Sync;
    /// The accumulated merge result stored per key until sufficient.
    type Composite: Clone + Send + Sync;
    /// Result of processing a sufficient composite.
    type Processed;
    /// Result of the incomplete handler. `Default` backs the no-op handler;
    /// use `()` when the insufficient path carries nothing.
    type Deferred: Default;
    /// Failure type for the fallible operations below.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derives the join key from a fragment.
    fn key_of(&self, fragment: &Self::Fragment) -> Self::Key;

    /// Combines a newly arrived fragment with the prior value for its key.
    ///
    /// The new fragment is always the first argument and the prior value the
    /// second; field-priority merges ("prefer the new value if present, else
    /// keep the old") depend on this ordering. See [`Existing`] for the
    /// first-arrival case.
    fn merge(
        &self,
        fragment: &Self::Fragment,
        existing: Existing<'_, Self::Fragment, Self::Composite>,
    ) -> Result<Self::Composite, Self::Error>;

    /// Decides whether a composite is complete enough to process.
    fn is_sufficient(&self, composite: &Self::Composite) -> Result<bool, Self::Error>;

    /// Acts on a sufficient composite.
    ///
    /// Side effects here are not sequenced transactionally with eviction: if
    /// eviction fails afterwards the entry may be reprocessed on the next
    /// fragment for its key, so implementations must be idempotent or
    /// side-effect-safe under at-least-once delivery.
    fn process(&self, composite: Self::Composite) -> Result<Self::Processed, Self::Error>;

    /// Runs on each updated-but-insufficient composite. Defaults to a no-op.
    fn on_incomplete(&self, composite: &Self::Composite) -> Result<Self::Deferred, Self::Error> {
        let _ = composite;
        Ok(Self::Deferred::default())
    }
}
