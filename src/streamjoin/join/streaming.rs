//! Stream-driven join execution.
//!
//! `JoinRunner` drains an async stream of fragments through a [`Joiner`] on
//! a single task. Because every fragment passes through one sequential loop,
//! the per-key serialization the engine requires holds by construction.
//! Hosts that shard fragments across tasks instead should run one `Joiner`
//! submission context per key range and keep identical keys on the same
//! task.
//!
//! The runner discards outcome payloads and only counts them; hosts that
//! need the processed results call [`Joiner::submit`] directly or emit from
//! within their `process` implementation.

use super::error::JoinResult;
use super::joiner::Joiner;
use super::logic::{JoinLogic, JoinOutcome};
use crate::streamjoin::table::store::JoinStore;
use futures::{Stream, StreamExt};
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How the runner reacts when `submit` fails for a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the loop and surface the error to the caller of `run`.
    #[default]
    Halt,
    /// Log the failure, count it, and continue with the next fragment.
    LogAndSkip,
}

/// Counters for one runner session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerStats {
    /// Fragments pulled from the stream.
    pub fragments: u64,
    /// Submits that completed a composite (processed and evicted).
    pub processed: u64,
    /// Submits that left the composite accumulating.
    pub incomplete: u64,
    /// Submits that failed (only nonzero under `LogAndSkip`).
    pub failures: u64,
}

/// Drives a stream of fragments through a join engine.
pub struct JoinRunner<L, S> {
    joiner: Arc<Joiner<L, S>>,
    policy: FailurePolicy,
    running: Arc<AtomicBool>,
}

impl<L, S> JoinRunner<L, S>
where
    L: JoinLogic,
    S: JoinStore<L::Key, L::Composite>,
{
    /// Creates a runner over the given engine with the default fail-fast
    /// policy.
    pub fn new(joiner: Arc<Joiner<L, S>>) -> Self {
        JoinRunner {
            joiner,
            policy: FailurePolicy::default(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the per-fragment failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Gets the engine this runner drives.
    pub fn joiner(&self) -> &Joiner<L, S> {
        &self.joiner
    }

    /// Requests the loop to stop after the in-flight fragment.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Checks if the runner loop is active.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Consumes fragments until the stream ends or `stop()` is called,
    /// submitting each to the engine in arrival order.
    ///
    /// Under [`FailurePolicy::Halt`] the first submit error stops the loop
    /// and is returned; under [`FailurePolicy::LogAndSkip`] errors are
    /// logged and counted in [`RunnerStats::failures`].
    pub async fn run<St>(&self, mut fragments: St) -> JoinResult<RunnerStats>
    where
        St: Stream<Item = L::Fragment> + Unpin,
    {
        self.running.store(true, Ordering::Relaxed);
        let mut stats = RunnerStats::default();

        while self.running.load(Ordering::Relaxed) {
            let Some(fragment) = fragments.next().await else {
                break;
            };
            stats.fragments += 1;

            match self.joiner.submit(fragment) {
                Ok(JoinOutcome::Processed(_)) => stats.processed += 1,
                Ok(JoinOutcome::Incomplete(_)) => stats.incomplete += 1,
                Err(e) => match self.policy {
                    FailurePolicy::Halt => {
                        self.running.store(false, Ordering::Relaxed);
                        return Err(e);
                    }
                    FailurePolicy::LogAndSkip => {
                        stats.failures += 1;
                        error!("Join submit failed, skipping fragment: {}", e);
                    }
                },
            }
        }

        self.running.store(false, Ordering::Relaxed);
        info!(
            "Join runner drained '{}': {} fragments, {} processed, {} incomplete, {} failed",
            self.joiner.store().name(),
            stats.fragments,
            stats.processed,
            stats.incomplete,
            stats.failures
        );
        Ok(stats)
    }
}
