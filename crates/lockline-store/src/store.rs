// ── Store trait and error taxonomy ──
//
// The engine sees the backing store only through this trait. Failures
// here are infrastructure failures; data-quality anomalies (missing arg
// fields, unknown anchors) are NOT errors and never surface through
// `StoreError` -- the engine handles those by degrading.

use std::future::Future;

use thiserror::Error;

use crate::event::{TransitionEvent, TriggerEvent};
use crate::query::{TransitionQuery, TriggerQuery};

/// Errors from the backing event store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("event store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("event store query timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("event store backend error: {0}")]
    Backend(String),
}

/// Read access to the two append-only streams.
///
/// Implementations must honor every filter in the query, return results
/// ordered by `timestamp` in the requested direction, and apply the
/// result limit after sorting. No method mutates the store.
pub trait EventStore: Send + Sync {
    fn find_triggers(
        &self,
        query: TriggerQuery,
    ) -> impl Future<Output = Result<Vec<TriggerEvent>, StoreError>> + Send;

    fn find_transitions(
        &self,
        query: TransitionQuery,
    ) -> impl Future<Output = Result<Vec<TransitionEvent>, StoreError>> + Send;
}
