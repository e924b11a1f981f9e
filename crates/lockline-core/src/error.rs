// ── Core error type ──
//
// Only infrastructure failures surface here. Data-quality anomalies
// (unknown anchor, missing arg fields, unresolvable devices) degrade to
// empty or partial results instead -- field telemetry is never trusted
// to be complete, and one malformed record must not fail correlation
// for the rest.

use lockline_store::StoreError;
use thiserror::Error;

/// Unified error type for the correlation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The backing event store failed; propagated without retry
    /// (retries, if any, belong to the store client).
    #[error("event store failure: {0}")]
    Store(#[from] StoreError),
}
