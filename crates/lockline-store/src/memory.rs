// ── In-memory reference store ──
//
// Linear scan over buffered records, applying the same filter surface a
// real backend would push down to its indexes. Used by the engine's test
// suites and by embedders that buffer telemetry locally.

use std::future::{Future, ready};

use tracing::debug;

use crate::event::{TransitionEvent, TriggerEvent};
use crate::query::{SortOrder, TransitionQuery, TriggerQuery};
use crate::store::{EventStore, StoreError};

/// In-memory [`EventStore`] backed by two vectors.
///
/// Records keep their insertion order; queries sort matches by timestamp
/// (stable, so same-timestamp records keep insertion order) and then
/// apply the limit, matching the contract a database-backed store honors
/// with an indexed sort.
#[derive(Debug, Default)]
pub struct MemoryStore {
    triggers: Vec<TriggerEvent>,
    transitions: Vec<TransitionEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(triggers: Vec<TriggerEvent>, transitions: Vec<TransitionEvent>) -> Self {
        Self {
            triggers,
            transitions,
        }
    }

    pub fn push_trigger(&mut self, event: TriggerEvent) {
        self.triggers.push(event);
    }

    pub fn push_transition(&mut self, event: TransitionEvent) {
        self.transitions.push(event);
    }

    pub fn len(&self) -> usize {
        self.triggers.len() + self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty() && self.transitions.is_empty()
    }
}

// The backing data is plain memory, so queries resolve eagerly and the
// trait methods hand back already-ready futures.
impl EventStore for MemoryStore {
    fn find_triggers(
        &self,
        query: TriggerQuery,
    ) -> impl Future<Output = Result<Vec<TriggerEvent>, StoreError>> + Send {
        let mut hits: Vec<TriggerEvent> = self
            .triggers
            .iter()
            .filter(|ev| query.matches(ev))
            .cloned()
            .collect();
        sort_and_truncate(&mut hits, |ev| ev.timestamp, query.sort, query.limit);
        debug!(matched = hits.len(), "trigger query");
        ready(Ok(hits))
    }

    fn find_transitions(
        &self,
        query: TransitionQuery,
    ) -> impl Future<Output = Result<Vec<TransitionEvent>, StoreError>> + Send {
        let mut hits: Vec<TransitionEvent> = self
            .transitions
            .iter()
            .filter(|ev| query.matches(ev))
            .cloned()
            .collect();
        sort_and_truncate(&mut hits, |ev| ev.timestamp, query.sort, query.limit);
        debug!(matched = hits.len(), "transition query");
        ready(Ok(hits))
    }
}

fn sort_and_truncate<T>(
    hits: &mut Vec<T>,
    key: impl Fn(&T) -> i64,
    sort: SortOrder,
    limit: Option<usize>,
) {
    match sort {
        SortOrder::Ascending => hits.sort_by_key(|ev| key(ev)),
        SortOrder::Descending => hits.sort_by(|a, b| key(b).cmp(&key(a))),
    }
    if let Some(limit) = limit {
        hits.truncate(limit);
    }
}
