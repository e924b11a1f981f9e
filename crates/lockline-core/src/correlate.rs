// ── Window correlator ──
//
// Satellite events (reader scans, auth confirmations) carry no order id;
// they are tied to an anchor event purely by device and time proximity.
// Each `WindowSpec` turns into exactly one ascending range query; specs
// within one call are independent and issued concurrently.

use futures_util::future::try_join_all;
use lockline_store::{EventStore, SortOrder, StoreError, TriggerEvent, TriggerQuery};
use tracing::debug;

/// One satellite query: an event-name filter plus a signed time window
/// relative to the anchor's timestamp (`offset_start` is usually
/// negative -- looking backward).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSpec {
    /// Restrict to one device; `None` scans all devices.
    pub device_id: Option<String>,
    /// Any-of event-name filter.
    pub events: Vec<String>,
    /// Window start offset from the anchor timestamp (µs, signed).
    pub offset_start: i64,
    /// Window end offset from the anchor timestamp (µs, signed).
    pub offset_end: i64,
}

impl WindowSpec {
    pub fn new<I, S>(events: I, offset_start: i64, offset_end: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            device_id: None,
            events: events.into_iter().map(Into::into).collect(),
            offset_start,
            offset_end,
        }
    }

    pub fn on_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

/// Run every spec's range query relative to `anchor` and concatenate the
/// raw matches, each spec's results ascending by timestamp.
///
/// No dedup happens here: only the caller knows whether its windows can
/// overlap and what identity means across them.
pub async fn correlate<S: EventStore>(
    store: &S,
    anchor: &TriggerEvent,
    specs: &[WindowSpec],
) -> Result<Vec<TriggerEvent>, StoreError> {
    let queries = specs.iter().map(|spec| {
        let mut query = TriggerQuery::new()
            .events(spec.events.iter().cloned())
            .since(anchor.timestamp.saturating_add(spec.offset_start))
            .until(anchor.timestamp.saturating_add(spec.offset_end))
            .sort(SortOrder::Ascending);
        if let Some(device_id) = &spec.device_id {
            query = query.device(device_id.clone());
        }
        store.find_triggers(query)
    });

    let batches = try_join_all(queries).await?;
    let hits: Vec<TriggerEvent> = batches.into_iter().flatten().collect();
    debug!(
        anchor = anchor.timestamp,
        specs = specs.len(),
        matched = hits.len(),
        "window correlation"
    );
    Ok(hits)
}
