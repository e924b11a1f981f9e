// ── Timeline assembler ──
//
// Reconstructs one order's causally-ordered timeline from its anchor
// events, time-window-joined satellite events, and decoded cabin-status
// deltas. The assembly is deliberately two sorted passes: satellite
// injection sorts once to establish landmark ordering, then the cabin
// pass interleaves decoded entries and sorts again.

use chrono::Utc;
use futures_util::try_join;
use lockline_store::{
    Arg, EventStore, SortOrder, StoreError, TransitionQuery, TriggerEvent, TriggerQuery,
};
use serde_json::json;
use tracing::debug;

use crate::cabin::{self, SuppressionPolicy};
use crate::config::EngineConfig;
use crate::correlate::{WindowSpec, correlate};
use crate::error::EngineError;
use crate::model::arg;
use crate::model::vocab;
use crate::model::{ChannelId, Timeline, TimelineEvent};

/// Assemble the timeline for one order id.
///
/// An unknown id is not an error: the result is an empty timeline.
/// Malformed payloads degrade by skipping the dependent step.
pub async fn assemble<S: EventStore>(
    store: &S,
    config: &EngineConfig,
    order_id: &str,
) -> Result<Timeline, EngineError> {
    // Anchor fetch: everything the firmware tagged with this order id.
    let base = store
        .find_triggers(
            TriggerQuery::new()
                .order_id(order_id)
                .sort(SortOrder::Ascending),
        )
        .await?;
    if base.is_empty() {
        debug!(order_id, "anchor id has no events");
        return Ok(Timeline::empty(order_id));
    }

    // Landmarks. At most one of each is expected; a missing landmark
    // skips the steps that depend on it.
    let store_confirm = landmark(&base, vocab::STORE_CONFIRM);
    let dispense_ready = landmark(&base, vocab::DISPENSE_READY);
    let dispense_done = landmark(&base, vocab::DISPENSE_DONE);
    let disposed = landmark(&base, vocab::DISPOSED);

    let token = store_confirm
        .and_then(|ev| arg::token(&ev.arg))
        .map(str::to_owned);
    let channel = store_confirm.and_then(|ev| arg::channel(&ev.arg));

    // Base projection.
    let mut events: Vec<TimelineEvent> = base.iter().map(TimelineEvent::from).collect();

    // Satellite windows around the landmarks, fetched concurrently:
    // reader scans before the storage confirmation, reader scans and
    // auth confirmations before dispense-ready.
    let (store_hits, dispense_hits) = try_join!(
        satellite(
            store,
            store_confirm,
            &[vocab::READER_SCAN],
            config.store_scan_lookback,
        ),
        satellite(
            store,
            dispense_ready,
            &[vocab::READER_SCAN, vocab::AUTH_OK],
            config.dispense_auth_lookback,
        ),
    )?;
    for hit in store_hits.iter().chain(dispense_hits.iter()) {
        push_unique(&mut events, TimelineEvent::from(hit));
    }

    // First sort pass. Stable, so equal timestamps keep fetch order.
    events.sort_by_key(|e| e.timestamp);

    // Cabin-status pass: decoded entries only exist relative to the
    // sorted span, so they interleave after the first pass and force a
    // second one.
    if let (Some(confirm), Some(channel)) = (store_confirm, &channel) {
        append_cabin_changes(
            store,
            config,
            confirm,
            dispense_done.or(disposed),
            channel,
            &mut events,
        )
        .await?;
        events.sort_by_key(|e| e.timestamp);
    }

    debug!(order_id, entries = events.len(), "timeline assembled");
    Ok(Timeline {
        order_id: order_id.to_owned(),
        token,
        channel,
        events,
    })
}

fn landmark<'a>(base: &'a [TriggerEvent], event: &str) -> Option<&'a TriggerEvent> {
    base.iter().find(|ev| ev.event == event)
}

/// Run one lookback window behind `anchor`, restricted to the anchor's
/// device when it has one. No anchor, no query.
async fn satellite<S: EventStore>(
    store: &S,
    anchor: Option<&TriggerEvent>,
    events: &[&str],
    lookback: i64,
) -> Result<Vec<TriggerEvent>, StoreError> {
    let Some(anchor) = anchor else {
        return Ok(Vec::new());
    };
    let mut spec = WindowSpec::new(events.iter().copied(), -lookback, 0);
    if let Some(device_id) = &anchor.device_id {
        spec = spec.on_device(device_id.clone());
    }
    correlate(store, anchor, std::slice::from_ref(&spec)).await
}

/// Append unless an equal record (timestamp, event, device) is already
/// present -- overlapping satellite windows must not inject a physical
/// record twice.
fn push_unique(events: &mut Vec<TimelineEvent>, candidate: TimelineEvent) {
    let duplicate = events.iter().any(|e| {
        e.timestamp == candidate.timestamp
            && e.event == candidate.event
            && e.device_id == candidate.device_id
    });
    if !duplicate {
        events.push(candidate);
    }
}

/// Decode `before_hint` cabin-status transitions for the order's channel
/// within the active window `[store - margin, terminal + margin]` (open
/// end = now) and synthesize timeline entries for real deltas.
async fn append_cabin_changes<S: EventStore>(
    store: &S,
    config: &EngineConfig,
    confirm: &TriggerEvent,
    terminal: Option<&TriggerEvent>,
    channel: &ChannelId,
    events: &mut Vec<TimelineEvent>,
) -> Result<(), StoreError> {
    let from = confirm.timestamp.saturating_sub(config.cabin_window_margin);
    let to = match terminal {
        Some(ev) => ev.timestamp.saturating_add(config.cabin_window_margin),
        None => Utc::now().timestamp_micros(),
    };

    // The transition filter itself excludes the duplicate "after" half;
    // nothing but `before_hint` records can reach the decoder.
    let hints = store
        .find_transitions(
            TransitionQuery::new()
                .require_cabin_status()
                .transition(vocab::BEFORE_HINT)
                .since(from)
                .until(to)
                .sort(SortOrder::Ascending),
        )
        .await?;

    let policy = SuppressionPolicy::timeline_default();
    for hint in &hints {
        // Transitions report all channels at once; skip records that say
        // nothing about ours.
        let Some((old, new)) = arg::cabin_status_pair(&hint.arg, channel) else {
            continue;
        };
        let delta = cabin::decode(old, new, policy);
        if delta.is_no_change() {
            continue;
        }
        let mut status_arg = Arg::new();
        status_arg.insert("old".to_owned(), json!(old));
        status_arg.insert("new".to_owned(), json!(new));
        status_arg.insert("changes".to_owned(), json!(delta.summary));
        events.push(TimelineEvent {
            timestamp: hint.timestamp,
            event: format!("cabin/{channel}"),
            arg: status_arg,
            state_machine: "cabin".to_owned(),
            trigger: "status_change".to_owned(),
            state: None,
            device_id: None,
        });
    }
    Ok(())
}
