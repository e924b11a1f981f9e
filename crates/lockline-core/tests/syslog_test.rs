#![allow(clippy::unwrap_used)]
// System-log classification scenarios against the in-memory store.

use lockline_core::{ChannelId, DeviceRole, Engine, LogLevel, LogQuery, SiteDirectory, SiteRecord};
use lockline_store::{MemoryStore, TransitionEvent, TriggerEvent};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ── Helpers ─────────────────────────────────────────────────────────

fn trigger(timestamp: i64, event: &str, device: &str, arg: Value) -> TriggerEvent {
    serde_json::from_value(json!({
        "timestamp": timestamp,
        "e": event,
        "sm": event.split('/').next().unwrap(),
        "trigger": event.split('/').next_back().unwrap(),
        "deviceId": device,
        "arg": arg,
    }))
    .unwrap()
}

fn hint(timestamp: i64, device: &str, cabin_status: Value) -> TransitionEvent {
    serde_json::from_value(json!({
        "timestamp": timestamp,
        "e": "cabin/hint",
        "sm": "cabin",
        "transition": "before_hint",
        "deviceId": device,
        "arg": { "cabin_status": cabin_status },
    }))
    .unwrap()
}

fn directory() -> SiteDirectory {
    SiteDirectory::from_records(vec![SiteRecord {
        site_id: "site-1".into(),
        storer_device_id: Some("dev-in".into()),
        retriever_device_id: Some("dev-out".into()),
    }])
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn truncation_keeps_newest_entries_regardless_of_category() {
    let mut store = MemoryStore::new();
    // Fault rising edge on channel 03 at t=500, session start at t=600.
    store.push_transition(hint(500, "dev-in", json!({ "03": [0, 128] })));
    store.push_trigger(trigger(600, "sess/session_begin", "dev-in", json!({})));

    let engine = Engine::new(store, directory());
    let log = engine
        .system_log(&LogQuery {
            limit: Some(1),
            ..LogQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(log[0].timestamp, 600);
    assert_eq!(log[0].event, "session started");
    assert_eq!(log[0].level, LogLevel::Info);
}

#[tokio::test]
async fn fault_edges_classify_rising_and_falling() {
    let mut store = MemoryStore::new();
    store.push_transition(hint(100, "dev-in", json!({ "03": [0, 128] })));
    store.push_transition(hint(200, "dev-in", json!({ "03": [128, 0] })));
    // No edge: fault bit unchanged.
    store.push_transition(hint(300, "dev-in", json!({ "03": [128, 129] })));

    let engine = Engine::new(store, directory());
    let log = engine.system_log(&LogQuery::default()).await.unwrap();

    assert_eq!(log.len(), 2);
    assert_eq!(log[0].timestamp, 200);
    assert_eq!(log[0].level, LogLevel::Success);
    assert_eq!(log[0].event, "fault recovered");
    assert_eq!(log[0].message.as_deref(), Some("channel 03 fault cleared"));

    assert_eq!(log[1].timestamp, 100);
    assert_eq!(log[1].level, LogLevel::Error);
    assert_eq!(log[1].event, "channel fault");
    assert_eq!(
        log[1].message.as_deref(),
        Some("channel 03 entered fault state")
    );
    assert_eq!(log[1].channel, Some(ChannelId::from(3)));
}

#[tokio::test]
async fn channel_scope_filters_channel_bearing_entries() {
    let mut store = MemoryStore::new();
    store.push_transition(hint(100, "dev-in", json!({ "03": [0, 128], "05": [0, 128] })));
    store.push_trigger(trigger(
        150,
        "dispose/dispose_ok",
        "dev-in",
        json!({ "chid": [5] }),
    ));
    // Channel-less scans are unaffected by channel scope.
    store.push_trigger(trigger(200, "sys/sys_op", "dev-in", json!({})));

    let engine = Engine::new(store, directory());
    let log = engine
        .system_log(&LogQuery {
            channel: Some(ChannelId::from(5)),
            ..LogQuery::default()
        })
        .await
        .unwrap();

    let kinds: Vec<(&str, i64)> = log.iter().map(|e| (e.event.as_str(), e.timestamp)).collect();
    assert_eq!(
        kinds,
        vec![
            ("boot complete", 200),
            ("order disposed", 150),
            ("channel fault", 100),
        ]
    );
}

#[tokio::test]
async fn disposal_entries_cite_the_channel() {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(
        100,
        "dispose/dispose_ok",
        "dev-in",
        json!({ "chid": [5] }),
    ));

    let engine = Engine::new(store, directory());
    let log = engine.system_log(&LogQuery::default()).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].level, LogLevel::Warn);
    assert_eq!(log[0].message.as_deref(), Some("channel 05 order disposed"));
    assert_eq!(log[0].channel, Some(ChannelId::from(5)));
}

#[tokio::test]
async fn site_scope_restricts_to_bound_devices() {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(100, "sess/timeout", "dev-in", json!({})));
    store.push_trigger(trigger(200, "sess/timeout", "dev-elsewhere", json!({})));

    let engine = Engine::new(store, directory());
    let scoped = engine
        .system_log(&LogQuery {
            site_id: Some("site-1".into()),
            ..LogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].device_id.as_deref(), Some("dev-in"));

    let unscoped = engine.system_log(&LogQuery::default()).await.unwrap();
    assert_eq!(unscoped.len(), 2);
}

#[tokio::test]
async fn unbound_site_scope_matches_nothing() {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(100, "sess/timeout", "dev-elsewhere", json!({})));

    // "site-bare" exists but has no devices bound yet.
    let directory = SiteDirectory::from_records(vec![SiteRecord {
        site_id: "site-bare".into(),
        storer_device_id: None,
        retriever_device_id: None,
    }]);
    let engine = Engine::new(store, directory);

    let scoped = engine
        .system_log(&LogQuery {
            site_id: Some("site-bare".into()),
            ..LogQuery::default()
        })
        .await
        .unwrap();
    assert!(scoped.is_empty(), "unprovisioned site must not widen to the fleet");

    // An unknown site, by contrast, drops the scope entirely.
    let unknown = engine
        .system_log(&LogQuery {
            site_id: Some("site-ghost".into()),
            ..LogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(unknown.len(), 1);
}

#[tokio::test]
async fn entries_resolve_site_and_role_through_directory() {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(100, "sess/session_begin", "dev-out", json!({})));
    store.push_trigger(trigger(200, "sess/session_begin", "dev-unknown", json!({})));

    let engine = Engine::new(store, directory());
    let log = engine.system_log(&LogQuery::default()).await.unwrap();

    assert_eq!(log[0].device_id.as_deref(), Some("dev-unknown"));
    assert_eq!(log[0].site_id, None);
    assert_eq!(log[0].device_role, None);

    assert_eq!(log[1].device_id.as_deref(), Some("dev-out"));
    assert_eq!(log[1].site_id.as_deref(), Some("site-1"));
    assert_eq!(log[1].device_role, Some(DeviceRole::Retriever));
}

#[tokio::test]
async fn time_range_bounds_every_scan() {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(100, "sys/sys_op", "dev-in", json!({})));
    store.push_trigger(trigger(500, "sys/sys_op", "dev-in", json!({})));
    store.push_transition(hint(900, "dev-in", json!({ "03": [0, 128] })));

    let engine = Engine::new(store, directory());
    let log = engine
        .system_log(&LogQuery {
            from: Some(200),
            to: Some(600),
            ..LogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].timestamp, 500);
}
