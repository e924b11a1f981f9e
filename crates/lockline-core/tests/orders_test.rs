#![allow(clippy::unwrap_used)]
// Order summary listing scenarios against the in-memory store.

use lockline_core::{ChannelId, Engine, OrderQuery, SiteDirectory, SiteRecord};
use lockline_store::{MemoryStore, TriggerEvent};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

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

fn directory() -> SiteDirectory {
    SiteDirectory::from_records(vec![SiteRecord {
        site_id: "site-1".into(),
        storer_device_id: Some("dev-in".into()),
        retriever_device_id: Some("dev-out".into()),
    }])
}

fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.push_trigger(trigger(
        1_000,
        "store/store_ok",
        "dev-in",
        json!({ "oid": "OID-A", "token": "TA", "chid": [7] }),
    ));
    store.push_trigger(trigger(
        5_000,
        "dispense/prod_dispensed",
        "dev-out",
        json!({ "oid": "OID-A" }),
    ));
    store.push_trigger(trigger(
        2_000,
        "store/store_ok",
        "dev-in",
        json!({ "oid": "OID-B", "token": "TB", "chid": [3] }),
    ));
    // Confirmation without a usable order id: excluded from the listing.
    store.push_trigger(trigger(3_000, "store/store_ok", "dev-in", json!({})));
    store
}

#[tokio::test]
async fn lists_orders_newest_first_with_completion() {
    let engine = Engine::new(seeded_store(), directory());
    let orders = engine.order_summaries(&OrderQuery::default()).await.unwrap();

    assert_eq!(orders.len(), 2);

    assert_eq!(orders[0].order_id, "OID-B");
    assert_eq!(orders[0].store_time, 2_000);
    assert!(!orders[0].complete);
    assert_eq!(orders[0].dispense_time, None);
    assert_eq!(orders[0].channel, Some(ChannelId::from(3)));

    assert_eq!(orders[1].order_id, "OID-A");
    assert_eq!(orders[1].store_time, 1_000);
    assert!(orders[1].complete);
    assert_eq!(orders[1].dispense_time, Some(5_000));
    assert_eq!(orders[1].token.as_deref(), Some("TA"));
    assert_eq!(orders[1].site_id.as_deref(), Some("site-1"));
}

#[tokio::test]
async fn exact_order_id_overrides_scope_filters() {
    let engine = Engine::new(seeded_store(), directory());
    let orders = engine
        .order_summaries(&OrderQuery {
            order_id: Some("OID-A".into()),
            // Deliberately contradictory range; ignored for exact lookup.
            from: Some(999_999),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, "OID-A");
}

#[tokio::test]
async fn scope_filters_narrow_the_listing() {
    let engine = Engine::new(seeded_store(), directory());

    let by_token = engine
        .order_summaries(&OrderQuery {
            token: Some("TB".into()),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_token.len(), 1);
    assert_eq!(by_token[0].order_id, "OID-B");

    let by_channel = engine
        .order_summaries(&OrderQuery {
            channel: Some(7),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_channel.len(), 1);
    assert_eq!(by_channel[0].order_id, "OID-A");

    let by_range = engine
        .order_summaries(&OrderQuery {
            from: Some(1_500),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(by_range.len(), 1);
    assert_eq!(by_range[0].order_id, "OID-B");
}

#[tokio::test]
async fn site_scope_uses_the_storer_device() {
    let mut store = seeded_store();
    store.push_trigger(trigger(
        4_000,
        "store/store_ok",
        "dev-other-site",
        json!({ "oid": "OID-C" }),
    ));

    let engine = Engine::new(store, directory());
    let orders = engine
        .order_summaries(&OrderQuery {
            site_id: Some("site-1".into()),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["OID-B", "OID-A"]);
}

#[tokio::test]
async fn site_without_storer_lists_nothing() {
    let directory = SiteDirectory::from_records(vec![SiteRecord {
        // Retriever bound, storer not yet provisioned.
        site_id: "site-bare".into(),
        storer_device_id: None,
        retriever_device_id: Some("dev-out".into()),
    }]);
    let engine = Engine::new(seeded_store(), directory);

    let scoped = engine
        .order_summaries(&OrderQuery {
            site_id: Some("site-bare".into()),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert!(scoped.is_empty(), "unprovisioned site must not list other devices' orders");

    // An unknown site drops the scope instead of emptying the listing.
    let unknown = engine
        .order_summaries(&OrderQuery {
            site_id: Some("site-ghost".into()),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(unknown.len(), 2);
}

#[tokio::test]
async fn limit_caps_the_listing() {
    let engine = Engine::new(seeded_store(), directory());
    let orders = engine
        .order_summaries(&OrderQuery {
            limit: Some(1),
            ..OrderQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_id, "OID-B");
}
