// ── Order summary listing ──
//
// Flat per-order view derived from storage confirmations: one row per
// `store/store_ok` with a string order id, joined against the matching
// dispense completion to derive the completion flag.

use futures_util::future::try_join_all;
use lockline_store::{EventStore, SortOrder, StoreError, TriggerQuery};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::directory::DeviceDirectory;
use crate::error::EngineError;
use crate::model::arg;
use crate::model::vocab;
use crate::model::ChannelId;

/// Filters for the order listing. An exact `order_id` overrides the
/// scope filters, mirroring how operators drill down from a range view
/// to a single order.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub order_id: Option<String>,
    /// Restrict to orders stored at one site (its storer device).
    pub site_id: Option<String>,
    pub token: Option<String>,
    pub channel: Option<u64>,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub limit: Option<usize>,
}

/// One order row. Derived, read-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelId>,
    pub store_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispense_time: Option<i64>,
    pub complete: bool,
}

/// List recent orders, newest storage first.
pub async fn list<S, D>(
    store: &S,
    directory: &D,
    config: &EngineConfig,
    query: &OrderQuery,
) -> Result<Vec<OrderSummary>, EngineError>
where
    S: EventStore,
    D: DeviceDirectory + ?Sized,
{
    let mut q = TriggerQuery::new()
        .event(vocab::STORE_CONFIRM)
        .require_order_id()
        .sort(SortOrder::Descending)
        .limit(query.limit.unwrap_or(config.default_order_limit));
    if let Some(order_id) = &query.order_id {
        q = q.order_id(order_id.clone());
    } else {
        if let Some(bound) = query
            .site_id
            .as_deref()
            .and_then(|site_id| directory.site_devices(site_id))
        {
            // A site with no storer bound can have stored nothing;
            // an unknown site drops the scope instead.
            let Some(storer) = bound.storer else {
                debug!("scoped site has no storer device");
                return Ok(Vec::new());
            };
            q = q.device(storer);
        }
        if let Some(from) = query.from {
            q = q.since(from);
        }
        if let Some(to) = query.to {
            q = q.until(to);
        }
        if let Some(token) = &query.token {
            q = q.token(token.clone());
        }
        if let Some(channel) = query.channel {
            q = q.channel(channel);
        }
    }
    let confirms = store.find_triggers(q).await?;

    // One completion lookup per order, issued concurrently.
    let lookups = confirms.iter().map(|confirm| async move {
        let order_id = arg::order_id(&confirm.arg).unwrap_or_default().to_owned();
        let done = store
            .find_triggers(
                TriggerQuery::new()
                    .order_id(order_id.clone())
                    .event(vocab::DISPENSE_DONE)
                    .sort(SortOrder::Ascending)
                    .limit(1),
            )
            .await?;
        Ok::<_, StoreError>((confirm, order_id, done.into_iter().next()))
    });
    let resolved = try_join_all(lookups).await?;

    let summaries: Vec<OrderSummary> = resolved
        .into_iter()
        .map(|(confirm, order_id, done)| OrderSummary {
            order_id,
            site_id: confirm
                .device_id
                .as_deref()
                .and_then(|id| directory.resolve_site(id))
                .map(|b| b.site_id),
            token: arg::token(&confirm.arg).map(str::to_owned),
            channel: arg::channel(&confirm.arg),
            store_time: confirm.timestamp,
            dispense_time: done.as_ref().map(|d| d.timestamp),
            complete: done.is_some(),
        })
        .collect();
    debug!(orders = summaries.len(), "order listing built");
    Ok(summaries)
}
