// ── System-log classifier ──
//
// Five independent scans over a reporting window, each mapped to leveled
// log lines, merged newest-first and truncated. The scans share no
// ordering dependency, so they run concurrently; per-scan fetch ceilings
// bound worst-case cost before the final truncation.

use futures_util::try_join;
use lockline_store::{
    EventStore, SortOrder, StoreError, TransitionQuery, TriggerEvent, TriggerQuery,
};
use tracing::debug;

use crate::cabin::CabinFlag;
use crate::config::EngineConfig;
use crate::directory::DeviceDirectory;
use crate::error::EngineError;
use crate::model::arg;
use crate::model::vocab;
use crate::model::{ChannelId, LogLevel, SystemLogEntry};

/// Scope and range of one system-log build.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Restrict to one site's storer and retriever devices.
    pub site_id: Option<String>,
    /// Restrict channel-bearing entries (fault edges, disposals) to one
    /// channel.
    pub channel: Option<ChannelId>,
    /// Inclusive lower timestamp bound (µs).
    pub from: Option<i64>,
    /// Inclusive upper timestamp bound (µs).
    pub to: Option<i64>,
    /// Entry cap after the final merge; engine default when `None`.
    pub limit: Option<usize>,
}

/// Build the rolling system log for one reporting window.
pub async fn build<S, D>(
    store: &S,
    directory: &D,
    config: &EngineConfig,
    query: &LogQuery,
) -> Result<Vec<SystemLogEntry>, EngineError>
where
    S: EventStore,
    D: DeviceDirectory + ?Sized,
{
    // Site scope resolves to the site's bound devices. An unknown site
    // leaves the scans unscoped, same as no site filter at all; a known
    // site with no devices bound scopes every scan to nothing.
    let devices: Vec<String> = match &query.site_id {
        Some(site_id) => match directory.site_devices(site_id) {
            Some(bound) => {
                let devices: Vec<String> =
                    bound.storer.into_iter().chain(bound.retriever).collect();
                if devices.is_empty() {
                    debug!(site_id, "site has no bound devices");
                    return Ok(Vec::new());
                }
                devices
            }
            None => Vec::new(),
        },
        None => Vec::new(),
    };

    let (faults, disposals, timeouts, begins, boots) = try_join!(
        fault_edges(store, directory, config, &devices, query),
        fetch(store, vocab::DISPOSED, &devices, query, config.log_scan_limit),
        fetch(store, vocab::SESSION_TIMEOUT, &devices, query, config.log_scan_limit),
        fetch(store, vocab::SESSION_BEGIN, &devices, query, config.log_scan_limit),
        fetch(store, vocab::POWER_ON, &devices, query, config.log_scan_limit),
    )?;

    let mut entries = faults;
    entries.extend(
        disposals
            .iter()
            .filter_map(|ev| disposal_entry(directory, query, ev)),
    );
    for (hits, level, kind) in [
        (&timeouts, LogLevel::Info, "session idle"),
        (&begins, LogLevel::Info, "session started"),
        (&boots, LogLevel::Success, "boot complete"),
    ] {
        entries.extend(
            hits.iter()
                .map(|ev| classify(directory, ev.timestamp, level, kind, None, ev.device_id.clone(), None)),
        );
    }

    // Newest first; the cap drops whatever sorts past it, regardless of
    // which scan produced it. Stable, so equal timestamps keep scan
    // order.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let limit = query.limit.unwrap_or(config.default_log_limit);
    entries.truncate(limit);
    debug!(entries = entries.len(), limit, "system log built");
    Ok(entries)
}

/// Compare the fault bit per channel entry of every `before_hint`
/// status record: rising edge is an error, falling edge a recovery.
async fn fault_edges<S, D>(
    store: &S,
    directory: &D,
    config: &EngineConfig,
    devices: &[String],
    query: &LogQuery,
) -> Result<Vec<SystemLogEntry>, StoreError>
where
    S: EventStore,
    D: DeviceDirectory + ?Sized,
{
    let mut q = TransitionQuery::new()
        .require_cabin_status()
        .transition(vocab::BEFORE_HINT)
        .devices(devices.iter().cloned())
        .sort(SortOrder::Descending)
        .limit(config.fault_scan_limit);
    if let Some(from) = query.from {
        q = q.since(from);
    }
    if let Some(to) = query.to {
        q = q.until(to);
    }
    let hits = store.find_transitions(q).await?;

    let fault = CabinFlag::Fault.mask();
    let mut entries = Vec::new();
    for ev in &hits {
        for (channel, (old, new)) in arg::cabin_status_entries(&ev.arg) {
            if query.channel.as_ref().is_some_and(|scope| *scope != channel) {
                continue;
            }
            let (level, kind, message) = match (old & fault != 0, new & fault != 0) {
                (false, true) => (
                    LogLevel::Error,
                    "channel fault",
                    format!("channel {channel} entered fault state"),
                ),
                (true, false) => (
                    LogLevel::Success,
                    "fault recovered",
                    format!("channel {channel} fault cleared"),
                ),
                _ => continue,
            };
            entries.push(classify(
                directory,
                ev.timestamp,
                level,
                kind,
                Some(message),
                ev.device_id.clone(),
                Some(channel),
            ));
        }
    }
    Ok(entries)
}

fn disposal_entry<D: DeviceDirectory + ?Sized>(
    directory: &D,
    query: &LogQuery,
    ev: &TriggerEvent,
) -> Option<SystemLogEntry> {
    let channel = arg::channel(&ev.arg);
    if let Some(scope) = &query.channel {
        if channel.as_ref() != Some(scope) {
            return None;
        }
    }
    let message = channel
        .as_ref()
        .map(|ch| format!("channel {ch} order disposed"));
    Some(classify(
        directory,
        ev.timestamp,
        LogLevel::Warn,
        "order disposed",
        message,
        ev.device_id.clone(),
        channel,
    ))
}

/// One descending trigger scan with the shared scope filters applied.
async fn fetch<S: EventStore>(
    store: &S,
    event: &str,
    devices: &[String],
    query: &LogQuery,
    limit: usize,
) -> Result<Vec<TriggerEvent>, StoreError> {
    let mut q = TriggerQuery::new()
        .event(event)
        .devices(devices.iter().cloned())
        .sort(SortOrder::Descending)
        .limit(limit);
    if let Some(from) = query.from {
        q = q.since(from);
    }
    if let Some(to) = query.to {
        q = q.until(to);
    }
    store.find_triggers(q).await
}

fn classify<D: DeviceDirectory + ?Sized>(
    directory: &D,
    timestamp: i64,
    level: LogLevel,
    kind: &str,
    message: Option<String>,
    device_id: Option<String>,
    channel: Option<ChannelId>,
) -> SystemLogEntry {
    let binding = device_id
        .as_deref()
        .and_then(|id| directory.resolve_site(id));
    SystemLogEntry {
        timestamp,
        level,
        event: kind.to_owned(),
        message,
        device_id,
        site_id: binding.as_ref().map(|b| b.site_id.clone()),
        device_role: binding.map(|b| b.role),
        channel,
    }
}
