// ── Timeline projection types ──

use lockline_store::{Arg, TriggerEvent};
use serde::{Deserialize, Serialize};

use super::channel::ChannelId;

/// One entry of an assembled timeline. A normalized projection shared by
/// anchor-sourced, satellite-sourced, and decoded-status-sourced entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub timestamp: i64,
    pub event: String,
    pub arg: Arg,
    pub state_machine: String,
    pub trigger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// `None` for synthesized cabin-status entries: the status delta is
    /// observed by the cabinet, not attributable to one unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl From<&TriggerEvent> for TimelineEvent {
    fn from(ev: &TriggerEvent) -> Self {
        Self {
            timestamp: ev.timestamp,
            event: ev.event.clone(),
            arg: ev.arg.clone(),
            state_machine: ev.state_machine.clone(),
            trigger: ev.trigger.clone(),
            state: ev.state.clone(),
            device_id: ev.device_id.clone(),
        }
    }
}

/// Assembled per-order timeline. Derived, read-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelId>,
    /// Ascending by timestamp; equal timestamps keep fetch order.
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Empty timeline for an anchor id with no recorded events. Not an
    /// error: the id may simply predate retention or never have existed.
    pub fn empty(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            token: None,
            channel: None,
            events: Vec::new(),
        }
    }
}
