// ── Typed query builders ──
//
// The correlation engine never writes ad-hoc filter documents; it builds
// one of these and hands it to the store. The filter surface is exactly
// what the engine needs: membership on device/event names, equality and
// existence on nested arg fields, inclusive timestamp ranges, sort
// direction, result limit.

use serde_json::Value;

use crate::event::{TransitionEvent, TriggerEvent};

/// Sort direction for the `timestamp` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Query over the trigger stream.
///
/// Empty `devices`/`events` vectors mean "no filter on that field";
/// non-empty means any-of membership.
#[derive(Debug, Clone, Default)]
pub struct TriggerQuery {
    pub devices: Vec<String>,
    pub events: Vec<String>,
    /// Exact match on `arg.oid`.
    pub order_id: Option<String>,
    /// Require `arg.oid` to exist and be a string.
    pub require_order_id: bool,
    /// Exact match on `arg.token`.
    pub token: Option<String>,
    /// Containment in the `arg.chid` array.
    pub channel: Option<u64>,
    /// Inclusive lower timestamp bound.
    pub from: Option<i64>,
    /// Inclusive upper timestamp bound.
    pub to: Option<i64>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl TriggerQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(mut self, device_id: impl Into<String>) -> Self {
        self.devices.push(device_id.into());
        self
    }

    pub fn devices<I, S>(mut self, device_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.devices.extend(device_ids.into_iter().map(Into::into));
        self
    }

    pub fn event(mut self, event: impl Into<String>) -> Self {
        self.events.push(event.into());
        self
    }

    pub fn events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events.extend(events.into_iter().map(Into::into));
        self
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn require_order_id(mut self) -> Self {
        self.require_order_id = true;
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn channel(mut self, channel: u64) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn since(mut self, timestamp: i64) -> Self {
        self.from = Some(timestamp);
        self
    }

    pub fn until(mut self, timestamp: i64) -> Self {
        self.to = Some(timestamp);
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether one record satisfies every filter in this query. Backing
    /// stores that can push filters down (an indexed database) need not
    /// call this; [`MemoryStore`](crate::MemoryStore) evaluates it per
    /// record.
    pub fn matches(&self, ev: &TriggerEvent) -> bool {
        if !self.devices.is_empty() {
            match &ev.device_id {
                Some(id) if self.devices.iter().any(|d| d == id) => {}
                _ => return false,
            }
        }
        if !self.events.is_empty() && !self.events.iter().any(|e| *e == ev.event) {
            return false;
        }
        if self.require_order_id && !matches!(ev.arg.get("oid"), Some(Value::String(_))) {
            return false;
        }
        if let Some(oid) = &self.order_id {
            match ev.arg.get("oid") {
                Some(Value::String(s)) if s == oid => {}
                _ => return false,
            }
        }
        if let Some(token) = &self.token {
            match ev.arg.get("token") {
                Some(Value::String(s)) if s == token => {}
                _ => return false,
            }
        }
        if let Some(channel) = self.channel {
            match ev.arg.get("chid") {
                Some(Value::Array(items))
                    if items.iter().any(|v| v.as_u64() == Some(channel)) => {}
                _ => return false,
            }
        }
        in_range(ev.timestamp, self.from, self.to)
    }
}

/// Query over the transition stream.
#[derive(Debug, Clone, Default)]
pub struct TransitionQuery {
    pub devices: Vec<String>,
    /// Exact match on the transition name.
    pub transition: Option<String>,
    /// Require `arg.cabin_status` to exist.
    pub require_cabin_status: bool,
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl TransitionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices<I, S>(mut self, device_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.devices.extend(device_ids.into_iter().map(Into::into));
        self
    }

    pub fn transition(mut self, transition: impl Into<String>) -> Self {
        self.transition = Some(transition.into());
        self
    }

    pub fn require_cabin_status(mut self) -> Self {
        self.require_cabin_status = true;
        self
    }

    pub fn since(mut self, timestamp: i64) -> Self {
        self.from = Some(timestamp);
        self
    }

    pub fn until(mut self, timestamp: i64) -> Self {
        self.to = Some(timestamp);
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, ev: &TransitionEvent) -> bool {
        if !self.devices.is_empty() {
            match &ev.device_id {
                Some(id) if self.devices.iter().any(|d| d == id) => {}
                _ => return false,
            }
        }
        if let Some(t) = &self.transition {
            if *t != ev.transition {
                return false;
            }
        }
        if self.require_cabin_status && !ev.arg.contains_key("cabin_status") {
            return false;
        }
        in_range(ev.timestamp, self.from, self.to)
    }
}

fn in_range(timestamp: i64, from: Option<i64>, to: Option<i64>) -> bool {
    if let Some(from) = from {
        if timestamp < from {
            return false;
        }
    }
    if let Some(to) = to {
        if timestamp > to {
            return false;
        }
    }
    true
}
