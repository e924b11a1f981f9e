// ── Arg extraction helpers ──
//
// Telemetry payloads from field devices are not guaranteed complete.
// Every helper returns `Option`; callers skip the dependent derivation
// when a field is absent instead of failing the whole request.

use lockline_store::Arg;
use serde_json::Value;

use super::channel::ChannelId;

/// `arg.oid` — the anchor order id.
pub fn order_id(arg: &Arg) -> Option<&str> {
    arg.get("oid").and_then(Value::as_str)
}

/// `arg.token` — pickup token issued at storage time.
pub fn token(arg: &Arg) -> Option<&str> {
    arg.get("token").and_then(Value::as_str)
}

/// First element of `arg.chid`, normalized to a padded channel id.
pub fn channel(arg: &Arg) -> Option<ChannelId> {
    arg.get("chid")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(ChannelId::from_value)
}

/// The `[old, new]` status pair for one channel inside
/// `arg.cabin_status`, if that channel has an entry.
pub fn cabin_status_pair(arg: &Arg, channel: &ChannelId) -> Option<(u32, u32)> {
    let entry = arg
        .get("cabin_status")
        .and_then(Value::as_object)?
        .get(channel.as_str())?;
    status_pair(entry)
}

/// All `(channel, (old, new))` entries of `arg.cabin_status`, skipping
/// malformed values. Order follows the payload map.
pub fn cabin_status_entries(arg: &Arg) -> Vec<(ChannelId, (u32, u32))> {
    let Some(map) = arg.get("cabin_status").and_then(Value::as_object) else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| {
            let channel = ChannelId::from_value(&Value::String(key.clone()))?;
            Some((channel, status_pair(value)?))
        })
        .collect()
}

fn status_pair(value: &Value) -> Option<(u32, u32)> {
    let items = value.as_array()?;
    match items.as_slice() {
        [old, new] => Some((
            u32::try_from(old.as_u64()?).ok()?,
            u32::try_from(new.as_u64()?).ok()?,
        )),
        _ => None,
    }
}
