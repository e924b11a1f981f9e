// ── Channel identity ──

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Two-digit zero-padded cabin channel label (`"07"`).
///
/// Firmware is inconsistent about channel representation: `arg.chid`
/// carries numbers, `arg.cabin_status` keys carry padded strings. This
/// newtype normalizes both to the padded form so lookups line up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalize a raw JSON value (number or numeric string) into a
    /// padded channel id. Returns `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(Self::from),
            Value::String(s) => {
                let n: u64 = s.parse().ok()?;
                Some(Self::from(n))
            }
            _ => None,
        }
    }
}

impl From<u64> for ChannelId {
    fn from(n: u64) -> Self {
        Self(format!("{n:02}"))
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
