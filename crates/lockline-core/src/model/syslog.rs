// ── System-log view types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::channel::ChannelId;
use crate::directory::DeviceRole;

/// Severity of a classified log line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Success,
}

/// One classified, leveled log line. Derived, read-only, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemLogEntry {
    pub timestamp: i64,
    pub level: LogLevel,
    /// Event kind label (`"channel fault"`, `"boot complete"`, ...).
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// Resolved through the device directory; `None` when the device is
    /// not bound to any site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_role: Option<DeviceRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<ChannelId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_string_forms_are_lowercase() {
        assert_eq!(LogLevel::Error.to_string(), "error");
        assert_eq!(LogLevel::Success.to_string(), "success");
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warn));
    }
}
