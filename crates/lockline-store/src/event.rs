// ── Stream records ──
//
// Field names on the wire are the firmware's short forms (`e`, `sm`,
// `st`, `fst`, `tst`); serde renames keep the Rust side readable while
// round-tripping documents unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open payload attached to every record. Firmware writes free-form JSON
/// here (`oid`, `token`, `chid`, `cabin_status`, ...); nothing about its
/// shape is guaranteed, so consumers go through extraction helpers that
/// surface absence explicitly.
pub type Arg = serde_json::Map<String, Value>;

/// A raw input event fed to an on-device state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Microseconds, monotonic per device, assigned by firmware.
    pub timestamp: i64,
    /// Event name, `"<machine>/<input>"` (e.g. `"store/store_ok"`).
    #[serde(rename = "e")]
    pub event: String,
    /// Name of the state machine that received the input.
    #[serde(rename = "sm")]
    pub state_machine: String,
    /// Trigger name within the machine.
    pub trigger: String,
    /// Machine state at the time the input arrived, when the firmware
    /// recorded it.
    #[serde(rename = "st", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Evaluability flag: whether the machine considered the input at all.
    #[serde(rename = "can", default, skip_serializing_if = "Option::is_none")]
    pub evaluable: Option<i64>,
    #[serde(rename = "deviceId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub arg: Arg,
}

/// An accepted state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// Microseconds, monotonic per device, assigned by firmware.
    pub timestamp: i64,
    #[serde(rename = "e")]
    pub event: String,
    #[serde(rename = "sm")]
    pub state_machine: String,
    /// Named transition. `"before_hint"` marks the canonical half of a
    /// paired before/after status-delta record; the `"after"` half is a
    /// duplicate for decoding purposes.
    pub transition: String,
    #[serde(rename = "fst", default, skip_serializing_if = "Option::is_none")]
    pub from_state: Option<String>,
    #[serde(rename = "tst", default, skip_serializing_if = "Option::is_none")]
    pub to_state: Option<String>,
    #[serde(rename = "deviceId", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default)]
    pub arg: Arg,
}
