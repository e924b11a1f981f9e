// ── Cabin status bit-flag decoder ──
//
// Each cabin channel reports its sensor state as a fixed-width bitmask.
// `before_hint` transitions carry `[old, new]` pairs per channel; this
// module turns such a pair into discrete named changes plus a joined
// summary. Pure: no I/O, no clock, no policy baked in -- the suppression
// set differs between call sites and is passed per call.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel summary for a delta that is empty after suppression.
/// Consumers drop the record; this is not display text.
pub const NO_CHANGE: &str = "no change";

/// Named bits of the cabin status word. Bits 4-6 are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CabinFlag {
    /// Bit 0.
    FrontDoorOpen,
    /// Bit 1.
    BackDoorOpen,
    /// Bit 2: the time-of-flight sensor sees no object.
    SensorEmpty,
    /// Bit 3.
    UvLightOn,
    /// Bit 7.
    Fault,
}

impl CabinFlag {
    /// Flag-table order; summaries join in this order.
    pub const ALL: [Self; 5] = [
        Self::FrontDoorOpen,
        Self::BackDoorOpen,
        Self::SensorEmpty,
        Self::UvLightOn,
        Self::Fault,
    ];

    pub fn mask(self) -> u32 {
        match self {
            Self::FrontDoorOpen => 1,
            Self::BackDoorOpen => 1 << 1,
            Self::SensorEmpty => 1 << 2,
            Self::UvLightOn => 1 << 3,
            Self::Fault => 1 << 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::FrontDoorOpen => "front door open",
            Self::BackDoorOpen => "back door open",
            Self::SensorEmpty => "sensor empty",
            Self::UvLightOn => "uv light on",
            Self::Fault => "fault",
        }
    }

    /// Flag-specific phrasing where generic on/off reads poorly.
    fn custom_text(self, set: bool) -> Option<&'static str> {
        match (self, set) {
            (Self::FrontDoorOpen, true) => Some("front door opened"),
            (Self::FrontDoorOpen, false) => Some("front door closed"),
            (Self::SensorEmpty, true) => Some("object not detected"),
            (Self::SensorEmpty, false) => Some("object detected"),
            (Self::UvLightOn, true) => Some("uv light on"),
            (Self::UvLightOn, false) => Some("uv light off"),
            _ => None,
        }
    }

    fn describe(self, set: bool) -> Cow<'static, str> {
        if let Some(text) = self.custom_text(set) {
            Cow::Borrowed(text)
        } else if set {
            Cow::Borrowed(self.name())
        } else {
            Cow::Owned(format!("not {}", self.name()))
        }
    }
}

impl fmt::Display for CabinFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags excluded from decoded output at one call site.
///
/// The timeline view hides the back door and the fault bit (staff-side
/// and maintenance noise); other reporting contexts hide nothing. The
/// two sets are deliberately separate constructors, not one global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuppressionPolicy {
    mask: u32,
}

impl SuppressionPolicy {
    /// Report every flag.
    pub fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn hide(flags: &[CabinFlag]) -> Self {
        Self {
            mask: flags.iter().fold(0, |m, f| m | f.mask()),
        }
    }

    /// The policy used by the timeline assembler: back door and fault
    /// hidden.
    pub fn timeline_default() -> Self {
        Self::hide(&[CabinFlag::BackDoorOpen, CabinFlag::Fault])
    }

    pub fn suppresses(self, flag: CabinFlag) -> bool {
        self.mask & flag.mask() != 0
    }
}

/// One decoded flag transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagChange {
    pub flag: CabinFlag,
    pub from: bool,
    pub to: bool,
    pub description: String,
}

/// Decoded difference between two status words.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDelta {
    /// Non-suppressed flags whose state differs, in flag-table order.
    pub changes: Vec<FlagChange>,
    /// Comma-joined descriptions, or [`NO_CHANGE`] when empty.
    pub summary: String,
}

impl StatusDelta {
    pub fn is_no_change(&self) -> bool {
        self.summary == NO_CHANGE
    }
}

/// Decode an `(old, new)` status pair against the flag table.
pub fn decode(old: u32, new: u32, policy: SuppressionPolicy) -> StatusDelta {
    let mut changes = Vec::new();
    for flag in CabinFlag::ALL {
        if policy.suppresses(flag) {
            continue;
        }
        let was_set = old & flag.mask() != 0;
        let is_set = new & flag.mask() != 0;
        if was_set != is_set {
            changes.push(FlagChange {
                flag,
                from: was_set,
                to: is_set,
                description: flag.describe(is_set).into_owned(),
            });
        }
    }
    let summary = if changes.is_empty() {
        NO_CHANGE.to_owned()
    } else {
        changes
            .iter()
            .map(|c| c.description.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    StatusDelta { changes, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_words_decode_to_sentinel() {
        for status in [0u32, 1, 4, 128, 255, 0xFFFF_FFFF] {
            let delta = decode(status, status, SuppressionPolicy::none());
            assert!(delta.changes.is_empty());
            assert!(delta.is_no_change());
            assert_eq!(delta.summary, NO_CHANGE);
        }
    }

    #[test]
    fn sensor_flag_uses_object_phrasing() {
        let delta = decode(0, 4, SuppressionPolicy::none());
        assert_eq!(delta.changes.len(), 1);
        assert_eq!(delta.changes[0].flag, CabinFlag::SensorEmpty);
        assert!(!delta.changes[0].from);
        assert!(delta.changes[0].to);
        assert_eq!(delta.summary, "object not detected");

        let delta = decode(4, 0, SuppressionPolicy::none());
        assert_eq!(delta.summary, "object detected");
    }

    #[test]
    fn flags_without_custom_text_fall_back_to_generic_phrasing() {
        let delta = decode(0, 2, SuppressionPolicy::none());
        assert_eq!(delta.summary, "back door open");

        let delta = decode(128, 0, SuppressionPolicy::none());
        assert_eq!(delta.summary, "not fault");
    }

    #[test]
    fn summary_joins_in_flag_table_order() {
        // Front door closes, object appears, uv turns on -- one word.
        let delta = decode(0b0001, 0b1100, SuppressionPolicy::none());
        assert_eq!(
            delta.summary,
            "front door closed, object not detected, uv light on"
        );
    }

    #[test]
    fn suppressed_flags_never_appear() {
        let policy = SuppressionPolicy::timeline_default();
        // Back door and fault both flip; only fault-exempt flags survive.
        let delta = decode(0, 2 | 128, policy);
        assert!(delta.is_no_change());

        let delta = decode(0, 2 | 4, policy);
        assert_eq!(delta.changes.len(), 1);
        assert_eq!(delta.summary, "object not detected");
    }

    #[test]
    fn fault_only_delta_suppressed_on_timeline_policy() {
        // 2 -> 130: solely the fault bit rises.
        let delta = decode(2, 130, SuppressionPolicy::timeline_default());
        assert!(delta.is_no_change());

        // The permissive policy reports it.
        let delta = decode(2, 130, SuppressionPolicy::none());
        assert_eq!(delta.summary, "fault");
    }

    #[test]
    fn policy_constructors_are_distinct() {
        assert!(SuppressionPolicy::timeline_default().suppresses(CabinFlag::Fault));
        assert!(SuppressionPolicy::timeline_default().suppresses(CabinFlag::BackDoorOpen));
        assert!(!SuppressionPolicy::timeline_default().suppresses(CabinFlag::SensorEmpty));
        for flag in CabinFlag::ALL {
            assert!(!SuppressionPolicy::none().suppresses(flag));
        }
    }
}
