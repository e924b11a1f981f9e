//! Correlation and timeline-reconstruction engine over locker telemetry.
//!
//! Locker fleets write two append-only streams (triggers and transitions,
//! see `lockline-store`). This crate turns those raw streams into two
//! derived, human-readable views:
//!
//! - **[`Engine::assemble_timeline`]** — given an order id, pulls the
//!   order's anchor events, joins satellite events (reader scans, auth
//!   confirmations) through time windows around landmark events, decodes
//!   bitwise cabin-status deltas into discrete named changes, and merges
//!   everything into one causally-ordered timeline.
//! - **[`Engine::system_log`]** — classifies raw events across five
//!   independent scans (fault edges, disposals, idle timeouts, session
//!   starts, power-ons) into leveled log lines, merged newest-first and
//!   truncated to a caller limit.
//!
//! Supporting pieces:
//!
//! - **[`cabin`]** — pure bit-flag decoder with per-call-site
//!   [`SuppressionPolicy`].
//! - **[`correlate`]** — time-window satellite queries relative to an
//!   anchor event.
//! - **[`directory`]** — the device directory collaborator: resolves a
//!   device id to a site and role through a wholesale-refreshed cache.
//! - **[`Engine::order_summaries`]** — flat per-order listing derived
//!   from storage confirmations and dispense completions.
//!
//! The engine owns no state beyond its injected collaborators; every call
//! is independent, read-only, and safe to run concurrently with others.

pub mod cabin;
pub mod config;
pub mod correlate;
pub mod directory;
pub mod engine;
pub mod error;
pub mod model;
pub mod orders;
pub mod syslog;
pub mod timeline;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cabin::{FlagChange, StatusDelta, SuppressionPolicy, NO_CHANGE};
pub use config::EngineConfig;
pub use correlate::WindowSpec;
pub use directory::{DeviceDirectory, DeviceRole, SiteBinding, SiteDirectory, SiteRecord};
pub use engine::Engine;
pub use error::EngineError;
pub use model::{ChannelId, LogLevel, SystemLogEntry, Timeline, TimelineEvent};
pub use orders::{OrderQuery, OrderSummary};
pub use syslog::LogQuery;
