//! Read-only access layer for the two append-only telemetry streams
//! written by locker firmware.
//!
//! Locker devices emit two parallel streams: **triggers** (raw inputs fed
//! to the on-device state machines, with an evaluability flag) and
//! **transitions** (accepted state changes). Records are immutable once
//! written; this crate exposes reads only.
//!
//! - **[`TriggerEvent`] / [`TransitionEvent`]** — the wire records, with an
//!   open [`Arg`] payload (firmware attaches free-form JSON).
//! - **[`TriggerQuery`] / [`TransitionQuery`]** — typed query builders
//!   covering the filter surface the correlation engine needs: device and
//!   event-name membership, nested-arg equality/existence, timestamp
//!   ranges, sort direction, result limits.
//! - **[`EventStore`]** — the async trait a backing store implements.
//! - **[`MemoryStore`]** — reference in-memory implementation, used by the
//!   engine's test suites and by embedders that buffer events locally.

pub mod event;
pub mod memory;
pub mod query;
pub mod store;

pub use event::{Arg, TransitionEvent, TriggerEvent};
pub use memory::MemoryStore;
pub use query::{SortOrder, TransitionQuery, TriggerQuery};
pub use store::{EventStore, StoreError};
