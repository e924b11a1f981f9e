// ── Derived view model ──
//
// Everything in this module is read-only, per-request output: the engine
// never persists these types. Raw stream records live in `lockline-store`;
// this module holds their normalized projections plus the narrow arg
// extraction helpers the engine goes through instead of poking at JSON.

pub mod arg;
pub mod channel;
pub mod syslog;
pub mod timeline;
pub mod vocab;

pub use channel::ChannelId;
pub use syslog::{LogLevel, SystemLogEntry};
pub use timeline::{Timeline, TimelineEvent};
