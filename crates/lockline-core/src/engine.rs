// ── Engine facade ──
//
// Ties the injected collaborators (event store, device directory) and
// the tuning config together behind the three derived-view operations.
// The engine holds no per-request state: every method is `&self`,
// read-only, and independent of every other call.

use lockline_store::EventStore;

use crate::config::EngineConfig;
use crate::directory::DeviceDirectory;
use crate::error::EngineError;
use crate::model::{SystemLogEntry, Timeline};
use crate::orders::{OrderQuery, OrderSummary};
use crate::syslog::LogQuery;
use crate::{orders, syslog, timeline};

/// Correlation engine over one event store and one device directory.
#[derive(Debug)]
pub struct Engine<S, D> {
    store: S,
    directory: D,
    config: EngineConfig,
}

impl<S: EventStore, D: DeviceDirectory> Engine<S, D> {
    pub fn new(store: S, directory: D) -> Self {
        Self::with_config(store, directory, EngineConfig::default())
    }

    pub fn with_config(store: S, directory: D, config: EngineConfig) -> Self {
        Self {
            store,
            directory,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Reconstruct the causally-ordered timeline for one order id.
    /// Unknown ids yield an empty timeline, not an error.
    pub async fn assemble_timeline(&self, order_id: &str) -> Result<Timeline, EngineError> {
        timeline::assemble(&self.store, &self.config, order_id).await
    }

    /// Build the rolling system log for a reporting window, newest
    /// first, truncated to the query's limit (engine default otherwise).
    pub async fn system_log(&self, query: &LogQuery) -> Result<Vec<SystemLogEntry>, EngineError> {
        syslog::build(&self.store, &self.directory, &self.config, query).await
    }

    /// List recent orders with their completion state.
    pub async fn order_summaries(
        &self,
        query: &OrderQuery,
    ) -> Result<Vec<OrderSummary>, EngineError> {
        orders::list(&self.store, &self.directory, &self.config, query).await
    }
}
