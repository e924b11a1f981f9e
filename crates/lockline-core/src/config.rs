// ── Engine tuning ──
//
// Window sizes and scan ceilings carried by the engine. Callers construct
// one (or take the defaults, which match the deployed firmware timing)
// and hand it in; the engine never reads config files.

/// Microseconds per second; stream timestamps are firmware microseconds.
pub const MICROS_PER_SEC: i64 = 1_000_000;

/// Tuning values for timeline assembly and system-log classification.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Lookback from the storage confirmation for reader scans (µs).
    pub store_scan_lookback: i64,
    /// Lookback from dispense-ready for reader scans and auth events (µs).
    pub dispense_auth_lookback: i64,
    /// Margin around the order's active span for cabin-status decoding (µs).
    pub cabin_window_margin: i64,
    /// Fetch ceiling for the fault-edge scan.
    pub fault_scan_limit: usize,
    /// Fetch ceiling for each of the other four log scans.
    pub log_scan_limit: usize,
    /// System-log entry limit when the caller does not pass one.
    pub default_log_limit: usize,
    /// Order-summary listing limit when the caller does not pass one.
    pub default_order_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_scan_lookback: 10 * MICROS_PER_SEC,
            dispense_auth_lookback: 5 * MICROS_PER_SEC,
            cabin_window_margin: 30 * MICROS_PER_SEC,
            fault_scan_limit: 500,
            log_scan_limit: 50,
            default_log_limit: 200,
            default_order_limit: 100,
        }
    }
}
