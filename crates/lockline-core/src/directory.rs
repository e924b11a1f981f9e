// ── Device directory collaborator ──
//
// Maps a device id to the site it serves and its role there. The engine
// only reads through [`DeviceDirectory`]; the concrete [`SiteDirectory`]
// cache is owned and refreshed by whoever loads site records from the
// backing store, wholesale, never edited in place.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

/// Which unit of a site a device is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceRole {
    /// Inbound unit: accepts and stores orders.
    Storer,
    /// Outbound unit: authenticates pickups and dispenses.
    Retriever,
}

/// Resolution result for one device id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBinding {
    pub site_id: String,
    pub role: DeviceRole,
}

/// The device ids bound to one site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteDevices {
    pub storer: Option<String>,
    pub retriever: Option<String>,
}

/// One site row as loaded from the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub site_id: String,
    pub storer_device_id: Option<String>,
    pub retriever_device_id: Option<String>,
}

/// Read access to the site/device mapping.
///
/// Both lookups are pure; a miss means "not bound", never an error --
/// devices can legitimately be unprovisioned or mid-migration.
pub trait DeviceDirectory: Send + Sync {
    fn resolve_site(&self, device_id: &str) -> Option<SiteBinding>;

    fn site_devices(&self, site_id: &str) -> Option<SiteDevices>;
}

/// Lock-free site/device cache, replaced wholesale on refresh.
///
/// Readers load the current map through an `ArcSwap`; `replace_all`
/// swaps in a freshly built map so in-flight requests keep a consistent
/// snapshot.
#[derive(Debug, Default)]
pub struct SiteDirectory {
    sites: ArcSwap<HashMap<String, SiteDevices>>,
}

impl SiteDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SiteRecord>) -> Self {
        let directory = Self::new();
        directory.replace_all(records);
        directory
    }

    /// Replace the whole mapping with freshly loaded records.
    pub fn replace_all(&self, records: Vec<SiteRecord>) {
        let map: HashMap<String, SiteDevices> = records
            .into_iter()
            .map(|r| {
                (
                    r.site_id,
                    SiteDevices {
                        storer: r.storer_device_id,
                        retriever: r.retriever_device_id,
                    },
                )
            })
            .collect();
        info!(sites = map.len(), "site directory refreshed");
        self.sites.store(Arc::new(map));
    }

    pub fn len(&self) -> usize {
        self.sites.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.load().is_empty()
    }
}

impl DeviceDirectory for SiteDirectory {
    fn resolve_site(&self, device_id: &str) -> Option<SiteBinding> {
        let sites = self.sites.load();
        for (site_id, devices) in sites.iter() {
            if devices.storer.as_deref() == Some(device_id) {
                return Some(SiteBinding {
                    site_id: site_id.clone(),
                    role: DeviceRole::Storer,
                });
            }
            if devices.retriever.as_deref() == Some(device_id) {
                return Some(SiteBinding {
                    site_id: site_id.clone(),
                    role: DeviceRole::Retriever,
                });
            }
        }
        None
    }

    fn site_devices(&self, site_id: &str) -> Option<SiteDevices> {
        self.sites.load().get(site_id).cloned()
    }
}
