//! Thread-safe wrapper for concurrent catalog access.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! geofacility = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use geofacility::{Facility, Point, SyncCatalog};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = SyncCatalog::new();
//!
//! let writer = catalog.clone();
//! let handle = thread::spawn(move || {
//!     writer
//!         .add_facility(Facility::new("Metro", "789 Metro Blvd", 40.73, -73.93, 4.2, ""))
//!         .unwrap();
//! });
//! handle.join().unwrap();
//!
//! let near = catalog.find_within_range(&Point::new(-73.93, 40.73), 1.0)?;
//! assert_eq!(near.len(), 1);
//! # Ok(())
//! # }
//! ```

use super::FacilityCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::spatial_index::IndexStats;
use geo::Point;
use geofacility_types::{Facility, FacilityId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle to a [`FacilityCatalog`] behind `Arc<RwLock<_>>`.
///
/// Every query appends to the query log, so queries take the write lock.
/// Only pure reads (`len`, `get`, `history`, `stats`) share the read lock.
#[derive(Debug, Clone, Default)]
pub struct SyncCatalog {
    inner: Arc<RwLock<FacilityCatalog>>,
}

impl SyncCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from(FacilityCatalog::with_config(config)?))
    }

    // ===== Mutation =====

    pub fn add_facility(&self, facility: Facility) -> Result<Arc<Facility>> {
        self.inner.write().add_facility(facility)
    }

    pub fn remove_facility(&self, id: &FacilityId) -> Option<Arc<Facility>> {
        self.inner.write().remove_facility(id)
    }

    pub fn delete_by_name(&self, name: &str) -> Option<Arc<Facility>> {
        self.inner.write().delete_by_name(name)
    }

    // ===== Queries =====

    pub fn find_by_name(&self, prefix: &str) -> Vec<Arc<Facility>> {
        self.inner.write().find_by_name(prefix)
    }

    pub fn find_by_address(&self, prefix: &str) -> Vec<Arc<Facility>> {
        self.inner.write().find_by_address(prefix)
    }

    pub fn find_by_city(&self, city: &str) -> Vec<Arc<Facility>> {
        self.inner.write().find_by_city(city)
    }

    pub fn find_nearest(&self, location: &Point, max_results: usize) -> Result<Vec<Arc<Facility>>> {
        self.inner.write().find_nearest(location, max_results)
    }

    pub fn find_within_range(&self, location: &Point, range_km: f64) -> Result<Vec<Arc<Facility>>> {
        self.inner.write().find_within_range(location, range_km)
    }

    pub fn best_within_range(&self, location: &Point, range_km: f64) -> Result<Vec<Arc<Facility>>> {
        self.inner.write().best_within_range(location, range_km)
    }

    // ===== Reads =====

    pub fn get(&self, id: &FacilityId) -> Option<Arc<Facility>> {
        self.inner.read().get(id).cloned()
    }

    /// Snapshot of every facility in insertion order.
    pub fn facilities(&self) -> Vec<Arc<Facility>> {
        self.inner.read().facilities().to_vec()
    }

    /// Query log, most recent first.
    pub fn history(&self) -> Vec<String> {
        self.inner
            .read()
            .history()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn clear_history(&self) {
        self.inner.write().clear_history();
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().index().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` with shared access to the underlying catalog.
    pub fn read<R>(&self, f: impl FnOnce(&FacilityCatalog) -> R) -> R {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Run `f` with exclusive access to the underlying catalog.
    pub fn write<R>(&self, f: impl FnOnce(&mut FacilityCatalog) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }
}

impl From<FacilityCatalog> for SyncCatalog {
    fn from(catalog: FacilityCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }
}
