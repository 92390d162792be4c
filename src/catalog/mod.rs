//! Facility catalog: the owner of record for every facility.
//!
//! Mutations fan out to the spatial index and to the name/address prefix
//! dictionaries; every query appends a line to the query log.

pub mod history;
pub mod prefix;
pub mod rating;

#[cfg(feature = "sync")]
pub mod sync;

pub use history::QueryLog;
pub use prefix::PrefixIndex;
pub use rating::RatingSelector;

#[cfg(feature = "sync")]
pub use sync::SyncCatalog;

use crate::compute::{validate_points, validate_rating};
use crate::config::Config;
use crate::error::Result;
use crate::spatial_index::SpatialIndex;
use geo::Point;
use geofacility_types::{Facility, FacilityId};
use std::sync::Arc;

fn describe(location: &Point) -> String {
    format!("({}, {})", location.y(), location.x())
}

fn join_names(facilities: &[Arc<Facility>]) -> String {
    facilities
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Catalog of facilities with spatial and textual lookup.
///
/// # Examples
///
/// ```rust
/// use geofacility::{Facility, FacilityCatalog, Point};
///
/// let mut catalog = FacilityCatalog::new();
/// catalog.add_facility(Facility::new("City Hospital", "123 Main St, New York, NY", 40.73061, -73.935242, 4.7, "555-1234"))?;
/// catalog.add_facility(Facility::new("General Hospital", "101 General St, New York, NY", 40.7580, -73.9855, 4.1, "555-0011"))?;
///
/// let near = catalog.find_within_range(&Point::new(-73.935242, 40.73061), 1.0)?;
/// assert_eq!(near.len(), 1);
/// assert_eq!(catalog.find_by_name("gen").len(), 1);
/// assert_eq!(catalog.history().len(), 2);
/// # Ok::<(), geofacility::FacilityError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FacilityCatalog {
    config: Config,
    index: SpatialIndex,
    by_name: PrefixIndex,
    by_address: PrefixIndex,
    facilities: Vec<Arc<Facility>>,
    history: QueryLog,
}

impl FacilityCatalog {
    /// Empty catalog with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(Config::default(), SpatialIndex::new())
    }

    /// Empty catalog with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        let index = SpatialIndex::with_config(&config)?;
        Ok(Self::from_parts(config, index))
    }

    fn from_parts(config: Config, index: SpatialIndex) -> Self {
        Self {
            history: QueryLog::with_capacity(config.history_capacity),
            config,
            index,
            by_name: PrefixIndex::new(),
            by_address: PrefixIndex::new(),
            facilities: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read access to the spatial index (statistics, invariant checks).
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    // ===== Mutation =====

    /// Add a facility to the catalog, the spatial index and both prefix
    /// dictionaries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` for an out-of-range location and
    /// `InvalidInput` for a NaN or infinite rating; nothing is added in
    /// either case.
    pub fn add_facility(&mut self, facility: Facility) -> Result<Arc<Facility>> {
        validate_rating(facility.rating)?;
        let facility = Arc::new(facility);
        self.index.insert_facility(Arc::clone(&facility))?;
        self.by_name.insert(&facility.name, Arc::clone(&facility));
        self.by_address
            .insert(&facility.address, Arc::clone(&facility));
        self.facilities.push(Arc::clone(&facility));

        log::info!("added facility '{}' ({})", facility.name, facility.id);
        Ok(facility)
    }

    /// Add several facilities. Returns the number added.
    ///
    /// The whole batch is validated before anything is inserted, so one bad
    /// record leaves the catalog untouched.
    pub fn add_facilities<I>(&mut self, facilities: I) -> Result<usize>
    where
        I: IntoIterator<Item = Facility>,
    {
        let batch: Vec<Facility> = facilities.into_iter().collect();
        let locations: Vec<Point> = batch.iter().map(Facility::location).collect();
        validate_points(&locations)?;
        for facility in &batch {
            validate_rating(facility.rating)?;
        }

        let added = batch.len();
        for facility in batch {
            self.add_facility(facility)?;
        }
        Ok(added)
    }

    /// Parse a JSON array of facility records and add them all, or none of
    /// them if any record is invalid.
    pub fn load_json(&mut self, json: &str) -> Result<usize> {
        let records: Vec<Facility> = serde_json::from_str(json)?;
        self.add_facilities(records)
    }

    /// Remove the facility with `id` from every structure.
    pub fn remove_facility(&mut self, id: &FacilityId) -> Option<Arc<Facility>> {
        let pos = self.facilities.iter().position(|f| f.id == *id)?;
        let facility = self.facilities.remove(pos);

        if !self.index.delete_facility(&facility) {
            log::warn!(
                "facility '{}' ({}) was missing from the spatial index",
                facility.name,
                facility.id
            );
        }
        self.by_name.delete(&facility.name, id);
        self.by_address.delete(&facility.address, id);

        log::info!("removed facility '{}' ({})", facility.name, facility.id);
        Some(facility)
    }

    /// Remove the first facility whose name is exactly `name`.
    pub fn delete_by_name(&mut self, name: &str) -> Option<Arc<Facility>> {
        let Some(id) = self
            .facilities
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.id)
        else {
            log::info!("no facility named '{}' to delete", name);
            return None;
        };

        let removed = self.remove_facility(&id)?;
        self.history.push(format!("Deleted facility: {}", name));
        Some(removed)
    }

    // ===== Textual queries =====

    /// Facilities whose name starts with `prefix` (case-insensitive).
    pub fn find_by_name(&mut self, prefix: &str) -> Vec<Arc<Facility>> {
        let found = self.sorted_by_catalog_order(self.by_name.search(prefix));
        self.history.push(format!(
            "Search by name '{}': {} result(s)",
            prefix,
            found.len()
        ));
        found
    }

    /// Facilities whose address starts with `prefix` (case-insensitive).
    pub fn find_by_address(&mut self, prefix: &str) -> Vec<Arc<Facility>> {
        let found = self.sorted_by_catalog_order(self.by_address.search(prefix));
        self.history.push(format!(
            "Search by address '{}': {} result(s)",
            prefix,
            found.len()
        ));
        found
    }

    /// Facilities whose address mentions `city` anywhere (case-insensitive),
    /// best rated first.
    pub fn find_by_city(&mut self, city: &str) -> Vec<Arc<Facility>> {
        let needle = city.to_lowercase();
        let mut found: Vec<Arc<Facility>> = self
            .facilities
            .iter()
            .filter(|f| f.address.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        if found.is_empty() {
            self.history
                .push(format!("Searched facilities in {}: none found", city));
        } else {
            self.history.push(format!(
                "Searched facilities in {}: {}",
                city,
                join_names(&found)
            ));
        }
        found
    }

    // ===== Spatial queries =====

    /// The `max_results` facilities nearest to `location`.
    pub fn find_nearest(
        &mut self,
        location: &Point,
        max_results: usize,
    ) -> Result<Vec<Arc<Facility>>> {
        let found = self.index.search_nearest(location, max_results, None)?;
        self.history.push(format!(
            "Nearest facilities search at {}, results: {}",
            describe(location),
            max_results
        ));
        Ok(found)
    }

    /// Every facility within `range_km` of `location`, nearest first.
    pub fn find_within_range(
        &mut self,
        location: &Point,
        range_km: f64,
    ) -> Result<Vec<Arc<Facility>>> {
        let found = self
            .index
            .search_nearest(location, usize::MAX, Some(range_km))?;
        self.history.push(format!(
            "Facilities within {} km of {}: {} found",
            range_km,
            describe(location),
            found.len()
        ));
        Ok(found)
    }

    /// The facilities sharing the highest rating among those within
    /// `range_km` of `location`, nearest first. Empty when nothing is in
    /// range.
    pub fn best_within_range(
        &mut self,
        location: &Point,
        range_km: f64,
    ) -> Result<Vec<Arc<Facility>>> {
        let in_range = self
            .index
            .search_nearest(location, usize::MAX, Some(range_km))?;

        let best = in_range.into_iter().collect::<RatingSelector>().top_ties();
        match best.first() {
            Some(top) => self.history.push(format!(
                "Best facility within {} km of {}: {}",
                range_km,
                describe(location),
                top.name
            )),
            None => self.history.push(format!(
                "Best facility within {} km of {}: none found",
                range_km,
                describe(location)
            )),
        }
        Ok(best)
    }

    // ===== Query log =====

    /// Logged queries, most recent first.
    pub fn history(&self) -> Vec<&str> {
        self.history.view()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.history.last()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ===== Records =====

    /// All facilities in the order they were added.
    pub fn facilities(&self) -> &[Arc<Facility>] {
        &self.facilities
    }

    pub fn get(&self, id: &FacilityId) -> Option<&Arc<Facility>> {
        self.facilities.iter().find(|f| f.id == *id)
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Trie results come back in key order; present them in the order the
    /// facilities were added instead.
    fn sorted_by_catalog_order(&self, mut found: Vec<Arc<Facility>>) -> Vec<Arc<Facility>> {
        found.sort_by_key(|f| {
            self.facilities
                .iter()
                .position(|g| g.id == f.id)
                .unwrap_or(usize::MAX)
        });
        found
    }
}

impl Default for FacilityCatalog {
    fn default() -> Self {
        Self::new()
    }
}
