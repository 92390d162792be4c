//! Geo-tagged facility catalog with a bounding-box spatial index.
//!
//! ```rust
//! use geofacility::{Facility, FacilityCatalog, Point};
//!
//! let mut catalog = FacilityCatalog::new();
//! catalog.add_facility(Facility::new("Metro", "789 Metro Blvd, New York, NY", 40.730610, -73.935242, 4.2, "555-6789"))?;
//!
//! let here = Point::new(-73.935242, 40.730610);
//! let nearby = catalog.find_within_range(&here, 1.0)?;
//! assert_eq!(nearby[0].name, "Metro");
//! # Ok::<(), geofacility::FacilityError>(())
//! ```

pub mod builder;
pub mod catalog;
pub mod compute;
pub mod config;
pub mod error;
pub mod spatial_index;

pub use builder::CatalogBuilder;
pub use catalog::{FacilityCatalog, PrefixIndex, QueryLog, RatingSelector};
pub use config::Config;
pub use error::{FacilityError, Result};
pub use spatial_index::{IndexStats, SpatialIndex};

#[cfg(feature = "sync")]
pub use catalog::SyncCatalog;

pub use compute::{EARTH_RADIUS_KM, distance_km, haversine_km};

pub use geo::{Point, Rect};

pub use geofacility_types::{BoundingBox2D, Facility, FacilityId};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CatalogBuilder, Config, FacilityCatalog, FacilityError, Result};

    pub use crate::{Facility, FacilityId, SpatialIndex};

    pub use crate::{distance_km, haversine_km};

    pub use geo::{Point, Rect};

    #[cfg(feature = "sync")]
    pub use crate::SyncCatalog;
}
