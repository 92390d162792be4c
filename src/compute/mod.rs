//! Pure geographic computations used by the spatial index and the catalog.
//!
//! Nothing in here owns state. Validation is kept separate from the raw
//! distance so the index can validate a record once on insert and then run
//! the unchecked formula in its inner loops.

pub mod distance;
pub mod validation;

pub use distance::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use validation::{
    validate_geographic_point, validate_points, validate_range_km, validate_rating,
};
