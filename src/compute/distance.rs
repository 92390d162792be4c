//! Great-circle distance on a spherical earth.

use crate::compute::validation::validate_geographic_point;
use crate::error::Result;
use geo::{Distance, HaversineMeasure, Point};

/// Mean earth radius used by every distance in this crate, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers without coordinate validation.
///
/// NaN or out-of-range input yields a meaningless (possibly NaN) result.
/// Callers must have validated both points already.
#[inline]
pub fn haversine_km(a: &Point, b: &Point) -> f64 {
    HaversineMeasure::new(EARTH_RADIUS_KM).distance(*a, *b)
}

/// Haversine distance in kilometers between two validated points.
///
/// # Errors
///
/// Returns `InvalidCoordinate` if either point is non-finite or out of range.
///
/// # Examples
///
/// ```rust
/// use geofacility::compute::distance_km;
/// use geo::Point;
///
/// let st_peters = Point::new(-73.9352, 40.7306);
/// let general = Point::new(-73.9855, 40.7580);
///
/// let km = distance_km(&st_peters, &general)?;
/// assert!((km - 5.3).abs() < 0.2);
/// # Ok::<(), geofacility::FacilityError>(())
/// ```
pub fn distance_km(a: &Point, b: &Point) -> Result<f64> {
    validate_geographic_point(a)?;
    validate_geographic_point(b)?;
    Ok(haversine_km(a, b))
}
