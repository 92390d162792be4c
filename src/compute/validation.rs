//! Validation for geographic coordinates and query parameters.

use crate::error::{FacilityError, Result};
use geo::Point;

fn invalid(point: &Point, reason: String) -> FacilityError {
    FacilityError::InvalidCoordinate {
        latitude: point.y(),
        longitude: point.x(),
        reason,
    }
}

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geofacility::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid latitude
/// let invalid = Point::new(-74.0, 95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(invalid(point, format!("longitude must be finite, got: {}", x)));
    }

    if !y.is_finite() {
        return Err(invalid(point, format!("latitude must be finite, got: {}", y)));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(invalid(
            point,
            format!("longitude out of range [-180.0, 180.0]: {}", x),
        ));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(invalid(
            point,
            format!("latitude out of range [-90.0, 90.0]: {}", y),
        ));
    }

    Ok(())
}

/// Validates multiple points, reporting the index of the first bad one.
pub fn validate_points(points: &[Point]) -> Result<()> {
    for (idx, point) in points.iter().enumerate() {
        validate_geographic_point(point).map_err(|e| match e {
            FacilityError::InvalidCoordinate {
                latitude,
                longitude,
                reason,
            } => FacilityError::InvalidCoordinate {
                latitude,
                longitude,
                reason: format!("point at index {}: {}", idx, reason),
            },
            other => other,
        })?;
    }
    Ok(())
}

/// Validates a facility rating: any finite number.
pub fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() {
        return Err(FacilityError::InvalidInput(format!(
            "rating must be a finite number, got: {}",
            rating
        )));
    }
    Ok(())
}

/// Validates a search radius in kilometers: finite and not negative.
pub fn validate_range_km(range_km: f64) -> Result<()> {
    if !range_km.is_finite() || range_km < 0.0 {
        return Err(FacilityError::InvalidInput(format!(
            "distance range must be a finite, non-negative number of kilometers, got: {}",
            range_km
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        let nyc = Point::new(-74.0060, 40.7128);
        assert!(validate_geographic_point(&nyc).is_ok());

        let tokyo = Point::new(139.6917, 35.6895);
        assert!(validate_geographic_point(&tokyo).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-200.0, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, 90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -95.0)).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        let err = validate_geographic_point(&Point::new(f64::NAN, 40.0)).unwrap_err();
        assert!(matches!(err, FacilityError::InvalidCoordinate { latitude, .. } if latitude == 40.0));

        assert!(validate_geographic_point(&Point::new(-74.0, f64::NAN)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::INFINITY, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, f64::NEG_INFINITY)).is_err());
    }

    #[test]
    fn test_validate_multiple_points() {
        let points = vec![
            Point::new(-74.0, 40.7),
            Point::new(999.0, 40.0), // Invalid
            Point::new(-74.1, 40.6),
        ];
        let err = validate_points(&points).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.8).is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                validate_rating(bad),
                Err(FacilityError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range_km(0.0).is_ok());
        assert!(validate_range_km(12.5).is_ok());
        assert!(validate_range_km(-1.0).is_err());
        assert!(validate_range_km(f64::NAN).is_err());
        assert!(validate_range_km(f64::INFINITY).is_err());
    }
}
