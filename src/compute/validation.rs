//! Validation for geographic coordinates, radii, and grid levels.

use crate::compute::grid::check_level;
use crate::error::{Result, SpatialError};
use spatio_grid_types::point::GeoPoint;

/// Validates raw degrees and builds a normalized point.
///
/// Latitude: [-90.0, 90.0]. Longitude: any finite value, wrapped into
/// (-180.0, 180.0].
///
/// # Examples
///
/// ```
/// use spatio_grid::compute::validation::validate_geographic_point;
///
/// // Valid point
/// let cairo = validate_geographic_point(30.0444, 31.2357).unwrap();
/// assert_eq!(cairo.longitude(), 31.2357);
///
/// // Wrapped longitude
/// let wrapped = validate_geographic_point(0.0, -200.0).unwrap();
/// assert_eq!(wrapped.longitude(), 160.0);
///
/// // Invalid latitude
/// assert!(validate_geographic_point(95.0, 0.0).is_err());
/// ```
pub fn validate_geographic_point(latitude: f64, longitude: f64) -> Result<GeoPoint> {
    Ok(GeoPoint::new(latitude, longitude)?)
}

/// Validates a search radius in kilometers.
pub fn validate_radius(radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(SpatialError::InvalidRadius(radius_km));
    }
    Ok(())
}

/// Validates a `[min_level, max_level]` range of grid levels.
pub fn validate_level_range(min_level: u8, max_level: u8) -> Result<()> {
    check_level(max_level)?;
    if min_level > max_level {
        return Err(SpatialError::Config(format!(
            "min_level ({}) must be <= max_level ({})",
            min_level, max_level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(40.7128, -74.0060).is_ok());
        assert!(validate_geographic_point(51.5074, -0.1278).is_ok());

        // Edge cases
        assert!(validate_geographic_point(0.0, 180.0).is_ok());
        assert_eq!(
            validate_geographic_point(0.0, -180.0).unwrap().longitude(),
            180.0
        );
        assert!(validate_geographic_point(90.0, 0.0).is_ok());
        assert!(validate_geographic_point(-90.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        let err = validate_geographic_point(90.1, 0.0).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidCoordinate(_)));
        assert!(validate_geographic_point(-95.0, 0.0).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(validate_geographic_point(f64::NAN, 40.0).is_err());
        assert!(validate_geographic_point(40.0, f64::NAN).is_err());
        assert!(validate_geographic_point(f64::INFINITY, 40.0).is_err());
        assert!(validate_geographic_point(40.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_radius() {
        assert!(validate_radius(0.001).is_ok());
        assert!(validate_radius(20_000.0).is_ok());
        assert!(matches!(
            validate_radius(0.0),
            Err(SpatialError::InvalidRadius(_))
        ));
        assert!(validate_radius(-1.0).is_err());
        assert!(validate_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_level_range() {
        assert!(validate_level_range(0, 16).is_ok());
        assert!(validate_level_range(3, 2).is_err());
        assert!(validate_level_range(0, 31).is_err());
    }
}
