//! Great-circle distances on a spherical Earth.
//!
//! Distances are computed with the `geo` crate's Haversine metric. The
//! canonical unit inside the index is the kilometer; callers convert with
//! [`DistanceUnit`] before anything reaches the grid math.

use crate::error::Result;
use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use spatio_grid_types::point::GeoPoint;

/// Mean Earth radius in kilometers, matching the radius used by
/// `geo::Haversine`.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

const KILOMETERS_PER_MILE: f64 = 1.609344;

/// Distance unit accepted at the query surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
    Meters,
}

impl DistanceUnit {
    /// Convert a distance in this unit to kilometers.
    pub fn to_kilometers(self, distance: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => distance,
            DistanceUnit::Miles => distance * KILOMETERS_PER_MILE,
            DistanceUnit::Meters => distance / 1000.0,
        }
    }

    /// Convert a distance in kilometers to this unit.
    pub fn from_kilometers(self, kilometers: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => kilometers,
            DistanceUnit::Miles => kilometers / KILOMETERS_PER_MILE,
            DistanceUnit::Meters => kilometers * 1000.0,
        }
    }
}

/// Great-circle distance between two points, in kilometers.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::distance::distance_km;
/// use spatio_grid::GeoPoint;
///
/// let a = GeoPoint::new(24.0, 31.5)?;
/// let b = GeoPoint::new(24.0, 32.0)?;
/// let d = distance_km(&a, &b);
/// assert!(d > 50.0 && d < 51.0);
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    Haversine.distance(Point::from(*a), Point::from(*b)) / 1000.0
}

/// Angular radius, in radians, of a distance along the sphere.
pub fn angular_distance(distance_km: f64) -> f64 {
    distance_km / EARTH_MEAN_RADIUS_KM
}

/// Point reached by travelling `distance_km` from `origin` along the great
/// circle with initial `bearing` (degrees clockwise from north).
pub fn destination(origin: &GeoPoint, bearing: f64, distance_km: f64) -> Result<GeoPoint> {
    let delta = angular_distance(distance_km);
    let theta = bearing.to_radians();
    let phi1 = origin.latitude_rad();
    let lambda1 = origin.longitude_rad();

    let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    Ok(GeoPoint::new(
        phi2.to_degrees().clamp(-90.0, 90.0),
        lambda2.to_degrees(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_distance_zero() {
        let p = point(24.0, 32.0);
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_known_pair() {
        // NYC to LA is roughly 3,944 km
        let nyc = point(40.7128, -74.0060);
        let la = point(34.0522, -118.2437);
        let d = distance_km(&nyc, &la);
        assert!(d > 3_900.0 && d < 4_000.0, "got {d}");
    }

    #[test]
    fn test_distance_across_antimeridian() {
        let a = point(0.0, 179.9);
        let b = point(0.0, -179.9);
        let d = distance_km(&a, &b);
        assert!(d < 23.0, "got {d}");
    }

    #[test]
    fn test_destination_round_trip() {
        let origin = point(24.0, 32.0);
        for bearing in [0.0, 45.0, 90.0, 180.0, 270.0] {
            let dest = destination(&origin, bearing, 10.0).unwrap();
            let d = distance_km(&origin, &dest);
            assert!((d - 10.0).abs() < 1e-5, "bearing {bearing}: {d}");
        }
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let dest = destination(&point(0.0, 179.5), 90.0, 200.0).unwrap();
        assert!(dest.longitude() < -178.0);
    }

    #[test]
    fn test_unit_conversion() {
        assert_eq!(DistanceUnit::Kilometers.to_kilometers(5.0), 5.0);
        assert!((DistanceUnit::Miles.to_kilometers(1.0) - 1.609344).abs() < 1e-12);
        assert_eq!(DistanceUnit::Meters.to_kilometers(1500.0), 1.5);
        let km = DistanceUnit::Miles.to_kilometers(31.0);
        assert!((DistanceUnit::Miles.from_kilometers(km) - 31.0).abs() < 1e-9);
    }
}
