//! Sinusoidal projection between geographic and planar coordinates.
//!
//! The sinusoidal projection is equal-area: `x = λ·cos(φ)`, `y = φ`, with
//! both angles in radians. The projected plane is therefore bounded by
//! `|x| ≤ π` and `|y| ≤ π/2`, and it narrows toward the poles.

use crate::error::Result;
use spatio_grid_types::point::{GeoPoint, PlanarPoint};

/// Below this `cos(φ)` the longitude can no longer be recovered from `x`.
const POLE_EPSILON: f64 = 1e-12;

/// Project a geographic point onto the plane.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::projection::project;
/// use spatio_grid::GeoPoint;
///
/// let p = project(&GeoPoint::new(0.0, 180.0)?);
/// assert!((p.x - std::f64::consts::PI).abs() < 1e-12);
/// assert_eq!(p.y, 0.0);
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn project(point: &GeoPoint) -> PlanarPoint {
    let phi = point.latitude_rad();
    PlanarPoint::new(point.longitude_rad() * phi.cos(), phi)
}

/// Validate raw degrees and project them.
pub fn project_degrees(latitude: f64, longitude: f64) -> Result<PlanarPoint> {
    Ok(project(&GeoPoint::new(latitude, longitude)?))
}

/// Project a rectangle edge given in degrees.
///
/// Unlike [`project`] the longitude is taken as-is, so the edges -180° and
/// 180° stay distinct. Callers pass values already known to be in range.
pub fn project_edge(latitude: f64, longitude: f64) -> PlanarPoint {
    let phi = latitude.to_radians();
    PlanarPoint::new(longitude.to_radians() * phi.cos(), phi)
}

/// Inverse of [`project`].
///
/// At the poles every longitude collapses onto `x = 0`; longitude 0 is
/// returned there.
pub fn unproject(point: &PlanarPoint) -> Result<GeoPoint> {
    let cos_phi = point.y.cos();
    let lambda = if cos_phi.abs() < POLE_EPSILON {
        0.0
    } else {
        point.x / cos_phi
    };
    let mut latitude = point.y.to_degrees();
    if latitude.abs() > 90.0 && latitude.abs() - 90.0 < POLE_EPSILON {
        latitude = latitude.clamp(-90.0, 90.0);
    }
    Ok(GeoPoint::new(latitude, lambda.to_degrees())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_round_trip_away_from_poles() {
        let mut lat = -88.9;
        while lat < 89.0 {
            let mut lon = -179.5;
            while lon <= 180.0 {
                let p = GeoPoint::new(lat, lon).unwrap();
                let back = unproject(&project(&p)).unwrap();
                assert!(
                    (back.latitude_rad() - p.latitude_rad()).abs() < 1e-9,
                    "lat drift at ({lat}, {lon})"
                );
                assert!(
                    (back.longitude_rad() - p.longitude_rad()).abs() < 1e-9,
                    "lon drift at ({lat}, {lon})"
                );
                lon += 7.25;
            }
            lat += 3.7;
        }
    }

    #[test]
    fn test_poles_are_finite() {
        for lat in [90.0, -90.0] {
            for lon in [-179.0, 0.0, 45.0, 180.0] {
                let p = project(&GeoPoint::new(lat, lon).unwrap());
                assert!(p.x.is_finite() && p.x.abs() < 1e-9);
                assert!((p.y.abs() - FRAC_PI_2).abs() < 1e-15);
                let back = unproject(&p).unwrap();
                assert!((back.latitude() - lat).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_plane_bounds() {
        let east = project(&GeoPoint::new(0.0, 180.0).unwrap());
        assert!(east.x <= PI + 1e-12);
        let west = project(&GeoPoint::new(0.0, -179.999).unwrap());
        assert!(west.x > -PI);
    }

    #[test]
    fn test_project_degrees_rejects_invalid() {
        assert!(project_degrees(91.0, 0.0).is_err());
        assert!(project_degrees(0.0, f64::NAN).is_err());
        assert!(project_degrees(45.0, 10.0).is_ok());
    }
}
