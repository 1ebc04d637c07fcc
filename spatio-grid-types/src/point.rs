use geo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected geographic input.
///
/// Corrupt coordinates are refused at construction instead of being clamped,
/// so they can never reach an index unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidCoordinate {
    /// Latitude is not finite or lies outside [-90, 90].
    #[error("Latitude out of range [-90.0, 90.0]: {0}")]
    Latitude(f64),
    /// Longitude is not finite and cannot be normalized.
    #[error("Longitude must be finite, got: {0}")]
    Longitude(f64),
}

/// A geographic point in degrees.
///
/// Latitude is within [-90, 90] and longitude within the half-open interval
/// (-180, 180]. Longitudes outside that interval are wrapped on construction,
/// so `-180` becomes `180` and `190` becomes `-170`.
///
/// # Examples
///
/// ```
/// use spatio_grid_types::point::GeoPoint;
///
/// let p = GeoPoint::new(24.0, 190.0).unwrap();
/// assert_eq!(p.longitude(), -170.0);
///
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// assert!(GeoPoint::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointRepr", into = "GeoPointRepr")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct GeoPointRepr {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point from degrees, normalizing the longitude.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::Latitude(latitude));
        }
        Ok(Self {
            latitude,
            longitude: normalize_longitude(longitude)?,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians.
    pub fn longitude_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl TryFrom<GeoPointRepr> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(repr: GeoPointRepr) -> Result<Self, Self::Error> {
        GeoPoint::new(repr.latitude, repr.longitude)
    }
}

impl From<GeoPoint> for GeoPointRepr {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Point::new(point.longitude, point.latitude)
    }
}

impl TryFrom<Point<f64>> for GeoPoint {
    type Error = InvalidCoordinate;

    fn try_from(point: Point<f64>) -> Result<Self, Self::Error> {
        GeoPoint::new(point.y(), point.x())
    }
}

/// Wrap a longitude into (-180, 180].
pub fn normalize_longitude(longitude: f64) -> Result<f64, InvalidCoordinate> {
    if !longitude.is_finite() {
        return Err(InvalidCoordinate::Longitude(longitude));
    }
    if longitude > -180.0 && longitude <= 180.0 {
        return Ok(longitude);
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        Ok(180.0)
    } else {
        Ok(wrapped)
    }
}

/// A point in the sinusoidally projected plane, in radians.
///
/// `x` follows longitude and lies in [-π, π]; `y` follows latitude and lies
/// in [-π/2, π/2]. Note the axis order is the reverse of [`GeoPoint`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
