//! Search discs: a center point and a radius on the sphere.

use crate::compute::bbox::{BoundingRectangles, bounding_rectangles, geo_bounding_box};
use crate::compute::distance::{DistanceUnit, distance_km};
use crate::compute::validation::{validate_geographic_point, validate_radius};
use crate::error::Result;
use spatio_grid_types::bbox::GeoRectangle;
use spatio_grid_types::point::GeoPoint;

/// A circular search area. The radius is held in kilometers whatever unit
/// the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchDisc {
    center: GeoPoint,
    radius_km: f64,
}

impl SearchDisc {
    /// Build a disc from a radius expressed in `unit`.
    ///
    /// # Errors
    ///
    /// `InvalidRadius` when the radius is not strictly positive and finite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spatio_grid::compute::distance::DistanceUnit;
    /// use spatio_grid::query::SearchDisc;
    /// use spatio_grid::GeoPoint;
    ///
    /// let center = GeoPoint::new(24.0, 32.0)?;
    /// let disc = SearchDisc::new(center, 10.0, DistanceUnit::Miles)?;
    /// assert!((disc.radius_km() - 16.09344).abs() < 1e-9);
    ///
    /// assert!(SearchDisc::new(center, 0.0, DistanceUnit::Kilometers).is_err());
    /// # Ok::<(), spatio_grid::SpatialError>(())
    /// ```
    pub fn new(center: GeoPoint, radius: f64, unit: DistanceUnit) -> Result<Self> {
        let radius_km = unit.to_kilometers(radius);
        validate_radius(radius_km)?;
        Ok(Self { center, radius_km })
    }

    /// Build a disc from raw degrees and a radius in kilometers.
    pub fn from_degrees(latitude: f64, longitude: f64, radius_km: f64) -> Result<Self> {
        let center = validate_geographic_point(latitude, longitude)?;
        Self::new(center, radius_km, DistanceUnit::Kilometers)
    }

    pub fn center(&self) -> &GeoPoint {
        &self.center
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    /// Radius converted to `unit`.
    pub fn radius_in(&self, unit: DistanceUnit) -> f64 {
        unit.from_kilometers(self.radius_km)
    }

    /// Geographic bounding box of the disc.
    pub fn geo_bounds(&self) -> Result<GeoRectangle> {
        geo_bounding_box(&self.center, self.radius_km)
    }

    /// Planar rectangles covering the disc: two when it crosses the
    /// antimeridian.
    pub fn bounding_rectangles(&self) -> Result<BoundingRectangles> {
        bounding_rectangles(&self.center, self.radius_km)
    }

    /// Great-circle distance from the center to `point`, in kilometers.
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        distance_km(&self.center, point)
    }

    /// Whether `point` lies inside the disc (boundary included).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.distance_to(point) <= self.radius_km
    }
}
