use crate::point::{GeoPoint, PlanarPoint};
use serde::{Deserialize, Serialize};

/// A latitude/longitude box in degrees.
///
/// `west > east` means the box crosses the antimeridian and covers
/// `[west, 180] ∪ [-180, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoRectangle {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoRectangle {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south,
            west,
            north,
            east,
        }
    }

    /// Whether the longitude span wraps past ±180°.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Whether the box spans every longitude.
    pub fn is_full_width(&self) -> bool {
        self.west <= -180.0 && self.east >= 180.0
    }

    /// Split an antimeridian-crossing box into its eastern and western parts.
    ///
    /// A box that does not cross is returned unchanged with no second part.
    pub fn split_at_antimeridian(&self) -> (GeoRectangle, Option<GeoRectangle>) {
        if !self.crosses_antimeridian() {
            return (*self, None);
        }
        (
            GeoRectangle::new(self.south, self.west, self.north, 180.0),
            Some(GeoRectangle::new(self.south, -180.0, self.north, self.east)),
        )
    }

    /// Whether the box contains a point, honoring antimeridian wrap.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let lat = point.latitude();
        let lon = point.longitude();
        if lat < self.south || lat > self.north {
            return false;
        }
        if self.crosses_antimeridian() {
            lon >= self.west || lon <= self.east
        } else {
            lon >= self.west && lon <= self.east
        }
    }
}

/// An axis-aligned rectangle in the projected plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    pub lower_left: PlanarPoint,
    pub upper_right: PlanarPoint,
}

impl BoundingRectangle {
    pub fn new(lower_left: PlanarPoint, upper_right: PlanarPoint) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    /// Closed containment test.
    pub fn contains(&self, point: &PlanarPoint) -> bool {
        point.x >= self.lower_left.x
            && point.x <= self.upper_right.x
            && point.y >= self.lower_left.y
            && point.y <= self.upper_right.y
    }
}
