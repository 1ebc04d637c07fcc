//! Bounding rectangles for search discs.
//!
//! The geographic box of a disc is computed on the sphere: its latitude
//! extent comes from the destination points due north and due south of the
//! center, and its longitude extent from the tangent meridians
//! (`Δλ = asin(sin δ / cos φ)`, δ being the angular radius). A disc that
//! reaches a pole spans every longitude; a disc whose longitude extent wraps
//! past ±180° is split in two at the antimeridian.
//!
//! The geographic box is then projected. Because the sinusoidal plane
//! narrows toward the poles, the projected box is not a rectangle; the
//! planar envelope is taken over the corners and, when the box straddles
//! the equator, over the widest parallel too.

use crate::compute::distance::{angular_distance, destination};
use crate::compute::projection::project_edge;
use crate::compute::validation::validate_radius;
use crate::error::Result;
use smallvec::SmallVec;

/// Slack added to every box edge, in degrees, so that points exactly on the
/// disc boundary survive rounding in the edge computation.
const EDGE_SLACK_DEGREES: f64 = 1e-9;
use spatio_grid_types::bbox::{BoundingRectangle, GeoRectangle};
use spatio_grid_types::point::{GeoPoint, PlanarPoint};
use std::f64::consts::FRAC_PI_2;

/// One rectangle, or two when the disc crosses the antimeridian.
pub type BoundingRectangles = SmallVec<[BoundingRectangle; 2]>;

/// Geographic bounding box of the disc around `center` with `radius_km`.
///
/// The result is never empty: discs touching a pole, and discs larger than
/// half the Earth's circumference, produce full-width boxes.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::bbox::geo_bounding_box;
/// use spatio_grid::GeoPoint;
///
/// let bbox = geo_bounding_box(&GeoPoint::new(0.0, 179.0)?, 300.0)?;
/// assert!(bbox.crosses_antimeridian());
///
/// let polar = geo_bounding_box(&GeoPoint::new(89.5, 10.0)?, 100.0)?;
/// assert_eq!(polar.north, 90.0);
/// assert!(polar.is_full_width());
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn geo_bounding_box(center: &GeoPoint, radius_km: f64) -> Result<GeoRectangle> {
    validate_radius(radius_km)?;

    let delta = angular_distance(radius_km);
    let phi = center.latitude_rad();
    let covers_north = delta >= FRAC_PI_2 - phi;
    let covers_south = delta >= FRAC_PI_2 + phi;

    let north = if covers_north {
        90.0
    } else {
        (destination(center, 0.0, radius_km)?.latitude() + EDGE_SLACK_DEGREES).min(90.0)
    };
    let south = if covers_south {
        -90.0
    } else {
        (destination(center, 180.0, radius_km)?.latitude() - EDGE_SLACK_DEGREES).max(-90.0)
    };

    if covers_north || covers_south {
        return Ok(GeoRectangle::new(south, -180.0, north, 180.0));
    }

    let ratio = (delta.sin() / phi.cos()).clamp(-1.0, 1.0);
    let delta_lon = ratio.asin().to_degrees() + EDGE_SLACK_DEGREES;
    let mut west = center.longitude() - delta_lon;
    let mut east = center.longitude() + delta_lon;
    // Stored longitudes are normalized to (-180, 180], so a west edge at
    // exactly -180 must become the 180 meridian on the other side.
    if west <= -180.0 {
        west += 360.0;
    }
    if east > 180.0 {
        east -= 360.0;
    }

    Ok(GeoRectangle::new(south, west, north, east))
}

/// Planar envelope of a geographic box that does not cross the antimeridian.
pub fn project_rectangle(rect: &GeoRectangle) -> BoundingRectangle {
    let widest = 0.0f64.clamp(rect.south, rect.north);
    let mut min = PlanarPoint::new(f64::INFINITY, f64::INFINITY);
    let mut max = PlanarPoint::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

    for latitude in [rect.south, widest, rect.north] {
        for longitude in [rect.west, rect.east] {
            let corner = project_edge(latitude, longitude);
            min.x = min.x.min(corner.x);
            min.y = min.y.min(corner.y);
            max.x = max.x.max(corner.x);
            max.y = max.y.max(corner.y);
        }
    }

    BoundingRectangle::new(min, max)
}

/// Planar bounding rectangles covering the disc around `center`.
pub fn bounding_rectangles(center: &GeoPoint, radius_km: f64) -> Result<BoundingRectangles> {
    let bbox = geo_bounding_box(center, radius_km)?;
    let (first, second) = bbox.split_at_antimeridian();

    let mut rectangles = BoundingRectangles::new();
    rectangles.push(project_rectangle(&first));
    if let Some(second) = second {
        rectangles.push(project_rectangle(&second));
    }
    Ok(rectangles)
}
