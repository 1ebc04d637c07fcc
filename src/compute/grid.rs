//! The hierarchical spatial hash grid.
//!
//! At level `n` the projected plane `[-π, π] × [-π/2, π/2]` is cut into
//! `2^n` equal slots along each axis, `4^n` cells in total. Slot indices are
//! shifted to be symmetric around zero, so at level `n ≥ 1` they run from
//! `-(2^n)/2` to `(2^n)/2 - 1`. Level 0 is a single cell `0|0`.
//!
//! A coordinate that falls exactly on a slot boundary belongs to the slot
//! on its right (or above). The global upper edges `x = π` and `y = π/2` have
//! no slot to their right and belong to the last slot.

use crate::error::{Result, SpatialError};
use spatio_grid_types::bbox::BoundingRectangle;
use spatio_grid_types::cell::CellId;
use spatio_grid_types::point::PlanarPoint;
use std::f64::consts::{FRAC_PI_2, PI};

/// Deepest level whose slot indices fit in an `i32`.
pub const MAX_SUPPORTED_LEVEL: u8 = 30;

/// Width of the projected plane along x.
pub const PROJECTED_LONGITUDE_RANGE: f64 = 2.0 * PI;

/// Height of the projected plane along y.
pub const PROJECTED_LATITUDE_RANGE: f64 = PI;

/// Reject levels that cannot be represented.
pub fn check_level(level: u8) -> Result<()> {
    if level > MAX_SUPPORTED_LEVEL {
        return Err(SpatialError::InvalidLevel {
            level,
            max: MAX_SUPPORTED_LEVEL,
        });
    }
    Ok(())
}

/// Slot index of one coordinate along an axis spanning `range`.
fn slot_index(coordinate: f64, range: f64, level: u8) -> i32 {
    if level == 0 {
        return 0;
    }
    let slots = 1i64 << level;
    let half = slots / 2;
    let raw = (coordinate * slots as f64 / range).floor() as i64;
    raw.clamp(-half, half - 1) as i32
}

/// Cell covering a planar point at the given level.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::grid::cell_id;
/// use spatio_grid::{CellId, PlanarPoint};
///
/// let origin = PlanarPoint::new(0.0, 0.0);
/// assert_eq!(cell_id(&origin, 0)?, CellId::new(0, 0));
/// assert_eq!(cell_id(&origin, 1)?, CellId::new(0, 0));
/// assert_eq!(cell_id(&PlanarPoint::new(-0.1, -0.1), 1)?, CellId::new(-1, -1));
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn cell_id(point: &PlanarPoint, level: u8) -> Result<CellId> {
    check_level(level)?;
    Ok(CellId::new(
        slot_index(point.x, PROJECTED_LONGITUDE_RANGE, level),
        slot_index(point.y, PROJECTED_LATITUDE_RANGE, level),
    ))
}

/// Width and height of every cell at the given level, in projected radians.
pub fn cell_width(level: u8) -> (f64, f64) {
    let slots = (1u64 << level.min(MAX_SUPPORTED_LEVEL)) as f64;
    (
        PROJECTED_LONGITUDE_RANGE / slots,
        PROJECTED_LATITUDE_RANGE / slots,
    )
}

/// Number of cells along each axis at the given level.
pub fn slots_per_axis(level: u8) -> u64 {
    1u64 << level.min(MAX_SUPPORTED_LEVEL)
}

/// Planar rectangle covered by a cell.
pub fn cell_bounds(cell: CellId, level: u8) -> Result<BoundingRectangle> {
    check_level(level)?;
    if level == 0 {
        return Ok(BoundingRectangle::new(
            PlanarPoint::new(-PI, -FRAC_PI_2),
            PlanarPoint::new(PI, FRAC_PI_2),
        ));
    }
    let (width, height) = cell_width(level);
    let x = f64::from(cell.x);
    let y = f64::from(cell.y);
    Ok(BoundingRectangle::new(
        PlanarPoint::new(x * width, y * height),
        PlanarPoint::new((x + 1.0) * width, (y + 1.0) * height),
    ))
}

/// Whether a cell contains a point under the half-open boundary rule.
pub fn cell_contains(cell: CellId, level: u8, point: &PlanarPoint) -> Result<bool> {
    let bounds = cell_bounds(cell, level)?;
    let half = (slots_per_axis(level) / 2) as i64;
    let last = half.max(1) - 1;

    let within_x = point.x >= bounds.lower_left.x
        && (point.x < bounds.upper_right.x || i64::from(cell.x) == last);
    let within_y = point.y >= bounds.lower_left.y
        && (point.y < bounds.upper_right.y || i64::from(cell.y) == last);
    let first = -half;
    let below_x = point.x < bounds.lower_left.x && i64::from(cell.x) == first;
    let below_y = point.y < bounds.lower_left.y && i64::from(cell.y) == first;

    Ok((within_x || below_x) && (within_y || below_y))
}
