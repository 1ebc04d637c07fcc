//! Choosing the grid level for a search radius.
//!
//! The selected level is the deepest one whose cells are both wider and
//! taller than the disc's bounding box, measured at equatorial scale. A disc
//! then overlaps at most two cells per axis near the equator. Away from the
//! equator the projected box is narrower in x, so the same level stays
//! valid; near the poles the latitude band can still cover a few more cells,
//! which is accepted as a small overfetch.

use crate::compute::distance::angular_distance;
use crate::compute::grid::cell_width;
use crate::compute::validation::{validate_level_range, validate_radius};
use crate::error::Result;

/// Deepest level in `0..=max_level` suited to a radius in kilometers.
///
/// Level 0 is always a valid fallback. Larger radii never select deeper
/// levels.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::level::best_level;
///
/// assert_eq!(best_level(20_000.0, 16)?, 0);
/// let city = best_level(10.0, 16)?;
/// let country = best_level(500.0, 16)?;
/// assert!(city > country);
/// assert_eq!(best_level(0.001, 8)?, 8);
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn best_level(radius_km: f64, max_level: u8) -> Result<u8> {
    best_level_within(radius_km, 0, max_level)
}

/// Deepest level in `min_level..=max_level` suited to a radius, falling back
/// to `min_level`.
pub fn best_level_within(radius_km: f64, min_level: u8, max_level: u8) -> Result<u8> {
    validate_radius(radius_km)?;
    validate_level_range(min_level, max_level)?;

    let extent = 2.0 * angular_distance(radius_km);
    let level = (min_level..=max_level)
        .rev()
        .find(|&level| {
            let (width, height) = cell_width(level);
            width > extent && height > extent
        })
        .unwrap_or(min_level);
    Ok(level)
}
