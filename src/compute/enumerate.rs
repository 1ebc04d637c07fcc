//! Enumerating the grid cells a planar rectangle overlaps.

use crate::compute::grid::cell_id;
use crate::error::Result;
use rustc_hash::FxHashSet;
use spatio_grid_types::bbox::BoundingRectangle;
use spatio_grid_types::cell::CellId;

/// Every cell at `level` that the rectangle overlaps.
///
/// The cells of the lower-left and upper-right corners delimit an inclusive
/// index range on each axis; every cell in that range is returned. The set
/// is never truncated.
///
/// # Examples
///
/// ```rust
/// use spatio_grid::compute::enumerate::enumerate;
/// use spatio_grid::{BoundingRectangle, CellId, PlanarPoint};
///
/// let rect = BoundingRectangle::new(PlanarPoint::new(-0.1, -0.1), PlanarPoint::new(0.1, 0.1));
/// let cells = enumerate(&rect, 1)?;
/// assert_eq!(cells.len(), 4);
/// assert!(cells.contains(&CellId::new(-1, -1)));
/// # Ok::<(), spatio_grid::SpatialError>(())
/// ```
pub fn enumerate(rect: &BoundingRectangle, level: u8) -> Result<FxHashSet<CellId>> {
    let mut cells = FxHashSet::default();
    extend_with_rectangle(&mut cells, rect, level)?;
    Ok(cells)
}

/// Union of the cells of several rectangles, e.g. both halves of an
/// antimeridian split.
pub fn enumerate_all(rects: &[BoundingRectangle], level: u8) -> Result<FxHashSet<CellId>> {
    let mut cells = FxHashSet::default();
    for rect in rects {
        extend_with_rectangle(&mut cells, rect, level)?;
    }
    Ok(cells)
}

fn extend_with_rectangle(
    cells: &mut FxHashSet<CellId>,
    rect: &BoundingRectangle,
    level: u8,
) -> Result<()> {
    let lower = cell_id(&rect.lower_left, level)?;
    let upper = cell_id(&rect.upper_right, level)?;
    let (x_start, x_end) = (lower.x.min(upper.x), lower.x.max(upper.x));
    let (y_start, y_end) = (lower.y.min(upper.y), lower.y.max(upper.y));

    let columns = (i64::from(x_end) - i64::from(x_start) + 1) as usize;
    let rows = (i64::from(y_end) - i64::from(y_start) + 1) as usize;
    cells.reserve(columns.saturating_mul(rows));

    for x in x_start..=x_end {
        for y in y_start..=y_end {
            cells.insert(CellId::new(x, y));
        }
    }
    Ok(())
}
