use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between the x and y indices of a serialized cell id.
pub const CELL_ID_SEPARATOR: char = '|';

/// Identifier of one cell of the spatial hash grid at a given level.
///
/// At level `n` both indices lie in `[-(2^n)/2, (2^n)/2)`. The stored form is
/// the string `"x|y"`, which must stay bit-exact across versions because it
/// is written into index fields.
///
/// # Examples
///
/// ```
/// use spatio_grid_types::cell::CellId;
///
/// let cell = CellId::new(-4, 7);
/// assert_eq!(cell.to_string(), "-4|7");
/// assert_eq!("-4|7".parse::<CellId>().unwrap(), cell);
/// assert!("-4/7".parse::<CellId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub x: i32,
    pub y: i32,
}

impl CellId {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x, CELL_ID_SEPARATOR, self.y)
    }
}

/// A stored cell id string that does not have the `"x|y"` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed cell id: {0:?}")]
pub struct CellIdParseError(pub String);

impl FromStr for CellId {
    type Err = CellIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CellIdParseError(s.to_string());
        let (x, y) = s.split_once(CELL_ID_SEPARATOR).ok_or_else(malformed)?;
        let x = x.parse::<i32>().map_err(|_| malformed())?;
        let y = y.parse::<i32>().map_err(|_| malformed())?;
        Ok(Self { x, y })
    }
}
