//! # spatio-grid-types
//!
//! Core data types for the spatio-grid spatial hash index.
//!
//! - **Point types**: `GeoPoint` (latitude/longitude in degrees) and
//!   `PlanarPoint` (sinusoidally projected coordinates in radians)
//! - **Cell types**: `CellId`, the `"x|y"` label of one grid cell at one level
//! - **Rectangle types**: `GeoRectangle` and `BoundingRectangle`
//!
//! All types are serializable with Serde. `GeoPoint` converts to and from the
//! `geo` crate's `Point` (x = longitude, y = latitude).
//!
//! ## Examples
//!
//! ```rust
//! use spatio_grid_types::point::GeoPoint;
//! use spatio_grid_types::cell::CellId;
//!
//! let cairo = GeoPoint::new(30.0444, 31.2357).unwrap();
//! assert_eq!(cairo.latitude(), 30.0444);
//!
//! let cell: CellId = "3|-2".parse().unwrap();
//! assert_eq!(cell.to_string(), "3|-2");
//! ```

pub mod bbox;
pub mod cell;
pub mod point;

pub use bbox::{BoundingRectangle, GeoRectangle};
pub use cell::{CellId, CellIdParseError};
pub use point::{GeoPoint, InvalidCoordinate, PlanarPoint};
