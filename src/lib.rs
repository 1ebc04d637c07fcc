//! Spatial hash grid index with two-stage radius filtering.
//!
//! Coordinates are projected with a sinusoidal projection and labeled with
//! one grid cell per level. A radius query picks a level, enumerates the
//! cells covering the disc, matches them as plain terms, then refines the
//! candidates by great-circle distance.
//!
//! ```rust
//! use spatio_grid::prelude::*;
//!
//! let field = CoordinateField::new("location");
//! let index = MemoryIndex::new();
//! index_document(&index, 1, &SpatialDocument::new().with_field(field.clone(), (24.0, 31.5)))?;
//! index_document(&index, 2, &SpatialDocument::new().with_field(field.clone(), (24.5, 40.0)))?;
//!
//! let planner = SpatialQueryPlanner::new(Config::default())?.with_field(field);
//! let query = planner.plan_within(24.0, 32.0, 51.0, None, Some("location"))?;
//! let results = SpatialSearch::new(&index).execute(&query, &SearchOptions::default())?;
//! assert_eq!(results.docs(), vec![1]);
//! # Ok::<(), spatio_grid::SpatialError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod query;

pub use config::Config;
pub use error::{Result, SpatialError};

pub use spatio_grid_types::{
    BoundingRectangle, CellId, CellIdParseError, GeoPoint, GeoRectangle, InvalidCoordinate,
    PlanarPoint,
};

pub use compute::distance::{DistanceUnit, distance_km};
pub use compute::grid::MAX_SUPPORTED_LEVEL;

pub use index::{
    CoordinateField, Coordinates, DEFAULT_FIELD_NAME, IndexingStrategy, MemoryIndex,
    SpatialDocument,
};

pub use query::{SearchDisc, SpatialQuery, SpatialQueryPlanner, SpatialSearch};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Result, SpatialError};

    pub use crate::{CellId, GeoPoint, PlanarPoint};

    pub use crate::DistanceUnit;

    pub use crate::index::{
        CoordinateField, Coordinates, IndexReader, IndexWriter, IndexingStrategy, MemoryIndex,
        SpatialDocument, index_document,
    };

    pub use crate::query::{
        SearchDisc, SearchOptions, SpatialQuery, SpatialQueryPlanner, SpatialSearch, plan_query,
    };
}
