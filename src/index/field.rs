//! Coordinate fields and the stored field naming convention.
//!
//! For a coordinate field named `F`, the index holds:
//!
//! | Key                 | Value                        |
//! |---------------------|------------------------------|
//! | `F_HSSI_n`          | cell id `"x|y"` at level `n` |
//! | `F_HSSI_Latitude`   | latitude in degrees          |
//! | `F_HSSI_Longitude`  | longitude in degrees         |
//!
//! These keys are read back by indexes written with earlier versions and
//! must not change.

use crate::config::Config;
use crate::compute::validation::validate_level_range;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use spatio_grid_types::point::GeoPoint;

/// Name of the coordinate field used when a query or entity does not name one.
pub const DEFAULT_FIELD_NAME: &str = "_default_coordinates";

const SPATIAL_HASH_INFIX: &str = "_HSSI_";

/// Key of the cell id stored for `field` at `level`.
///
/// ```rust
/// use spatio_grid::index::cell_field_key;
///
/// assert_eq!(cell_field_key("location", 7), "location_HSSI_7");
/// ```
pub fn cell_field_key(field: &str, level: u8) -> String {
    format!("{field}{SPATIAL_HASH_INFIX}{level}")
}

/// Key of the raw latitude stored for `field`.
pub fn latitude_field_key(field: &str) -> String {
    format!("{field}{SPATIAL_HASH_INFIX}Latitude")
}

/// Key of the raw longitude stored for `field`.
pub fn longitude_field_key(field: &str) -> String {
    format!("{field}{SPATIAL_HASH_INFIX}Longitude")
}

/// How a coordinate field is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingStrategy {
    /// Only raw latitude/longitude are stored, for numeric range queries.
    Range,
    /// Raw latitude/longitude plus one cell id per grid level.
    #[default]
    Hash,
}

/// Anything that can supply a latitude/longitude pair.
///
/// Returns `(latitude, longitude)` in degrees, or `None` when either value is
/// absent. Stored pairs, computed accessors, and optional values all go
/// through this one method.
pub trait Coordinates {
    fn coordinates(&self) -> Option<(f64, f64)>;
}

impl Coordinates for GeoPoint {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude(), self.longitude()))
    }
}

impl Coordinates for (f64, f64) {
    fn coordinates(&self) -> Option<(f64, f64)> {
        Some(*self)
    }
}

impl Coordinates for (Option<f64>, Option<f64>) {
    fn coordinates(&self) -> Option<(f64, f64)> {
        match *self {
            (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
            _ => None,
        }
    }
}

impl<T: Coordinates> Coordinates for Option<T> {
    fn coordinates(&self) -> Option<(f64, f64)> {
        self.as_ref().and_then(Coordinates::coordinates)
    }
}

impl<T: Coordinates + ?Sized> Coordinates for &T {
    fn coordinates(&self) -> Option<(f64, f64)> {
        (**self).coordinates()
    }
}

/// A named logical coordinate field and how it is indexed.
///
/// Each field is independent: two fields on the same entity share no stored
/// keys, so a query on one never matches on the other's coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateField {
    name: String,
    strategy: IndexingStrategy,
    min_level: u8,
    max_level: u8,
}

impl CoordinateField {
    /// A hash-indexed field with the default level range.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self::from_config(name, &Config::default())
    }

    /// A field configured from an index configuration.
    pub fn from_config<N: Into<String>>(name: N, config: &Config) -> Self {
        Self {
            name: name.into(),
            strategy: config.strategy,
            min_level: config.min_level,
            max_level: config.max_level,
        }
    }

    /// The field named [`DEFAULT_FIELD_NAME`].
    pub fn default_field() -> Self {
        Self::new(DEFAULT_FIELD_NAME)
    }

    pub fn with_strategy(mut self, strategy: IndexingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_levels(mut self, min_level: u8, max_level: u8) -> Result<Self> {
        validate_level_range(min_level, max_level)?;
        self.min_level = min_level;
        self.max_level = max_level;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> IndexingStrategy {
        self.strategy
    }

    pub fn min_level(&self) -> u8 {
        self.min_level
    }

    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    pub fn cell_key(&self, level: u8) -> String {
        cell_field_key(&self.name, level)
    }

    pub fn latitude_key(&self) -> String {
        latitude_field_key(&self.name)
    }

    pub fn longitude_key(&self) -> String {
        longitude_field_key(&self.name)
    }
}

impl Default for CoordinateField {
    fn default() -> Self {
        Self::default_field()
    }
}
