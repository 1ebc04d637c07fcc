//! Index configuration for coordinate fields.
//!
//! The configuration is fixed at index-build time: the grid depth of a field
//! cannot change without re-indexing every document.

use crate::compute::distance::DistanceUnit;
use crate::compute::validation::validate_level_range;
use crate::error::{Result, SpatialError};
use crate::index::IndexingStrategy;
use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Spatial index configuration
///
/// # Example
///
/// ```rust
/// use spatio_grid::Config;
///
/// let config = Config::default();
/// assert_eq!(config.max_level, 16);
///
/// let json = r#"{
///     "max_level": 12,
///     "default_unit": "miles"
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.max_level, 12);
/// assert_eq!(config.min_level, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Deepest spatial hash level written for each coordinate field.
    #[serde(default = "Config::default_max_level")]
    pub max_level: u8,

    /// Coarsest spatial hash level written for each coordinate field.
    #[serde(default)]
    pub min_level: u8,

    /// Unit applied to radii that are given without one.
    #[serde(default)]
    pub default_unit: DistanceUnit,

    /// How coordinate fields are indexed.
    #[serde(default)]
    pub strategy: IndexingStrategy,
}

impl Config {
    const fn default_max_level() -> u8 {
        16
    }

    pub fn with_levels(mut self, min_level: u8, max_level: u8) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    pub fn with_max_level(mut self, max_level: u8) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_default_unit(mut self, unit: DistanceUnit) -> Self {
        self.default_unit = unit;
        self
    }

    pub fn with_strategy(mut self, strategy: IndexingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        validate_level_range(self.min_level, self.max_level)
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a file, picking the format by extension.
    ///
    /// `.toml` files need the `toml` feature; everything else is read as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => {
                Self::from_toml(&contents).map_err(|e| SpatialError::Serialization(e.to_string()))
            }
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(SpatialError::Config(
                "TOML configuration requires the `toml` feature".to_string(),
            )),
            _ => Self::from_json(&contents).map_err(|e| SpatialError::Serialization(e.to_string())),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_level: Self::default_max_level(),
            min_level: 0,
            default_unit: DistanceUnit::default(),
            strategy: IndexingStrategy::default(),
        }
    }
}
