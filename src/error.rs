//! Error types for spatial hash indexing and querying.

use spatio_grid_types::point::InvalidCoordinate;
use thiserror::Error;

/// Spatial index errors.
#[derive(Error, Debug)]
pub enum SpatialError {
    /// Latitude out of range, or a non-finite coordinate.
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Search radius is not a positive finite distance.
    #[error("Radius must be positive and finite, got: {0}")]
    InvalidRadius(f64),

    /// Grid level beyond what the cell index range can represent.
    #[error("Spatial hash level {level} exceeds the maximum of {max}")]
    InvalidLevel { level: u8, max: u8 },

    /// A stored cell id could not be parsed (written by an incompatible version?).
    #[error("Corrupt cell id {value:?} in field {field}")]
    DataCorruption { field: String, value: String },

    /// A hash query was planned against a field that does not store cell ids.
    #[error("Field {field} is indexed with the {strategy:?} strategy")]
    UnsupportedStrategy {
        field: String,
        strategy: crate::index::IndexingStrategy,
    },

    /// The named coordinate field is not part of the document.
    #[error("Unknown coordinate field: {0}")]
    UnknownField(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while loading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or written.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;
