//! Compute layer: the pure geometry behind the spatial hash grid.
//!
//! This module separates the grid math from index storage and query
//! execution. It provides:
//! - Sinusoidal projection of geographic coordinates
//! - The hierarchical grid scheme and cell enumeration
//! - Search-disc bounding boxes and level selection
//! - Great-circle distances and coordinate validation
//!
//! Everything here is a deterministic function of its arguments, with no
//! shared state, so it can be called from any number of threads at once.

pub mod bbox;
pub mod distance;
pub mod enumerate;
pub mod grid;
pub mod level;
pub mod projection;
pub mod validation;
