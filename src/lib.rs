//! Photomosaic construction with greedy, inventory-aware tile matching
//!
//! A target image is cut into a grid of cells. Every cell and every tile is
//! mapped to a feature vector, and cells are then filled one at a time by
//! always committing the closest remaining (cell, tile) pair while respecting
//! how many copies of each tile exist.

#![forbid(unsafe_code)]

/// Cells, the greedy assignment engine and its result
pub mod algorithm;
/// Feature extraction from image patches
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Distance computations between feature vectors
pub mod math;
/// Image patches, grid geometry and tile inventory
pub mod spatial;

pub use io::error::{MosaicError, Result};
