//! Spatial data structures: pixel patches, grid geometry and tiles
//!
//! This module contains:
//! - Image patches and margin cropping
//! - Grid shapes, positions and slicing of the target image
//! - Tiles and the shared tile inventory

/// Grid geometry and target image slicing
pub mod grid;
/// Owned pixel patches
pub mod patch;
/// Tile entities and remaining quantities
pub mod tiles;

pub use grid::{CellLayout, GridPosition, GridShape};
pub use patch::{ImagePatch, TileMargins};
pub use tiles::{Tile, TileId, TileInventory};
