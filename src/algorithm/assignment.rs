//! The finished mapping from grid positions to tiles

use ndarray::Array2;

use crate::algorithm::cell::{Candidate, Cell};
use crate::io::error::{Result, illegal_state};
use crate::spatial::grid::{GridPosition, GridShape};
use crate::spatial::tiles::TileId;

/// Tile chosen for every grid position of a fully assigned mosaic
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    grid: GridShape,
    tiles: Array2<TileId>,
    distances: Array2<f64>,
}

impl Assignment {
    /// Collect the assignments of a complete set of cells
    ///
    /// # Errors
    ///
    /// Returns an error unless every grid position is covered by exactly one
    /// assigned cell
    pub fn from_cells(grid: GridShape, cells: &[Cell]) -> Result<Self> {
        let mut slots: Vec<Option<Candidate>> = vec![None; grid.cell_count()];

        for cell in cells {
            let position = cell.position();
            let slot = grid
                .index_of(position)
                .and_then(|index| slots.get_mut(index))
                .ok_or_else(|| {
                    illegal_state(&format!("cell {position} lies outside the {grid} grid"))
                })?;
            if slot.is_some() {
                return Err(illegal_state(&format!(
                    "cell {position} appears more than once"
                )));
            }
            let candidate = cell.assignment().ok_or_else(|| {
                illegal_state(&format!("cell {position} has no tile assigned"))
            })?;
            *slot = Some(candidate);
        }

        let candidates = slots
            .into_iter()
            .zip(grid.positions())
            .map(|(slot, position)| {
                slot.ok_or_else(|| illegal_state(&format!("no cell covers position {position}")))
            })
            .collect::<Result<Vec<_>>>()?;

        let shape = (grid.rows(), grid.cols());
        let tiles = Array2::from_shape_vec(
            shape,
            candidates.iter().map(|candidate| candidate.tile).collect(),
        )
        .map_err(|e| illegal_state(&e))?;
        let distances = Array2::from_shape_vec(
            shape,
            candidates.iter().map(|candidate| candidate.distance).collect(),
        )
        .map_err(|e| illegal_state(&e))?;

        Ok(Self {
            grid,
            tiles,
            distances,
        })
    }

    /// Grid the assignment covers
    pub const fn grid(&self) -> GridShape {
        self.grid
    }

    /// Tile placed at a position
    pub fn tile_at(&self, position: GridPosition) -> Option<TileId> {
        self.tiles.get((position.row, position.col)).copied()
    }

    /// Distance between the cell at a position and its tile
    pub fn distance_at(&self, position: GridPosition) -> Option<f64> {
        self.distances.get((position.row, position.col)).copied()
    }

    /// Tile ids as a `rows × cols` array
    pub const fn tiles(&self) -> &Array2<TileId> {
        &self.tiles
    }

    /// Every placement in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridPosition, TileId)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| (GridPosition::new(row, col), tile))
    }

    /// Number of placements per tile, indexed by tile id
    pub fn usage_counts(&self, tile_count: usize) -> Vec<usize> {
        let mut counts = vec![0; tile_count];
        for tile in &self.tiles {
            if let Some(count) = counts.get_mut(tile.index()) {
                *count += 1;
            }
        }
        counts
    }

    /// Sum of cell-to-tile distances, a rough quality measure
    pub fn total_distance(&self) -> f64 {
        self.distances.sum()
    }
}
