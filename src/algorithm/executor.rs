//! Greedy global assignment of tiles to cells
//!
//! Every step refreshes the nearest available distance of each unassigned
//! cell and commits the single closest (cell, tile) pair. Resolving the most
//! confident match first keeps a cell with many good options from taking a
//! tile that a cell with few options depends on. This is not an optimal
//! assignment; it is O(C²) distance refreshes per run.

use crate::algorithm::assignment::Assignment;
use crate::algorithm::cell::{Candidate, Cell};
use crate::algorithm::pool::CellPool;
use crate::analysis::Coordinator;
use crate::io::error::{Result, configuration_error, illegal_state};
use crate::spatial::grid::{GridPosition, GridShape, slice_cells};
use crate::spatial::patch::ImagePatch;
use crate::spatial::tiles::TileInventory;

/// Cell selected by one greedy step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    /// Position of the committed cell
    pub position: GridPosition,
    /// Tile given to the cell and its distance
    pub candidate: Candidate,
}

/// A mosaic under construction: cells, shared inventory and the greedy engine
#[derive(Debug, Clone)]
pub struct Mosaic {
    grid: GridShape,
    cells: Vec<Cell>,
    inventory: TileInventory,
    pool: CellPool,
    reinsertion: bool,
    iteration: usize,
}

impl Mosaic {
    /// Slice a target image into cells and rank every tile for each of them
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory is empty, the grid is finer than the
    /// target, or feature extraction fails for a cell
    pub fn new(
        target: &ImagePatch,
        coordinator: &Coordinator,
        inventory: TileInventory,
        grid: GridShape,
        reinsertion: bool,
    ) -> Result<Self> {
        if inventory.is_empty() {
            return Err(configuration_error(&"cannot create a mosaic without tiles"));
        }
        let cells = slice_cells(target, grid)?
            .into_iter()
            .map(|(position, patch)| Cell::new(position, &patch, coordinator, &inventory))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(grid, cells, inventory, reinsertion)
    }

    /// Assemble a mosaic from cells built elsewhere
    ///
    /// Cells keep the order given here; it decides ties between equally
    /// distant cells.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory is empty, the number of cells does not
    /// match the grid, or a cell is already assigned
    pub fn from_cells(
        grid: GridShape,
        cells: Vec<Cell>,
        inventory: TileInventory,
        reinsertion: bool,
    ) -> Result<Self> {
        if inventory.is_empty() {
            return Err(configuration_error(&"cannot create a mosaic without tiles"));
        }
        if cells.len() != grid.cell_count() {
            return Err(configuration_error(&format!(
                "a {grid} grid needs {} cells, got {}",
                grid.cell_count(),
                cells.len()
            )));
        }
        if let Some(cell) = cells.iter().find(|cell| cell.has_tile_assigned()) {
            return Err(illegal_state(&format!(
                "cell {} is already assigned",
                cell.position()
            )));
        }

        let pool = CellPool::full(cells.len());
        Ok(Self {
            grid,
            cells,
            inventory,
            pool,
            reinsertion,
            iteration: 0,
        })
    }

    /// Commit the globally closest (cell, tile) pair
    ///
    /// Returns `None` once every cell is assigned.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::ExhaustedCandidates`](crate::MosaicError::ExhaustedCandidates)
    /// if some unassigned cell has no available tile left; the run cannot be
    /// completed with this inventory
    pub fn step(&mut self) -> Result<Option<Commit>> {
        let Some(index) = self.select_next()? else {
            return Ok(None);
        };
        self.pool.remove(index);

        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| illegal_state(&format!("cell index {index} out of range")))?;
        let candidate = cell.assign_tile(&mut self.inventory, !self.reinsertion)?;
        let position = cell.position();
        self.iteration += 1;

        log::debug!(
            "step {}: cell {position} <- tile {} (distance {:.3})",
            self.iteration,
            candidate.tile,
            candidate.distance
        );
        Ok(Some(Commit {
            position,
            candidate,
        }))
    }

    /// Assign a tile to every remaining cell
    ///
    /// # Errors
    ///
    /// Fails as soon as any step fails; no partial assignment is returned
    pub fn assign_tiles(&mut self) -> Result<Assignment> {
        while self.step()?.is_some() {}
        self.assignment()
    }

    /// The final mapping
    ///
    /// # Errors
    ///
    /// Returns an error if some cells are still unassigned
    pub fn assignment(&self) -> Result<Assignment> {
        if !self.pool.is_empty() {
            return Err(illegal_state(&format!(
                "{} cells are still unassigned",
                self.pool.len()
            )));
        }
        Assignment::from_cells(self.grid, &self.cells)
    }

    /// Find the unassigned cell with the smallest nearest-available distance
    ///
    /// Cells are scanned in creation order and only a strictly smaller distance
    /// replaces the current best.
    fn select_next(&mut self) -> Result<Option<usize>> {
        let mut best: Option<(usize, f64)> = None;
        for index in self.pool.iter() {
            let cell = self
                .cells
                .get_mut(index)
                .ok_or_else(|| illegal_state(&format!("cell index {index} out of range")))?;
            let distance = cell.nearest_distance(&self.inventory)?;
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((index, distance));
            }
        }
        Ok(best.map(|(index, _)| index))
    }

    /// Whether every cell has a tile
    pub fn is_fully_assigned(&self) -> bool {
        self.pool.is_empty()
    }

    /// Number of cells still waiting for a tile
    pub fn unassigned_count(&self) -> usize {
        self.pool.len()
    }

    /// Number of committed steps
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Grid shape of the mosaic
    pub const fn grid(&self) -> GridShape {
        self.grid
    }

    /// Whether tiles are reused without consuming quantity
    pub const fn reinsertion(&self) -> bool {
        self.reinsertion
    }

    /// Cells in creation order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Tile inventory with current remaining quantities
    pub const fn inventory(&self) -> &TileInventory {
        &self.inventory
    }
}
