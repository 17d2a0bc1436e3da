//! Mosaic cells and their private ranking of candidate tiles
//!
//! Each cell sorts every tile by distance once, at construction. Tiles run out
//! while other cells are being assigned, so a cell discovers this lazily: a
//! cursor walks past exhausted tiles whenever the nearest candidate is read.
//! Skipped tiles are never reconsidered by that cell.

use crate::analysis::Coordinator;
use crate::io::error::{MosaicError, Result, illegal_state};
use crate::math::distance::euclidean_distance;
use crate::spatial::grid::GridPosition;
use crate::spatial::patch::ImagePatch;
use crate::spatial::tiles::{Tile, TileId, TileInventory};

/// A tile paired with its distance to a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Candidate tile
    pub tile: TileId,
    /// Euclidean distance between the cell's and the tile's features
    pub distance: f64,
}

/// One grid position of the target image
#[derive(Debug, Clone)]
pub struct Cell {
    position: GridPosition,
    features: Vec<f64>,
    /// Ascending by distance; ties keep catalog order
    candidates: Vec<Candidate>,
    /// Index of the first candidate not yet found exhausted
    cursor: usize,
    assigned: Option<Candidate>,
}

impl Cell {
    /// Create a cell from its (unpreprocessed) image patch
    ///
    /// # Errors
    ///
    /// Returns an error if feature extraction fails or the cell's features
    /// cannot be compared with the tiles' features
    pub fn new(
        position: GridPosition,
        image: &ImagePatch,
        coordinator: &Coordinator,
        inventory: &TileInventory,
    ) -> Result<Self> {
        let features = coordinator.compute(image)?;
        Self::from_features(position, features, inventory)
    }

    /// Create a cell from an already computed feature vector
    ///
    /// # Errors
    ///
    /// Returns an error if the features cannot be compared with the tiles' features
    pub fn from_features(
        position: GridPosition,
        features: Vec<f64>,
        inventory: &TileInventory,
    ) -> Result<Self> {
        let mut candidates = inventory
            .iter()
            .map(|(tile, entry)| {
                euclidean_distance(&features, entry.features())
                    .map(|distance| Candidate { tile, distance })
            })
            .collect::<Result<Vec<_>>>()?;
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        Ok(Self {
            position,
            features,
            candidates,
            cursor: 0,
            assigned: None,
        })
    }

    /// Grid position of the cell
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Feature vector of the cell
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Candidates not yet pruned, nearest first
    pub fn remaining_candidates(&self) -> &[Candidate] {
        self.candidates.get(self.cursor..).unwrap_or(&[])
    }

    /// Tile assigned to the cell, if any
    pub fn assigned_tile(&self) -> Option<TileId> {
        self.assigned.map(|candidate| candidate.tile)
    }

    /// Assigned tile together with its distance
    pub const fn assignment(&self) -> Option<Candidate> {
        self.assigned
    }

    /// Whether a tile has been assigned
    pub const fn has_tile_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    /// Distance between this cell and a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the feature vectors are not comparable
    pub fn distance_to(&self, tile: &Tile) -> Result<f64> {
        euclidean_distance(&self.features, tile.features())
    }

    /// Distance to the nearest tile that is still available
    ///
    /// Exhausted tiles at the front of the ranking are pruned as a side effect.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::ExhaustedCandidates`] if no candidate is available
    pub fn nearest_distance(&mut self, inventory: &TileInventory) -> Result<f64> {
        self.nearest_available_tile_pair(inventory)
            .map(|candidate| candidate.distance)
    }

    /// Nearest available tile and its distance
    ///
    /// Exhausted tiles at the front of the ranking are pruned as a side effect;
    /// the returned tile itself stays at the front.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::ExhaustedCandidates`] if no candidate is available
    pub fn nearest_available_tile_pair(&mut self, inventory: &TileInventory) -> Result<Candidate> {
        while let Some(&candidate) = self.candidates.get(self.cursor) {
            if inventory.is_available(candidate.tile) {
                return Ok(candidate);
            }
            log::trace!(
                "cell {} drops exhausted tile {}",
                self.position,
                candidate.tile
            );
            self.cursor += 1;
        }
        Err(MosaicError::ExhaustedCandidates {
            position: self.position,
        })
    }

    /// Assign the front candidate to this cell
    ///
    /// The front must have been validated by a preceding nearest query. With
    /// `decrease_availability` the tile's quantity is consumed; without it the
    /// tile stays available for reuse.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is already assigned, has no candidates left,
    /// or its front candidate is no longer available
    pub fn assign_tile(
        &mut self,
        inventory: &mut TileInventory,
        decrease_availability: bool,
    ) -> Result<Candidate> {
        if let Some(existing) = self.assigned {
            return Err(illegal_state(&format!(
                "cell {} is already assigned to tile {}",
                self.position, existing.tile
            )));
        }
        let candidate = self
            .candidates
            .get(self.cursor)
            .copied()
            .ok_or(MosaicError::ExhaustedCandidates {
                position: self.position,
            })?;
        if !inventory.is_available(candidate.tile) {
            return Err(illegal_state(&format!(
                "tile {} is not available for cell {}",
                candidate.tile, self.position
            )));
        }

        if decrease_availability {
            inventory.use_tile(candidate.tile, 1)?;
        }
        self.assigned = Some(candidate);
        Ok(candidate)
    }
}
