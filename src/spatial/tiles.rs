//! Tiles and the shared inventory that tracks how many of each remain
//!
//! A [`Tile`] is immutable once built: name, feature vector and the cropped
//! image used for rendering. Remaining quantities live in a single
//! [`TileInventory`] table keyed by [`TileId`], which is the only state the
//! assignment engine writes to.

use std::collections::HashSet;
use std::fmt;

use crate::analysis::Coordinator;
use crate::io::configuration::MAX_TILE_CHANNELS;
use crate::io::error::{MosaicError, Result, configuration_error, illegal_state};
use crate::spatial::patch::{ImagePatch, TileMargins};

/// Index of a tile inside its inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileId(usize);

impl TileId {
    /// Position of the tile in catalog order
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One tile design of the catalog
#[derive(Debug, Clone)]
pub struct Tile {
    name: String,
    features: Vec<f64>,
    image: ImagePatch,
    initial_quantity: usize,
}

impl Tile {
    /// Create a tile, cropping the default catalog margins from its image
    ///
    /// # Errors
    ///
    /// See [`Tile::with_margins`]
    pub fn new(
        name: impl Into<String>,
        image: Option<ImagePatch>,
        coordinator: &Coordinator,
        quantity: usize,
    ) -> Result<Self> {
        Self::with_margins(name, image, coordinator, quantity, TileMargins::DEFAULT)
    }

    /// Create a tile with explicit crop margins
    ///
    /// # Errors
    ///
    /// Returns an error if the image is absent, the quantity is zero, the
    /// margins leave no pixels, or feature extraction fails
    pub fn with_margins(
        name: impl Into<String>,
        image: Option<ImagePatch>,
        coordinator: &Coordinator,
        quantity: usize,
        margins: TileMargins,
    ) -> Result<Self> {
        let name = name.into();
        let image =
            image.ok_or_else(|| configuration_error(&format!("no image for tile \"{name}\"")))?;
        if quantity < 1 {
            return Err(configuration_error(&format!(
                "tile \"{name}\" must have a positive quantity"
            )));
        }

        let image = Self::preprocess(&image, margins)?;
        let features = coordinator.compute(&image)?;

        Ok(Self {
            name,
            features,
            image,
            initial_quantity: quantity,
        })
    }

    /// Crop the margins and drop channels beyond RGB
    ///
    /// # Errors
    ///
    /// Returns an error if the margins leave no pixels
    pub fn preprocess(image: &ImagePatch, margins: TileMargins) -> Result<ImagePatch> {
        Ok(image.crop(margins)?.limit_channels(MAX_TILE_CHANNELS))
    }

    /// Name identifying the tile within a run
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feature vector computed from the preprocessed image
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Preprocessed image used for rendering
    pub const fn image(&self) -> &ImagePatch {
        &self.image
    }

    /// Quantity the tile was created with
    pub const fn initial_quantity(&self) -> usize {
        self.initial_quantity
    }
}

/// All tiles of a run together with their remaining quantities
#[derive(Debug, Clone, Default)]
pub struct TileInventory {
    tiles: Vec<Tile>,
    remaining: Vec<usize>,
    names: HashSet<String>,
}

impl TileInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from tiles in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if two tiles share a name
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let mut inventory = Self::new();
        for tile in tiles {
            inventory.push(tile)?;
        }
        Ok(inventory)
    }

    /// Add a tile with its full initial quantity
    ///
    /// # Errors
    ///
    /// Returns an error if a tile with the same name is already present
    pub fn push(&mut self, tile: Tile) -> Result<TileId> {
        if !self.names.insert(tile.name.clone()) {
            return Err(configuration_error(&format!(
                "duplicate tile name \"{}\"",
                tile.name
            )));
        }
        let id = TileId(self.tiles.len());
        self.remaining.push(tile.initial_quantity);
        self.tiles.push(tile);
        Ok(id)
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether there are no tiles at all
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look up a tile
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// Look up a tile, failing for unknown ids
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this inventory
    pub fn tile(&self, id: TileId) -> Result<&Tile> {
        self.get(id).ok_or_else(|| Self::unknown(id))
    }

    /// Find a tile by name
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.tiles
            .iter()
            .position(|tile| tile.name == name)
            .map(TileId)
    }

    /// Tiles with their ids, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId(index), tile))
    }

    /// Remaining quantity of a tile (zero for unknown ids)
    pub fn quantity(&self, id: TileId) -> usize {
        self.remaining.get(id.0).copied().unwrap_or(0)
    }

    /// Whether at least one copy of the tile remains
    pub fn is_available(&self, id: TileId) -> bool {
        self.quantity(id) > 0
    }

    /// Sum of remaining quantities over all tiles
    pub fn total_quantity(&self) -> usize {
        self.remaining.iter().sum()
    }

    /// Consume `amount` copies of a tile
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or fewer than `amount` copies remain
    pub fn use_tile(&mut self, id: TileId, amount: usize) -> Result<()> {
        let name = self.tile(id)?.name.clone();
        let remaining = self
            .remaining
            .get_mut(id.0)
            .ok_or_else(|| Self::unknown(id))?;
        if *remaining < amount {
            return Err(illegal_state(&format!(
                "cannot use {amount} of tile \"{name}\": only {remaining} available"
            )));
        }
        *remaining -= amount;
        Ok(())
    }

    fn unknown(id: TileId) -> MosaicError {
        illegal_state(&format!("unknown tile {id}"))
    }
}
