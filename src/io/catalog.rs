//! Tile catalogs: CSV inventories or plain image folders
//!
//! A CSV catalog has a header naming the `name`, `filename` and `quantity`
//! columns (in any order) followed by one row per tile design.

use std::path::{Path, PathBuf};

use crate::analysis::Coordinator;
use crate::io::configuration::{
    CATALOG_COL_FILENAME, CATALOG_COL_NAME, CATALOG_COL_QUANTITY, TILE_IMAGE_EXTENSIONS,
};
use crate::io::error::{MosaicError, Result, configuration_error, invalid_parameter};
use crate::io::image::load_patch;
use crate::spatial::patch::TileMargins;
use crate::spatial::tiles::{Tile, TileInventory};

/// One tile design listed in a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Unique tile name
    pub name: String,
    /// Image path, relative to the tile folder when one is given
    pub filename: PathBuf,
    /// Number of copies available
    pub quantity: usize,
}

/// Read a CSV catalog from disk
///
/// # Errors
///
/// Returns an error if the file is not a `.csv`, cannot be read, or has a
/// malformed header or row
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>> {
    if path.extension().and_then(|s| s.to_str()) != Some("csv") {
        return Err(invalid_parameter(
            "catalog",
            &path.display(),
            &"tile catalog must be a CSV file",
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "read catalog",
        source: e,
    })?;
    parse_catalog(&content, path)
}

/// Parse CSV catalog content; `source` is only used in error messages
///
/// # Errors
///
/// Returns an error if a required column is missing, a row has too few
/// fields, or a quantity is not a positive integer
pub fn parse_catalog(content: &str, source: &Path) -> Result<Vec<CatalogEntry>> {
    let catalog_error = |line: usize, reason: String| MosaicError::Catalog {
        path: source.to_path_buf(),
        line,
        reason,
    };

    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| catalog_error(1, "missing header row".to_string()))?;
    let unterminated = |line: usize| catalog_error(line, "unterminated quoted field".to_string());
    let columns = split_fields(header).ok_or_else(|| unterminated(header_line))?;
    let column = |name: &str| {
        columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
            .ok_or_else(|| catalog_error(header_line, format!("missing column \"{name}\"")))
    };
    let name_col = column(CATALOG_COL_NAME)?;
    let filename_col = column(CATALOG_COL_FILENAME)?;
    let quantity_col = column(CATALOG_COL_QUANTITY)?;

    lines
        .map(|(line, row)| {
            let fields = split_fields(row).ok_or_else(|| unterminated(line))?;
            let field = |index: usize, name: &str| {
                fields
                    .get(index)
                    .filter(|value| !value.is_empty())
                    .cloned()
                    .ok_or_else(|| catalog_error(line, format!("missing value for \"{name}\"")))
            };
            let name = field(name_col, CATALOG_COL_NAME)?;
            let filename = field(filename_col, CATALOG_COL_FILENAME)?;
            let quantity_text = field(quantity_col, CATALOG_COL_QUANTITY)?;
            let quantity = quantity_text
                .parse::<usize>()
                .ok()
                .filter(|&quantity| quantity > 0)
                .ok_or_else(|| {
                    catalog_error(
                        line,
                        format!("quantity \"{quantity_text}\" is not a positive integer"),
                    )
                })?;
            Ok(CatalogEntry {
                name,
                filename: PathBuf::from(filename),
                quantity,
            })
        })
        .collect()
}

/// Split one CSV row, honoring double-quoted fields
///
/// Quoted fields may contain commas and `""` escapes. Returns `None` when a
/// quote is left open, since fields never span lines in a catalog.
fn split_fields(row: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    if in_quotes {
        return None;
    }
    fields.push(field.trim().to_string());
    Some(fields)
}

/// List every tile image of a folder with a quantity of one
///
/// Tiles are named after the file stem and sorted by name.
///
/// # Errors
///
/// Returns an error if the folder cannot be read
pub fn scan_tile_folder(folder: &Path) -> Result<Vec<CatalogEntry>> {
    let read_error = |e| MosaicError::FileSystem {
        path: folder.to_path_buf(),
        operation: "read tile folder",
        source: e,
    };

    let mut entries = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        let is_image = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| {
                TILE_IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if !is_image {
            continue;
        }
        let (Some(stem), Some(file_name)) = (path.file_stem(), path.file_name()) else {
            continue;
        };
        entries.push(CatalogEntry {
            name: stem.to_string_lossy().to_string(),
            filename: PathBuf::from(file_name),
            quantity: 1,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Builds tiles from catalog entries with a shared feature extractor
pub struct TileFactory<'a> {
    coordinator: &'a Coordinator,
    margins: TileMargins,
}

impl<'a> TileFactory<'a> {
    /// Create a factory cropping the default catalog margins
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinator is not finalized
    pub fn new(coordinator: &'a Coordinator) -> Result<Self> {
        if !coordinator.is_finalized() {
            return Err(configuration_error(
                &"tiles can only be created with a finalized coordinator",
            ));
        }
        Ok(Self {
            coordinator,
            margins: TileMargins::DEFAULT,
        })
    }

    /// Use different crop margins
    #[must_use]
    pub const fn with_margins(mut self, margins: TileMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Load the image of one entry and build its tile
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded or the tile is invalid
    pub fn create_tile(&self, entry: &CatalogEntry, tiles_folder: Option<&Path>) -> Result<Tile> {
        let path = tiles_folder.map_or_else(
            || entry.filename.clone(),
            |folder| folder.join(&entry.filename),
        );
        let image = load_patch(&path)?;
        Tile::with_margins(
            entry.name.clone(),
            Some(image),
            self.coordinator,
            entry.quantity,
            self.margins,
        )
    }

    /// Build an inventory from all entries, in order
    ///
    /// # Errors
    ///
    /// Returns an error if any tile fails to build or names repeat
    pub fn build(
        &self,
        entries: &[CatalogEntry],
        tiles_folder: Option<&Path>,
    ) -> Result<TileInventory> {
        let mut inventory = TileInventory::new();
        for entry in entries {
            inventory.push(self.create_tile(entry, tiles_folder)?)?;
        }
        Ok(inventory)
    }
}
