//! Command-line interface: build a photomosaic from a target image and a tile catalog

use crate::algorithm::{Cell, Mosaic};
use crate::analysis::{Coordinator, Operator};
use crate::io::catalog::{TileFactory, read_catalog, scan_tile_folder};
use crate::io::configuration::{
    DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, DEFAULT_OPERATORS, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_png, load_patch, render_mosaic};
use crate::io::progress::ProgressManager;
use crate::spatial::grid::{CellLayout, GridShape, slice_cells};
use crate::spatial::patch::TileMargins;
use crate::spatial::tiles::TileInventory;
use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "greedymosaic")]
#[command(
    author,
    version,
    about = "Compose a photomosaic from a limited inventory of tiles"
)]
/// Command-line arguments for the mosaic tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Target image to reproduce
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// CSV catalog with name, filename and quantity columns
    #[arg(long, value_name = "CSV", required_unless_present = "tiles_dir")]
    pub catalog: Option<PathBuf>,

    /// Folder holding the tile images (default: the catalog's folder; every
    /// image is one tile when no catalog is given)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub tiles_dir: Option<PathBuf>,

    /// Number of grid rows
    #[arg(short, long, default_value_t = DEFAULT_GRID_ROWS)]
    pub rows: usize,

    /// Number of grid columns
    #[arg(short, long, default_value_t = DEFAULT_GRID_COLS)]
    pub cols: usize,

    /// Reuse tiles without limit instead of consuming their quantity
    #[arg(short = 'R', long)]
    pub reinsertion: bool,

    /// Feature operator as [avg:]ROWSxCOLS[:WEIGHT]; repeat to combine (default: 1x1 and 2x2)
    #[arg(short = 'O', long = "operator", value_name = "OPERATOR")]
    pub operators: Vec<Operator>,

    /// Use tile images as they are, without cropping catalog margins
    #[arg(long)]
    pub no_margins: bool,

    /// Output PNG path (default: <TARGET>_mosaic.png)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suppress progress output and informational logs
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every greedy step
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Crop margins applied to tile images
    pub const fn margins(&self) -> TileMargins {
        if self.no_margins {
            TileMargins::NONE
        } else {
            TileMargins::DEFAULT
        }
    }

    /// Requested operators, or the default set when none were given
    ///
    /// # Errors
    ///
    /// Returns an error if a default operator is invalid
    pub fn operators_or_default(&self) -> Result<Vec<Operator>> {
        if self.operators.is_empty() {
            DEFAULT_OPERATORS
                .iter()
                .map(|&(rows, cols, weight)| Operator::average_sampler(rows, cols, weight))
                .collect()
        } else {
            Ok(self.operators.clone())
        }
    }

    /// Where the rendered mosaic is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.target))
    }

    fn default_output_path(target: &Path) -> PathBuf {
        let stem = target.file_stem().unwrap_or_default();
        let output_name = format!("{}{}.png", stem.to_string_lossy(), OUTPUT_SUFFIX);

        if let Some(parent) = target.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Runs the whole pipeline: catalog, cells, greedy assignment, rendering
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the mosaic and write it to disk, returning the output path
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be read, the configuration is
    /// invalid, or the tile inventory is too small for the grid
    pub fn process(&mut self) -> Result<PathBuf> {
        let coordinator = Coordinator::from_operators(self.cli.operators_or_default()?)?;
        log::info!(
            "Feature operators: {}",
            coordinator
                .operators()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let inventory = self.load_inventory(&coordinator)?;
        let total = inventory.total_quantity();
        log::info!(
            "{} tiles, total quantity {total}: a square mosaic would be about {:.1} cells per side",
            inventory.len(),
            (total as f64).sqrt()
        );

        let target = load_patch(&self.cli.target)?;
        let grid = GridShape::new(self.cli.rows, self.cli.cols)?;
        let layout = CellLayout::for_target(grid, target.height(), target.width())?;
        log::info!(
            "Grid {grid}: cells of {}x{} pixels",
            layout.cell_height,
            layout.cell_width
        );

        let cell_patches = slice_cells(&target, grid)?;
        self.start_phase("Cells", cell_patches.len());
        let mut cells = Vec::with_capacity(cell_patches.len());
        for (position, patch) in &cell_patches {
            cells.push(Cell::new(*position, patch, &coordinator, &inventory)?);
            self.advance();
        }

        let mut mosaic = Mosaic::from_cells(grid, cells, inventory, self.cli.reinsertion)?;
        self.start_phase("Assigning", grid.cell_count());
        while mosaic.step()?.is_some() {
            self.advance();
        }
        let assignment = mosaic.assignment()?;
        log::info!(
            "Assigned {} cells, total distance {:.1}",
            grid.cell_count(),
            assignment.total_distance()
        );

        let canvas = render_mosaic(&assignment, mosaic.inventory(), &layout)?;
        let output_path = self.cli.output_path();
        export_png(&canvas, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        Ok(output_path)
    }

    fn load_inventory(&mut self, coordinator: &Coordinator) -> Result<TileInventory> {
        let tiles_dir = self.cli.tiles_dir.clone().or_else(|| {
            self.cli
                .catalog
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        });
        let entries = match (&self.cli.catalog, &tiles_dir) {
            (Some(catalog), _) => read_catalog(catalog)?,
            (None, Some(folder)) => scan_tile_folder(folder)?,
            (None, None) => Vec::new(),
        };

        let factory = TileFactory::new(coordinator)?.with_margins(self.cli.margins());
        self.start_phase("Tiles", entries.len());
        let mut inventory = TileInventory::new();
        for entry in &entries {
            log::debug!(
                "Tile \"{}\", file <{}>, quantity {}",
                entry.name,
                entry.filename.display(),
                entry.quantity
            );
            inventory.push(factory.create_tile(entry, tiles_dir.as_deref())?)?;
            self.advance();
        }
        Ok(inventory)
    }

    fn start_phase(&mut self, label: &str, len: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase(label, len);
        }
    }

    fn advance(&self) {
        if let Some(ref pm) = self.progress_manager {
            pm.advance(1);
        }
    }
}
