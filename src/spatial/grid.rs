//! Mosaic grid geometry: positions, shapes and slicing of the target image

use std::fmt;

use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::patch::ImagePatch;

/// A cell position as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridPosition {
    /// Zero-based row
    pub row: usize,
    /// Zero-based column
    pub col: usize,
}

impl GridPosition {
    /// Create a position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Number of rows and columns of the mosaic grid (both positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    rows: usize,
    cols: usize,
}

impl GridShape {
    /// Create a grid shape
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be positive"));
        }
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"must be positive"));
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the position lies inside the grid
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// Row-major index of a position
    pub const fn index_of(&self, position: GridPosition) -> Option<usize> {
        if self.contains(position) {
            Some(position.row * self.cols + position.col)
        } else {
            None
        }
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = GridPosition> + use<> {
        let cols = self.cols;
        (0..self.cell_count()).map(move |index| GridPosition::new(index / cols, index % cols))
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Pixel layout of a grid laid over a target image
///
/// Cells have the integer-divided size of the target; any remainder at the
/// bottom and right edges is not covered by a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    /// Grid the layout belongs to
    pub grid: GridShape,
    /// Height of every cell in pixels
    pub cell_height: usize,
    /// Width of every cell in pixels
    pub cell_width: usize,
    /// Height of the full target image
    pub canvas_height: usize,
    /// Width of the full target image
    pub canvas_width: usize,
}

impl CellLayout {
    /// Compute the layout of `grid` over an image of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is finer than the image in either direction
    pub fn for_target(grid: GridShape, height: usize, width: usize) -> Result<Self> {
        let cell_height = height / grid.rows;
        let cell_width = width / grid.cols;
        if cell_height == 0 || cell_width == 0 {
            return Err(MosaicError::DegenerateGeometry {
                height,
                width,
                rows: grid.rows,
                cols: grid.cols,
            });
        }
        Ok(Self {
            grid,
            cell_height,
            cell_width,
            canvas_height: height,
            canvas_width: width,
        })
    }

    /// Top-left pixel (y, x) of a cell
    pub const fn origin(&self, position: GridPosition) -> (usize, usize) {
        (
            position.row * self.cell_height,
            position.col * self.cell_width,
        )
    }
}

/// Cut a target image into one patch per grid position, in row-major order
///
/// # Errors
///
/// Returns an error if the grid is finer than the image
pub fn slice_cells(
    target: &ImagePatch,
    grid: GridShape,
) -> Result<Vec<(GridPosition, ImagePatch)>> {
    let layout = CellLayout::for_target(grid, target.height(), target.width())?;
    grid.positions()
        .map(|position| {
            let (y, x) = layout.origin(position);
            let patch = target.sub_patch(
                y..y + layout.cell_height,
                x..x + layout.cell_width,
            )?;
            Ok((position, patch))
        })
        .collect()
}
