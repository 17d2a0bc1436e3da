//! Mosaic constants and runtime configuration defaults

// Tile preprocessing: borders of catalog photos rarely show the tile itself
/// Rows cropped from the top of every tile image
pub const MARGIN_TOP: usize = 100;
/// Rows cropped from the bottom of every tile image
pub const MARGIN_BOTTOM: usize = 50;
/// Columns cropped from the left of every tile image
pub const MARGIN_LEFT: usize = 50;
/// Columns cropped from the right of every tile image
pub const MARGIN_RIGHT: usize = MARGIN_LEFT;

/// Maximum number of channels kept from a tile image (alpha is dropped)
pub const MAX_TILE_CHANNELS: usize = 3;

/// Default number of grid rows
pub const DEFAULT_GRID_ROWS: usize = 10;
/// Default number of grid columns
pub const DEFAULT_GRID_COLS: usize = 10;

/// Tiles are consumed from the inventory unless reinsertion is requested
pub const DEFAULT_REINSERTION: bool = false;

/// Operator weights below this magnitude are reported as likely mistakes
pub const NEAR_ZERO_WEIGHT: f64 = 1e-6;

/// Default feature operators as (rows, cols, weight): global mean plus 2x2 quadrants
pub const DEFAULT_OPERATORS: [(usize, usize, f64); 2] = [(1, 1, 1.0), (2, 2, 1.0)];

// Tile catalog CSV layout
/// Column holding the tile name
pub const CATALOG_COL_NAME: &str = "name";
/// Column holding the tile image path
pub const CATALOG_COL_FILENAME: &str = "filename";
/// Column holding the available quantity
pub const CATALOG_COL_QUANTITY: &str = "quantity";

/// Image extensions picked up when a folder is used as the catalog
pub const TILE_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_mosaic";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
