//! Error types for feature extraction, tile matching and file handling

use std::fmt;
use std::path::PathBuf;

use crate::spatial::grid::GridPosition;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A tile catalog row could not be interpreted
    Catalog {
        /// Catalog file being read
        path: PathBuf,
        /// 1-based line number of the offending row
        line: usize,
        /// Explanation of what is wrong with the row
        reason: String,
    },

    /// Components were wired together in a way that cannot work
    ///
    /// Covers computing with an unfinalized coordinator, mutating a finalized one,
    /// constructing a tile without an image or with no quantity, and comparing
    /// feature vectors produced by different configurations.
    Configuration {
        /// Description of the misconfiguration
        reason: String,
    },

    /// A configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A patch is too small for the requested subdivision
    DegenerateGeometry {
        /// Height of the patch being divided
        height: usize,
        /// Width of the patch being divided
        width: usize,
        /// Requested number of row divisions
        rows: usize,
        /// Requested number of column divisions
        cols: usize,
    },

    /// Every candidate tile of a cell has run out
    ///
    /// The tile inventory is too small for the chosen grid. Aborts the whole run.
    ExhaustedCandidates {
        /// Cell whose candidate list emptied
        position: GridPosition,
    },

    /// An operation was requested that the current state does not allow
    IllegalState {
        /// Description of the violated precondition
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Catalog { path, line, reason } => {
                write!(
                    f,
                    "Invalid tile catalog '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::Configuration { reason } => {
                write!(f, "Configuration error: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateGeometry {
                height,
                width,
                rows,
                cols,
            } => {
                write!(
                    f,
                    "Cannot divide a {height}x{width} patch into {rows}x{cols} non-empty regions"
                )
            }
            Self::ExhaustedCandidates { position } => {
                write!(
                    f,
                    "No available tile left for cell {position}: not enough tile inventory for this grid"
                )
            }
            Self::IllegalState { reason } => {
                write!(f, "Illegal state: {reason}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration error
pub fn configuration_error(reason: &impl ToString) -> MosaicError {
    MosaicError::Configuration {
        reason: reason.to_string(),
    }
}

/// Create an illegal state error
pub fn illegal_state(reason: &impl ToString) -> MosaicError {
    MosaicError::IllegalState {
        reason: reason.to_string(),
    }
}
