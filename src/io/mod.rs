//! Input/output: catalogs, images, progress, CLI and error handling

/// Tile catalogs from CSV files or image folders
pub mod catalog;
/// Command-line interface and the end-to-end pipeline
pub mod cli;
/// Constants and configuration defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding, mosaic composition and export
pub mod image;
/// Progress bars for long-running phases
pub mod progress;
