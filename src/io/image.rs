//! Image decoding into patches, mosaic composition and PNG export

use std::collections::HashMap;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::algorithm::Assignment;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::grid::CellLayout;
use crate::spatial::patch::ImagePatch;
use crate::spatial::tiles::{TileId, TileInventory};

/// Load an image file as an RGB patch with values in 0–255
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_patch<P: AsRef<Path>>(path: P) -> Result<ImagePatch> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| MosaicError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    patch_from_rgb(&img.to_rgb8())
}

/// Convert an RGB buffer to a 3-channel patch
///
/// # Errors
///
/// Returns an error if the buffer cannot be reshaped
pub fn patch_from_rgb(img: &RgbImage) -> Result<ImagePatch> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let data = Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        img.get_pixel_checked(x as u32, y as u32)
            .and_then(|pixel| pixel.0.get(c).copied())
            .map_or(0.0, f64::from)
    });
    ImagePatch::new(data)
}

/// Convert a patch back to 8-bit RGB
///
/// Patches with fewer than three channels are rendered as grayscale from
/// their first channel. Values are rounded and clamped to 0–255.
pub fn patch_to_rgb(patch: &ImagePatch) -> RgbImage {
    let data = patch.as_array();
    let channels = patch.channels();
    let sample = |y: u32, x: u32, c: usize| {
        let c = if channels >= 3 { c } else { 0 };
        let value = data.get((y as usize, x as usize, c)).copied().unwrap_or(0.0);
        value.round().clamp(0.0, 255.0) as u8
    };
    RgbImage::from_fn(patch.width() as u32, patch.height() as u32, |x, y| {
        Rgb([sample(y, x, 0), sample(y, x, 1), sample(y, x, 2)])
    })
}

/// Compose the mosaic: every assigned tile is resized to the cell size and
/// stenciled at its cell; uncovered edges stay black
///
/// # Errors
///
/// Returns an error if the assignment refers to a tile missing from the
/// inventory or the layout belongs to a different grid
pub fn render_mosaic(
    assignment: &Assignment,
    inventory: &TileInventory,
    layout: &CellLayout,
) -> Result<RgbImage> {
    if assignment.grid() != layout.grid {
        return Err(invalid_parameter(
            "layout",
            &layout.grid,
            &format!("does not match the {} assignment grid", assignment.grid()),
        ));
    }

    let mut canvas = RgbImage::new(layout.canvas_width as u32, layout.canvas_height as u32);
    let mut resized: HashMap<TileId, RgbImage> = HashMap::new();

    for (position, tile_id) in assignment.iter() {
        if !resized.contains_key(&tile_id) {
            let tile = inventory.tile(tile_id)?;
            let image = imageops::resize(
                &patch_to_rgb(tile.image()),
                layout.cell_width as u32,
                layout.cell_height as u32,
                FilterType::CatmullRom,
            );
            resized.insert(tile_id, image);
        }
        if let Some(image) = resized.get(&tile_id) {
            let (y, x) = layout.origin(position);
            imageops::replace(&mut canvas, image, x as i64, y as i64);
        }
    }

    Ok(canvas)
}

/// Save an RGB image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be written
pub fn export_png(img: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
