//! Pixel patches: the H×W×C numeric arrays every feature is computed from
//!
//! Pixel values are kept as `f64` in the range of the source encoding
//! (0–255 for 8-bit images) so averaged colors stay directly comparable.

use std::ops::Range;

use ndarray::{Array3, ArrayView3, Axis, Slice};
use num_traits::ToPrimitive;

use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Number of rows and columns removed from each edge of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMargins {
    /// Rows removed from the top edge
    pub top: usize,
    /// Rows removed from the bottom edge
    pub bottom: usize,
    /// Columns removed from the left edge
    pub left: usize,
    /// Columns removed from the right edge
    pub right: usize,
}

impl TileMargins {
    /// Margins used for catalog photographs
    pub const DEFAULT: Self = Self {
        top: crate::io::configuration::MARGIN_TOP,
        bottom: crate::io::configuration::MARGIN_BOTTOM,
        left: crate::io::configuration::MARGIN_LEFT,
        right: crate::io::configuration::MARGIN_RIGHT,
    };

    /// No cropping, for images that are already tight around the tile
    pub const NONE: Self = Self {
        top: 0,
        bottom: 0,
        left: 0,
        right: 0,
    };
}

impl Default for TileMargins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// An owned image patch with at least one channel
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePatch {
    data: Array3<f64>,
}

impl ImagePatch {
    /// Wrap an `(height, width, channels)` array
    ///
    /// # Errors
    ///
    /// Returns an error if the array has no channels
    pub fn new(data: Array3<f64>) -> Result<Self> {
        let (_, _, channels) = data.dim();
        if channels == 0 {
            return Err(invalid_parameter(
                "channels",
                &channels,
                &"an image patch needs at least one channel",
            ));
        }
        Ok(Self { data })
    }

    /// Build a patch from row-major pixel values of any numeric type
    ///
    /// # Errors
    ///
    /// Returns an error if the value count does not match the shape, a value
    /// cannot be represented as `f64`, or the shape has no channels
    pub fn from_shape_vec<T: ToPrimitive>(
        shape: (usize, usize, usize),
        values: Vec<T>,
    ) -> Result<Self> {
        let converted = values
            .into_iter()
            .map(|v| v.to_f64())
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| {
                invalid_parameter("values", &"<pixel>", &"pixel value is not representable")
            })?;
        let data = Array3::from_shape_vec(shape, converted).map_err(|e| {
            invalid_parameter("shape", &format!("{shape:?}"), &e)
        })?;
        Self::new(data)
    }

    /// A patch where every pixel has the same color
    ///
    /// # Errors
    ///
    /// Returns an error if `color` is empty
    pub fn uniform(height: usize, width: usize, color: &[f64]) -> Result<Self> {
        let channels = color.len();
        let data = Array3::from_shape_fn((height, width, channels), |(_, _, c)| {
            color.get(c).copied().unwrap_or(0.0)
        });
        Self::new(data)
    }

    /// Patch height in pixels
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Patch width in pixels
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Number of channels per pixel
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// `(height, width, channels)`
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Underlying pixel array
    pub const fn as_array(&self) -> &Array3<f64> {
        &self.data
    }

    /// Borrow a rectangular region, or `None` if it leaves the patch
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> Option<ArrayView3<'_, f64>> {
        let (height, width, _) = self.data.dim();
        if rows.start > rows.end || cols.start > cols.end || rows.end > height || cols.end > width
        {
            return None;
        }
        let mut view = self.data.view();
        view.slice_axis_inplace(Axis(0), Slice::from(rows));
        view.slice_axis_inplace(Axis(1), Slice::from(cols));
        Some(view)
    }

    /// Copy a rectangular region into a new patch
    ///
    /// # Errors
    ///
    /// Returns an error if the region is empty or leaves the patch
    pub fn sub_patch(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self> {
        let degenerate = MosaicError::DegenerateGeometry {
            height: self.height(),
            width: self.width(),
            rows: 1,
            cols: 1,
        };
        if rows.is_empty() || cols.is_empty() {
            return Err(degenerate);
        }
        let view = self.region(rows, cols).ok_or(degenerate)?;
        Self::new(view.to_owned())
    }

    /// Remove fixed margins from every edge
    ///
    /// # Errors
    ///
    /// Returns an error if the margins leave no pixels
    pub fn crop(&self, margins: TileMargins) -> Result<Self> {
        let bottom = self.height().saturating_sub(margins.bottom);
        let right = self.width().saturating_sub(margins.right);
        self.sub_patch(margins.top..bottom, margins.left..right)
    }

    /// Keep at most the first `max_channels` channels
    #[must_use]
    pub fn limit_channels(&self, max_channels: usize) -> Self {
        let keep = self.channels().min(max_channels.max(1));
        let mut view = self.data.view();
        view.slice_axis_inplace(Axis(2), Slice::from(..keep));
        Self {
            data: view.to_owned(),
        }
    }
}
