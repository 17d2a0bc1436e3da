//! Feature operators: strategies that turn an image patch into numbers
//!
//! The set of strategies is closed. Each operator produces a fixed-length
//! vector for a given channel count, scaled by its weight so that several
//! operators can be balanced against each other after concatenation.

use std::fmt;
use std::str::FromStr;

use ndarray::Axis;

use crate::io::configuration::NEAR_ZERO_WEIGHT;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::patch::ImagePatch;

/// Average color over a `rows × cols` subdivision of the patch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageSampler {
    rows: usize,
    cols: usize,
    weight: f64,
}

impl AverageSampler {
    /// Create a sampler for the given sub-grid and weight
    ///
    /// A weight very close to zero is accepted but logged, since it makes the
    /// operator contribute almost nothing to distances.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` or `cols` is zero, or the weight is zero or
    /// not finite
    pub fn new(rows: usize, cols: usize, weight: f64) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be positive"));
        }
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"must be positive"));
        }
        if !weight.is_finite() || weight == 0.0 {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &"must be a finite, nonzero number",
            ));
        }
        if weight.abs() < NEAR_ZERO_WEIGHT {
            log::warn!(
                "average sampler {rows}x{cols} has near-zero weight {weight}; it will barely affect matching"
            );
        }
        Ok(Self { rows, cols, weight })
    }

    /// Sub-grid shape as (rows, cols)
    pub const fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Scale applied to every output value
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Length of the output for a patch with `channels` channels
    pub const fn output_len(&self, channels: usize) -> usize {
        self.rows * self.cols * channels
    }

    /// Compute the weighted mean color of every sub-region, row-major
    ///
    /// Sub-regions use the integer-divided patch size; leftover pixels at the
    /// bottom and right edges are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a sub-region would have zero height or width
    pub fn compute(&self, patch: &ImagePatch) -> Result<Vec<f64>> {
        let (height, width, channels) = patch.dim();
        let degenerate = MosaicError::DegenerateGeometry {
            height,
            width,
            rows: self.rows,
            cols: self.cols,
        };
        let region_height = height / self.rows;
        let region_width = width / self.cols;
        if region_height == 0 || region_width == 0 {
            return Err(degenerate);
        }

        let mut coords = Vec::with_capacity(self.output_len(channels));
        for i in 0..self.rows {
            let rows = i * region_height..(i + 1) * region_height;
            for j in 0..self.cols {
                let cols = j * region_width..(j + 1) * region_width;
                let Some(region) = patch.region(rows.clone(), cols) else {
                    return Err(degenerate);
                };
                for channel in region.axis_iter(Axis(2)) {
                    let Some(mean) = channel.mean() else {
                        return Err(degenerate);
                    };
                    coords.push(mean * self.weight);
                }
            }
        }
        Ok(coords)
    }
}

/// A feature extraction strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    /// Per-region average color
    AverageSampler(AverageSampler),
}

impl Operator {
    /// Shorthand for an [`AverageSampler`] operator
    ///
    /// # Errors
    ///
    /// Returns an error if the sampler parameters are invalid
    pub fn average_sampler(rows: usize, cols: usize, weight: f64) -> Result<Self> {
        AverageSampler::new(rows, cols, weight).map(Self::AverageSampler)
    }

    /// Weight of the operator
    pub const fn weight(&self) -> f64 {
        match self {
            Self::AverageSampler(sampler) => sampler.weight(),
        }
    }

    /// Length of the output for a patch with `channels` channels
    pub const fn output_len(&self, channels: usize) -> usize {
        match self {
            Self::AverageSampler(sampler) => sampler.output_len(channels),
        }
    }

    /// Apply the operator to a patch
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying strategy
    pub fn compute(&self, patch: &ImagePatch) -> Result<Vec<f64>> {
        match self {
            Self::AverageSampler(sampler) => sampler.compute(patch),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AverageSampler(sampler) => {
                let (rows, cols) = sampler.grid();
                write!(f, "avg:{rows}x{cols}:{}", sampler.weight())
            }
        }
    }
}

/// Parses `[avg:]ROWSxCOLS[:WEIGHT]`, e.g. `2x2`, `3x3:0.5` or `avg:1x1:2`
impl FromStr for Operator {
    type Err = MosaicError;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let text = text.strip_prefix("avg:").unwrap_or(text);
        let (grid, weight) = match text.split_once(':') {
            Some((grid, weight)) => (grid, Some(weight)),
            None => (text, None),
        };

        let malformed = || invalid_parameter("operator", &s, &"expected [avg:]ROWSxCOLS[:WEIGHT]");
        let (rows, cols) = grid.split_once(['x', 'X']).ok_or_else(malformed)?;
        let rows = rows.trim().parse::<usize>().ok().ok_or_else(malformed)?;
        let cols = cols.trim().parse::<usize>().ok().ok_or_else(malformed)?;
        let weight = match weight {
            Some(w) => w.trim().parse::<f64>().ok().ok_or_else(malformed)?,
            None => 1.0,
        };

        Self::average_sampler(rows, cols, weight)
    }
}
