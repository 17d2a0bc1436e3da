//! Distances between feature vectors

use num_traits::Float;

use crate::io::error::{Result, configuration_error};

/// Euclidean (L2) distance between two feature vectors
///
/// # Errors
///
/// Returns an error if the vectors have different lengths, which means they
/// were produced by different extractor configurations or channel counts
pub fn euclidean_distance<F: Float>(a: &[F], b: &[F]) -> Result<F> {
    if a.len() != b.len() {
        return Err(configuration_error(&format!(
            "cannot compare feature vectors of length {} and {}",
            a.len(),
            b.len()
        )));
    }
    let squared = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (x - y) * (x - y))
        .fold(F::zero(), |acc, d| acc + d);
    Ok(squared.sqrt())
}
