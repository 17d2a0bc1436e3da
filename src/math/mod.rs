//! Mathematical utilities for feature comparison

/// Metrics over feature vectors
pub mod distance;
