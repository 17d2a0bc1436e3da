//! Feature extraction: mapping image patches to comparable coordinates

/// Build-then-freeze collection of operators
pub mod coordinator;
/// Individual feature extraction strategies
pub mod operator;

pub use coordinator::Coordinator;
pub use operator::{AverageSampler, Operator};
