/// Final position-to-tile mapping
pub mod assignment;
/// Cells and lazy pruning of exhausted candidates
pub mod cell;
/// Greedy global assignment engine
pub mod executor;
/// Bitset of unassigned cells
pub mod pool;

pub use assignment::Assignment;
pub use cell::{Candidate, Cell};
pub use executor::{Commit, Mosaic};
