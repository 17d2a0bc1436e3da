use bitvec::prelude::*;
use std::fmt;

/// Set of cells still waiting for a tile
///
/// Indexed by cell creation order, which is also the iteration order and
/// therefore the tie-break between equally distant cells.
#[derive(Clone, Debug)]
pub struct CellPool {
    bits: BitVec,
}

impl CellPool {
    /// Create a pool containing cells `0..cell_count`
    pub fn full(cell_count: usize) -> Self {
        Self {
            bits: bitvec![1; cell_count],
        }
    }

    /// Take a cell out of the pool
    ///
    /// Returns whether the cell was present.
    pub fn remove(&mut self, cell: usize) -> bool {
        let present = self.contains(cell);
        if present {
            self.bits.set(cell, false);
        }
        present
    }

    /// Test cell membership
    pub fn contains(&self, cell: usize) -> bool {
        self.bits.get(cell).as_deref() == Some(&true)
    }

    /// Test if every cell has been taken out
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Number of cells still in the pool
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Cells in the pool, in creation order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for CellPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellPool({} of {} unassigned)", self.len(), self.bits.len())
    }
}
