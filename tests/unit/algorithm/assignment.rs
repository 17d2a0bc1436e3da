//! Tests for collecting cell assignments into a grid

#[cfg(test)]
mod tests {
    use crate::{gray_cell, gray_inventory};
    use greedymosaic::MosaicError;
    use greedymosaic::algorithm::{Assignment, Cell};
    use greedymosaic::spatial::{GridPosition, GridShape, TileInventory};

    fn assigned(cell: &mut Cell, inventory: &mut TileInventory) {
        cell.nearest_distance(inventory).unwrap();
        cell.assign_tile(inventory, false).unwrap();
    }

    // Tests positions, distances and usage are collected from cells
    // Verified by storing cells in creation order instead of by position
    #[test]
    fn test_from_cells() {
        let mut inventory = gray_inventory(&[("a", 0.0, 1), ("b", 4.0, 1)]);
        let a = inventory.find("a").unwrap();
        let b = inventory.find("b").unwrap();

        let mut cells = vec![
            gray_cell(1, 0, 5.0, &inventory),
            gray_cell(0, 0, 1.0, &inventory),
        ];
        for cell in &mut cells {
            assigned(cell, &mut inventory);
        }

        let assignment = Assignment::from_cells(GridShape::new(2, 1).unwrap(), &cells).unwrap();
        assert_eq!(assignment.tile_at(GridPosition::new(0, 0)), Some(a));
        assert_eq!(assignment.tile_at(GridPosition::new(1, 0)), Some(b));
        assert_eq!(assignment.distance_at(GridPosition::new(1, 0)), Some(1.0));
        assert_eq!(assignment.tile_at(GridPosition::new(2, 0)), None);
        assert_eq!(assignment.total_distance(), 2.0);
        assert_eq!(assignment.usage_counts(inventory.len()), vec![1, 1]);
        assert_eq!(assignment.tiles().dim(), (2, 1));

        let order: Vec<_> = assignment.iter().map(|(position, _)| position).collect();
        assert_eq!(
            order,
            vec![GridPosition::new(0, 0), GridPosition::new(1, 0)]
        );
    }

    // Tests incomplete or inconsistent cell sets are rejected
    // Verified by filling gaps with a default tile
    #[test]
    fn test_from_cells_errors() {
        let mut inventory = gray_inventory(&[("a", 0.0, 1)]);
        let grid = GridShape::new(1, 2).unwrap();

        let mut first = gray_cell(0, 0, 0.0, &inventory);
        assigned(&mut first, &mut inventory);

        let missing = Assignment::from_cells(grid, std::slice::from_ref(&first));
        assert!(matches!(missing, Err(MosaicError::IllegalState { .. })));

        let duplicate = Assignment::from_cells(grid, &[first.clone(), first.clone()]);
        assert!(matches!(duplicate, Err(MosaicError::IllegalState { .. })));

        let mut outside = gray_cell(3, 3, 0.0, &inventory);
        assigned(&mut outside, &mut inventory);
        let result = Assignment::from_cells(grid, &[first.clone(), outside]);
        assert!(matches!(result, Err(MosaicError::IllegalState { .. })));

        let unassigned = gray_cell(0, 1, 0.0, &inventory);
        let result = Assignment::from_cells(grid, &[first, unassigned]);
        assert!(matches!(result, Err(MosaicError::IllegalState { .. })));
    }
}
