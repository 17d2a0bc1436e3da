//! Tests for the greedy global assignment engine

#[cfg(test)]
mod tests {
    use crate::{gray_cell, gray_inventory, mean_coordinator};
    use greedymosaic::MosaicError;
    use greedymosaic::algorithm::Mosaic;
    use greedymosaic::spatial::{GridPosition, GridShape, ImagePatch, TileInventory};

    fn two_cell_mosaic(inventory: TileInventory, values: [f64; 2], reinsertion: bool) -> Mosaic {
        let cells = vec![
            gray_cell(0, 0, values[0], &inventory),
            gray_cell(0, 1, values[1], &inventory),
        ];
        Mosaic::from_cells(GridShape::new(1, 2).unwrap(), cells, inventory, reinsertion).unwrap()
    }

    // Tests the most confident cell is resolved first and the other falls back
    // Verified by assigning cells in scan order without a global minimum
    #[test]
    fn test_global_minimum_first() {
        let inventory = gray_inventory(&[("a", 0.0, 1), ("b", 3.0, 1)]);
        let a = inventory.find("a").unwrap();
        let b = inventory.find("b").unwrap();
        let cells = vec![
            gray_cell(0, 0, 1.0, &inventory),
            gray_cell(0, 1, 0.0, &inventory),
        ];
        let mut mosaic =
            Mosaic::from_cells(GridShape::new(1, 2).unwrap(), cells, inventory, false).unwrap();

        let first = mosaic.step().unwrap().unwrap();
        assert_eq!(first.position, GridPosition::new(0, 1));
        assert_eq!(first.candidate.tile, a);
        assert_eq!(first.candidate.distance, 0.0);

        let second = mosaic.step().unwrap().unwrap();
        assert_eq!(second.position, GridPosition::new(0, 0));
        assert_eq!(second.candidate.tile, b);
        assert_eq!(second.candidate.distance, 2.0);

        assert_eq!(mosaic.step().unwrap(), None);
        assert_eq!(mosaic.iteration(), 2);
        assert!(mosaic.is_fully_assigned());
        assert_eq!(mosaic.inventory().total_quantity(), 0);
    }

    // Tests reinsertion reuses the nearest tile without consuming it
    // Verified by decrementing quantity under reinsertion
    #[test]
    fn test_reinsertion_reuses_tiles() {
        let inventory = gray_inventory(&[("a", 0.0, 1), ("b", 3.0, 1)]);
        let a = inventory.find("a").unwrap();
        let mut mosaic = two_cell_mosaic(inventory, [0.0, 1.0], true);

        let assignment = mosaic.assign_tiles().unwrap();
        assert_eq!(assignment.tile_at(GridPosition::new(0, 0)), Some(a));
        assert_eq!(assignment.tile_at(GridPosition::new(0, 1)), Some(a));
        assert_eq!(mosaic.inventory().quantity(a), 1);
        assert!(mosaic.reinsertion());
    }

    // Tests a run aborts when the inventory is smaller than the grid
    // Verified by skipping cells without candidates
    #[test]
    fn test_insufficient_inventory() {
        let inventory = gray_inventory(&[("a", 0.0, 1)]);
        let mut mosaic = two_cell_mosaic(inventory, [0.0, 1.0], false);

        assert!(mosaic.step().unwrap().is_some());
        let err = mosaic.step().unwrap_err();
        assert!(matches!(
            err,
            MosaicError::ExhaustedCandidates { position } if position == GridPosition::new(0, 1)
        ));
        assert_eq!(mosaic.unassigned_count(), 1);
        assert!(mosaic.assignment().is_err());
    }

    // Tests assign_tiles fails as a whole
    // Verified by returning a partial assignment
    #[test]
    fn test_assign_tiles_reports_exhaustion() {
        let inventory = gray_inventory(&[("a", 0.0, 1)]);
        let mut mosaic = two_cell_mosaic(inventory, [0.0, 1.0], false);

        let result = mosaic.assign_tiles();
        assert!(matches!(
            result,
            Err(MosaicError::ExhaustedCandidates { .. })
        ));
    }

    // Tests equally distant cells are resolved in creation order
    // Verified by preferring the last minimum seen
    #[test]
    fn test_cell_ties_follow_creation_order() {
        let inventory = gray_inventory(&[("a", 0.0, 1), ("b", 5.0, 1)]);
        let a = inventory.find("a").unwrap();

        let forward = vec![
            gray_cell(0, 0, 1.0, &inventory),
            gray_cell(0, 1, -1.0, &inventory),
        ];
        let mut mosaic = Mosaic::from_cells(
            GridShape::new(1, 2).unwrap(),
            forward,
            inventory.clone(),
            false,
        )
        .unwrap();
        let first = mosaic.step().unwrap().unwrap();
        assert_eq!(first.position, GridPosition::new(0, 0));
        assert_eq!(first.candidate.tile, a);

        let reversed = vec![
            gray_cell(0, 1, -1.0, &inventory),
            gray_cell(0, 0, 1.0, &inventory),
        ];
        let mut mosaic =
            Mosaic::from_cells(GridShape::new(1, 2).unwrap(), reversed, inventory, false)
                .unwrap();
        let first = mosaic.step().unwrap().unwrap();
        assert_eq!(first.position, GridPosition::new(0, 1));
        assert_eq!(first.candidate.tile, a);
    }

    // Tests slicing a target into cells and assigning matching tiles
    // Verified by swapping the halves of the target
    #[test]
    fn test_mosaic_from_target() {
        let inventory = gray_inventory(&[("dark", 0.0, 1), ("light", 10.0, 1)]);
        let dark = inventory.find("dark").unwrap();
        let light = inventory.find("light").unwrap();
        let target = ImagePatch::from_shape_vec(
            (2, 4, 1),
            vec![0, 0, 10, 10, 0, 0, 10, 10],
        )
        .unwrap();

        let mut mosaic = Mosaic::new(
            &target,
            &mean_coordinator(),
            inventory,
            GridShape::new(1, 2).unwrap(),
            false,
        )
        .unwrap();
        assert_eq!(mosaic.cells().len(), 2);
        assert_eq!(mosaic.grid().cell_count(), 2);

        let assignment = mosaic.assign_tiles().unwrap();
        assert_eq!(assignment.tile_at(GridPosition::new(0, 0)), Some(dark));
        assert_eq!(assignment.tile_at(GridPosition::new(0, 1)), Some(light));
        assert_eq!(assignment.total_distance(), 0.0);
    }

    // Tests construction rejects inconsistent inputs
    // Verified by accepting each one
    #[test]
    fn test_construction_errors() {
        let inventory = gray_inventory(&[("a", 0.0, 4)]);
        let grid = GridShape::new(1, 2).unwrap();

        let too_few = vec![gray_cell(0, 0, 0.0, &inventory)];
        let result = Mosaic::from_cells(grid, too_few, inventory.clone(), false);
        assert!(matches!(result, Err(MosaicError::Configuration { .. })));

        let cells = vec![
            gray_cell(0, 0, 0.0, &inventory),
            gray_cell(0, 1, 0.0, &inventory),
        ];
        let result = Mosaic::from_cells(grid, cells, TileInventory::new(), false);
        assert!(matches!(result, Err(MosaicError::Configuration { .. })));

        let mut working = inventory.clone();
        let mut assigned = gray_cell(0, 0, 0.0, &inventory);
        assigned.assign_tile(&mut working, true).unwrap();
        let cells = vec![assigned, gray_cell(0, 1, 0.0, &inventory)];
        let result = Mosaic::from_cells(grid, cells, inventory, false);
        assert!(matches!(result, Err(MosaicError::IllegalState { .. })));
    }
}
