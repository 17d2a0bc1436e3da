//! Tests for the build-then-freeze coordinator

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::analysis::{Coordinator, Operator};
    use greedymosaic::spatial::ImagePatch;
    use ndarray::Array3;

    fn mean() -> Operator {
        Operator::average_sampler(1, 1, 1.0).unwrap()
    }

    fn quadrants() -> Operator {
        Operator::average_sampler(2, 2, 1.0).unwrap()
    }

    // Tests computing before finalize fails
    // Verified by skipping the finalized check
    #[test]
    fn test_compute_requires_finalize() {
        let mut coordinator = Coordinator::new();
        coordinator.add_operator(mean()).unwrap();
        let patch = ImagePatch::uniform(2, 2, &[1.0]).unwrap();

        assert!(matches!(
            coordinator.compute(&patch),
            Err(MosaicError::Configuration { .. })
        ));

        coordinator.finalize();
        assert_eq!(coordinator.compute(&patch).unwrap(), vec![1.0]);
    }

    // Tests operators cannot be added once finalized
    // Verified by allowing additions after finalize
    #[test]
    fn test_add_after_finalize_fails() {
        let mut coordinator = Coordinator::new();
        coordinator.add_operator(mean()).unwrap();
        coordinator.finalize();

        assert!(matches!(
            coordinator.add_operator(quadrants()),
            Err(MosaicError::Configuration { .. })
        ));
        assert_eq!(coordinator.operators().len(), 1);
    }

    // Tests finalize reports whether it already happened
    // Verified by always returning false
    #[test]
    fn test_finalize_is_idempotent() {
        let mut coordinator = Coordinator::new();
        assert!(!coordinator.is_finalized());

        assert!(!coordinator.finalize());
        assert!(coordinator.finalize());
        assert!(coordinator.is_finalized());
    }

    // Tests outputs are concatenated in insertion order
    // Verified by reversing the operator iteration
    #[test]
    fn test_concatenation_order() {
        let patch = ImagePatch::new(Array3::from_shape_fn((4, 4, 1), |(y, x, _)| {
            (1 + 2 * usize::from(y >= 2) + usize::from(x >= 2)) as f64
        }))
        .unwrap();
        let coordinator = Coordinator::from_operators([mean(), quadrants()]).unwrap();

        assert_eq!(
            coordinator.compute(&patch).unwrap(),
            vec![2.5, 1.0, 2.0, 3.0, 4.0]
        );
        assert_eq!(coordinator.feature_len(1), 5);
        assert_eq!(coordinator.feature_len(3), 15);
    }

    // Tests an empty configuration cannot compute
    // Verified by returning an empty vector
    #[test]
    fn test_empty_coordinator_rejected() {
        assert!(Coordinator::from_operators([]).is_err());

        let mut coordinator = Coordinator::new();
        coordinator.finalize();
        let patch = ImagePatch::uniform(2, 2, &[1.0]).unwrap();
        assert!(coordinator.compute(&patch).is_err());
    }

    // Tests operator failures propagate
    // Verified by skipping failing operators
    #[test]
    fn test_operator_error_propagates() {
        let coordinator =
            Coordinator::from_operators([mean(), Operator::average_sampler(8, 8, 1.0).unwrap()])
                .unwrap();
        let patch = ImagePatch::uniform(4, 4, &[1.0]).unwrap();

        assert!(matches!(
            coordinator.compute(&patch),
            Err(MosaicError::DegenerateGeometry { .. })
        ));
    }
}
