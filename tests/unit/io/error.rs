//! Tests for error formatting and source chaining

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::io::error::{configuration_error, illegal_state, invalid_parameter};
    use greedymosaic::spatial::GridPosition;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests user-facing messages carry the relevant context
    // Verified by dropping fields from the messages
    #[test]
    fn test_display_messages() {
        let exhausted = MosaicError::ExhaustedCandidates {
            position: GridPosition::new(3, 4),
        };
        assert!(exhausted.to_string().contains("(3, 4)"));

        let catalog = MosaicError::Catalog {
            path: PathBuf::from("tiles.csv"),
            line: 7,
            reason: "bad quantity".to_string(),
        };
        let message = catalog.to_string();
        assert!(message.contains("tiles.csv"));
        assert!(message.contains('7'));
        assert!(message.contains("bad quantity"));

        let degenerate = MosaicError::DegenerateGeometry {
            height: 1,
            width: 2,
            rows: 3,
            cols: 4,
        };
        assert!(degenerate.to_string().contains("3x4"));

        let invalid = invalid_parameter("rows", &0, &"must be positive");
        assert!(invalid.to_string().contains("rows"));
    }

    // Tests only wrapped errors expose a source
    // Verified by returning None for file system errors
    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let wrapped = MosaicError::FileSystem {
            path: PathBuf::from("tiles"),
            operation: "read tile folder",
            source: io_error,
        };
        assert!(matches!(wrapped, MosaicError::FileSystem { .. }));
        assert!(wrapped.source().is_some());
        assert!(wrapped.to_string().contains("read tile folder"));

        assert!(configuration_error(&"unfinalized").source().is_none());
        assert!(illegal_state(&"twice").source().is_none());
    }
}
