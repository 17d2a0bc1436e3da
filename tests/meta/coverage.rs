//! Keeps `tests/unit/` a mirror of `src/` and every test file non-empty

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    /// Every `.rs` file below `dir`, relative to `dir`
    fn rust_files(dir: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            for entry in fs::read_dir(&current)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path
                        .strip_prefix(dir)
                        .map_err(io::Error::other)?
                        .to_path_buf();
                    found.insert(relative);
                }
            }
        }

        Ok(found)
    }

    fn is_module_file(path: &Path) -> bool {
        path.file_name().is_some_and(|name| name == "mod.rs")
    }

    fn listing(paths: &[&PathBuf], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{0} -> {to}/{0}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests every source module has a unit test file at the same relative path
    // Verified by deleting a unit test file
    #[test]
    fn test_src_files_have_unit_tests() {
        let sources = rust_files(Path::new(SRC_DIR)).unwrap();
        let unit_tests = rust_files(Path::new(UNIT_DIR)).unwrap();

        let missing: Vec<_> = sources
            .iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| *path != Path::new("main.rs") && *path != Path::new("lib.rs"))
            .filter(|path| !unit_tests.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            listing(&missing, SRC_DIR, UNIT_DIR)
        );
    }

    // Tests no unit test file outlives its source module
    // Verified by adding a stray unit test file
    #[test]
    fn test_unit_tests_have_src_files() {
        let sources = rust_files(Path::new(SRC_DIR)).unwrap();
        let unit_tests = rust_files(Path::new(UNIT_DIR)).unwrap();

        let orphaned: Vec<_> = unit_tests
            .iter()
            .filter(|path| !is_module_file(path))
            .filter(|path| !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source module:\n{}",
            listing(&orphaned, UNIT_DIR, SRC_DIR)
        );
    }

    // Tests every test file outside module listings declares a test
    // Verified by removing the attribute from one file
    #[test]
    fn test_test_files_contain_tests() {
        let mut empty = Vec::new();

        for path in rust_files(Path::new(TESTS_DIR)).unwrap() {
            if is_module_file(&path) {
                continue;
            }
            let content = fs::read_to_string(Path::new(TESTS_DIR).join(&path)).unwrap();
            if !content.contains("#[test]") {
                empty.push(format!("  - {TESTS_DIR}/{}", path.display()));
            }
        }

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
