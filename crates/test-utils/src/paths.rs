//! Path utilities for locating test data files.
//!
//! Large sample grids (e.g. `Isabel_2D.vti`) are not checked in, so tests
//! look for them in a few well-known places and skip when absent.

use std::path::PathBuf;

/// Returns the workspace root directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns `crates/{crate_name}/testdata/`.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join(crate_name)
        .join("testdata")
}

/// Searches for a test file in multiple locations.
///
/// Checks, in order:
/// 1. Environment variable `TEST_DATA_DIR` (if set)
/// 2. `crates/vtk-xml/testdata/`
/// 3. `services/contour-extractor/testdata/`
/// 4. `testdata/` at the workspace root
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    let root = workspace_root();
    candidates.extend([
        crate_testdata_dir("vtk-xml").join(name),
        root.join("services/contour-extractor/testdata").join(name),
        root.join("testdata").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

/// Creates a temporary directory for test output, removed on drop.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}
