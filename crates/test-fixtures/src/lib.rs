//! Test fixture loader for the golden saved-project datasets.
//!
//! Each golden file holds a saved project plus the results the engine is
//! expected to produce for it.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Load only the saved project of a golden file, re-encoded as a JSON
/// string ready for the project importer.
pub fn load_project_json(relative_path: &str) -> String {
    let value = load_fixture_value(relative_path);
    serde_json::to_string(&value["project"])
        .unwrap_or_else(|e| panic!("Failed to encode project of {relative_path}: {e}"))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN: [&str; 5] = [
        "golden/cbn/wet_grass.json",
        "golden/cbn/copy_and_gate.json",
        "golden/cbn/sotif_chain.json",
        "golden/cbn/partial_table.json",
        "golden/cbn/cycle_rejection.json",
    ];

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_cbn_files_exist() {
        for f in &GOLDEN {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_files_parse_and_carry_a_project() {
        let files = list_fixtures("golden/cbn");
        assert_eq!(files.len(), GOLDEN.len());
        for f in &GOLDEN {
            let value = load_fixture_value(f);
            assert!(
                value["project"]["cbn_docs"].is_array(),
                "{f} has no cbn_docs array"
            );
            assert!(value["description"].is_string(), "{f} has no description");
        }
    }
}
