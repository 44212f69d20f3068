//! Assertion helpers for staged package trees.

use std::path::Path;

/// List all files under `dir`, relative to it and sorted
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect(dir, dir, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<String>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect(root, &path, files);
            } else if let Ok(relative) = path.strip_prefix(root) {
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
}

/// Assert that the CLI run succeeded, showing its output otherwise
#[macro_export]
macro_rules! assert_success {
    ($result:expr) => {
        assert!(
            $result.success,
            "Expected success (exit {}).\nOutput:\n{}",
            $result.exit_code,
            $result.combined_output()
        );
    };
}

/// Assert that the CLI output contains a substring
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let combined = $result.combined_output();
        assert!(
            combined.contains($needle),
            "Expected output to contain '{}'.\nOutput:\n{}",
            $needle,
            combined
        );
    };
}
