//! File Selection
//!
//! Walks an acquired working tree and collects the files worth counting:
//! extension on the allow-list, content satisfying the relevance predicate.
//! Each call re-walks the tree; the result is a single-pass snapshot.

use std::path::{Path, PathBuf};

use crate::analysis::scan::{is_relevant_file, SOURCE_EXTENSIONS};

/// Descent limit guarding against symlink cycles
const MAX_WALK_DEPTH: usize = 64;

#[derive(Debug, PartialEq, Eq)]
enum WalkStatus {
    Complete,
    DepthExceeded,
}

/// Select every relevant source file under `root`
///
/// Unreadable directories are skipped. Unbounded descent (symlink cycles)
/// ends the selection early: files found so far are kept, the remainder is
/// treated as empty rather than an error.
pub fn select_files(root: &Path) -> Vec<PathBuf> {
    let mut selected = Vec::new();
    if walk(root, 0, &mut selected) == WalkStatus::DepthExceeded {
        log::debug!(
            "Selection under {} stopped at depth limit {}",
            root.display(),
            MAX_WALK_DEPTH
        );
    }
    selected
}

fn walk(dir: &Path, depth: usize, selected: &mut Vec<PathBuf>) -> WalkStatus {
    if depth > MAX_WALK_DEPTH {
        return WalkStatus::DepthExceeded;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return WalkStatus::Complete,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if walk(&path, depth + 1, selected) == WalkStatus::DepthExceeded {
                return WalkStatus::DepthExceeded;
            }
        } else if has_source_extension(&path) {
            if is_relevant_file(&path) {
                selected.push(path);
            } else {
                log::trace!("Skipping {}", path.display());
            }
        }
    }

    WalkStatus::Complete
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn test_selects_only_allowed_extensions_with_relevant_content() {
        let dir = TempDir::new().unwrap();
        write(&dir, "test.cpp", "#include \"customfile.h\"\n#include <algorithm>\n");
        write(&dir, "test.cc", "#include <string>\n");
        write(&dir, "test.h", "#include <algorithm>\n#include <string>\n");
        write(&dir, "test.hpp", "#include <numeric>\n#include <string>\n");
        // Excluded by extension even though the content would qualify.
        write(&dir, "test.txt", "#include <numeric>\n");

        let mut names: Vec<String> = select_files(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["test.cpp", "test.h", "test.hpp"]);
    }

    #[test]
    fn test_descends_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src/deep")).unwrap();
        std::fs::write(
            dir.path().join("src/deep/algo.cpp"),
            "#include <algorithm>\n",
        )
        .unwrap();

        let selected = select_files(dir.path());
        assert_eq!(selected.len(), 1);
        assert!(selected[0].ends_with("src/deep/algo.cpp"));
    }

    #[test]
    fn test_non_utf8_content_is_silently_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("blob.cpp"), [0xffu8, 0xfe, 0x00]).unwrap();
        write(&dir, "good.cpp", "#include <algorithm>\n");

        let selected = select_files(dir.path());
        assert_eq!(selected.len(), 1);
        assert!(selected[0].ends_with("good.cpp"));
    }

    #[test]
    fn test_missing_root_yields_empty_selection() {
        assert!(select_files(Path::new("/nonexistent/algostat/tree")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates_with_partial_selection() {
        let dir = TempDir::new().unwrap();
        write(&dir, "top.cpp", "#include <algorithm>\n");
        // A directory symlinking back to the root produces unbounded descent.
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        // Must terminate rather than recurse forever; whatever was reached
        // before the cutoff is kept.
        let selected = select_files(dir.path());
        assert!(selected.iter().all(|p| p.ends_with("top.cpp")));
    }
}
