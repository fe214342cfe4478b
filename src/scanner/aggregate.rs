//! Scan Aggregation
//!
//! Folds per-file counts into a per-repository total. Per-file failures
//! (non-text content) contribute the all-zero map, mirroring the selector's
//! silent-skip policy: selection and counting are independently decode-safe.

use std::path::{Path, PathBuf};

use crate::analysis::{scan, AlgorithmCounts};

use super::selector;

/// Fold the per-file counts of `files` into one map
pub fn aggregate_files<I>(files: I) -> AlgorithmCounts
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut totals = AlgorithmCounts::new();
    for path in files {
        totals.merge(&scan::count_file(&path));
    }
    totals
}

/// Select and count every relevant file under an acquired working tree
pub fn scan_repository(root: &Path) -> AlgorithmCounts {
    aggregate_files(selector::select_files(root))
}
