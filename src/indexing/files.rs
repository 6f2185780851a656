//! File collection utilities for batch analysis
//!
//! Walks a directory tree honoring `.gitignore`, skipping hidden entries and
//! common virtualenv/build directories, and keeps Python sources only.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::Lang;

/// Directories that never contain project sources worth analyzing
const SKIPPED_DIRS: &[&str] = &[
    "__pycache__",
    "node_modules",
    "target",
    "dist",
    "build",
    "venv",
    "env",
    "site-packages",
    "coverage",
    "vendor",
];

/// Collect all Python source files under a directory.
///
/// # Arguments
///
/// * `dir` - The root directory to search
/// * `max_depth` - Maximum recursion depth (0 = only root directory)
/// * `extensions` - Optional list of extensions to include (empty = all supported)
///
/// # Returns
///
/// A vector of paths to supported source files, sorted by path.
pub fn collect_files(dir: &Path, max_depth: usize, extensions: &[String]) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(dir)
        .max_depth(Some(max_depth + 1))
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(|entry| entry.depth() == 0 || !should_skip_path(entry.path()))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if is_supported(path, extensions) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!("Collected {} files under {}", files.len(), dir.display());
    files
}

/// Whether a file is a Python source, optionally restricted to `extensions`
pub fn is_supported(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };

    if !extensions.is_empty() && !extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
        return false;
    }

    Lang::from_extension(ext).is_ok()
}

/// Check if a path should be skipped during file collection.
///
/// Skips hidden files/directories (starting with '.') and common
/// non-source directories such as `__pycache__` and virtualenvs.
pub fn should_skip_path(path: &Path) -> bool {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.starts_with('.') || SKIPPED_DIRS.contains(&name),
        None => false,
    }
}
