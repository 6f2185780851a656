//! Parallel batch analysis
//!
//! Each file is read and analyzed on the rayon pool independently. Read
//! failures are collected rather than aborting the batch; syntax errors are
//! ordinary error documents and are only counted.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::extract::analyze_source;
use crate::schema::FileAnalysis;

/// Progress callback: `(files_done, files_total)`
pub type IndexingProgressCallback<'a> = dyn Fn(usize, usize) + Send + Sync + 'a;

/// Outcome of analyzing a set of files
#[derive(Debug, Default)]
pub struct IndexGenerationResult {
    /// One entry per readable file, in input order
    pub analyses: Vec<FileAnalysis>,
    /// Files whose source did not parse
    pub parse_errors: usize,
    /// Files that could not be read, with the reason
    pub read_errors: Vec<(PathBuf, String)>,
}

impl IndexGenerationResult {
    pub fn has_failures(&self) -> bool {
        self.parse_errors > 0 || !self.read_errors.is_empty()
    }
}

/// Timing and counts for a batch run
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexingStats {
    pub files: usize,
    pub classes: usize,
    pub functions: usize,
    pub imports: usize,
    pub elapsed: Duration,
}

/// Analyze files in parallel
pub fn analyze_files_parallel(
    files: &[PathBuf],
    progress: Option<&IndexingProgressCallback<'_>>,
) -> IndexGenerationResult {
    let total = files.len();
    let done = AtomicUsize::new(0);

    let outcomes: Vec<Result<FileAnalysis, (PathBuf, String)>> = files
        .par_iter()
        .map(|path| {
            let outcome = analyze_file(path);
            let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(callback) = progress {
                callback(finished, total);
            }
            outcome
        })
        .collect();

    let mut result = IndexGenerationResult::default();
    for outcome in outcomes {
        match outcome {
            Ok(analysis) => {
                if analysis.result.is_error() {
                    result.parse_errors += 1;
                }
                result.analyses.push(analysis);
            }
            Err(failure) => result.read_errors.push(failure),
        }
    }

    debug!(
        "Analyzed {} files ({} syntax errors, {} unreadable)",
        result.analyses.len(),
        result.parse_errors,
        result.read_errors.len()
    );
    result
}

/// Analyze files in parallel and report aggregate statistics
pub fn analyze_files_with_stats(
    files: &[PathBuf],
    progress: Option<&IndexingProgressCallback<'_>>,
) -> (IndexGenerationResult, IndexingStats) {
    let start = Instant::now();
    let result = analyze_files_parallel(files, progress);

    let mut stats = IndexingStats {
        files: result.analyses.len(),
        elapsed: start.elapsed(),
        ..Default::default()
    };
    for doc in result.analyses.iter().filter_map(|a| a.result.as_structure()) {
        stats.classes += doc.classes.len();
        stats.functions += doc.functions.len();
        stats.imports += doc.imports.len();
    }

    (result, stats)
}

/// Read and analyze a single file
pub fn analyze_file(path: &Path) -> Result<FileAnalysis, (PathBuf, String)> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(FileAnalysis {
            file: path.display().to_string(),
            result: analyze_source(&source),
        }),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            Err((path.to_path_buf(), e.to_string()))
        }
    }
}
