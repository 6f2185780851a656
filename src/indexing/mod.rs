//! Batch analysis for directories and file lists
//!
//! This module provides file collection and parallel analysis, shared by the
//! CLI directory mode and library callers.
//!
//! # Key Features
//!
//! - **Parallel Processing**: Uses Rayon for multi-threaded file analysis
//! - **Progress Reporting**: Optional callback for progress updates
//! - **Error Handling**: Collects errors without stopping the entire operation
//!
//! # Example
//!
//! ```ignore
//! use aegis_code::indexing::{collect_files, analyze_files_parallel};
//!
//! let files = collect_files(&repo_dir, 10, &[]);
//! let result = analyze_files_parallel(&files, None);
//!
//! println!("Analyzed {} files, {} syntax errors", result.analyses.len(), result.parse_errors);
//! ```

mod files;
mod generation;

pub use files::{collect_files, is_supported, should_skip_path};
pub use generation::{
    analyze_file, analyze_files_parallel, analyze_files_with_stats, IndexGenerationResult,
    IndexingProgressCallback, IndexingStats,
};
