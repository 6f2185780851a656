//! Syntax-level detectors
//!
//! - `common`: grammar-agnostic tree helpers (text, counting, traversal)
//! - `python`: Python declaration readers (imports, classes, functions,
//!   parameters and docstrings)
//!
//! Detectors read single nodes; deciding which nodes to visit and where
//! their records land is the job of `crate::extract`.

pub mod common;
pub mod python;
