//! Common test utilities and fixtures for aegis-code integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating Python project trees on disk
//! - Custom assertions for validating documents and CLI output
//! - A helper for running the `aegis-code` binary

#![allow(dead_code)]

pub mod test_repo;

pub use assertions::*;
pub use test_repo::TestRepo;
