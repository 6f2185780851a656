//! CLI integration tests
//!
//! These tests run the `aegis-code` binary and verify:
//! - File, directory and stdin input
//! - Output formatting
//! - Config file handling
//! - Exit codes
