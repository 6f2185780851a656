//! Output Format Tests
//!
//! Tests for verifying consistency across output formats:
//! - json format (pretty, 2-space indent)
//! - compact format (single-line JSON)
//! - toon format (compact, token-efficient)
//!
//! Ensures that all formats contain equivalent information.

pub mod consistency_tests;
