//! Edge Cases and Error Handling Tests
//!
//! Tests for unusual inputs, error conditions, and boundary cases:
//! - Empty and whitespace-only sources
//! - Syntax errors and malformed code
//! - Unicode and escapes in docstrings
//! - Deeply nested and unusual declarations

pub mod error_handling_tests;
