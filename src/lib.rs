//! aegis-code: Python structure extraction for code-analysis agents
//!
//! This library parses Python source with tree-sitter and reports its
//! structure: every import, every class with its bases and directly declared
//! methods, and every top-level function with its positional parameters and
//! docstring. Output is JSON with a fixed field layout, or TOON
//! (Token-Oriented Object Notation) for prompt-sized payloads.
//!
//! Source that does not parse produces an error document instead of a
//! partial result, so `analyze` never fails.
//!
//! # Example
//!
//! ```
//! use aegis_code::{analyze_source, AnalysisDocument};
//!
//! let source = r#"
//! import os
//!
//! class Greeter(Base):
//!     def greet(self, name):
//!         """Say hello."""
//!
//! def main():
//!     pass
//! "#;
//!
//! match analyze_source(source) {
//!     AnalysisDocument::Structure(doc) => {
//!         assert_eq!(doc.imports[0].module, "os");
//!         assert_eq!(doc.classes[0].methods[0].name, "greet");
//!         assert_eq!(doc.functions[0].name, "main");
//!     }
//!     AnalysisDocument::Error(err) => panic!("{}", err.details),
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod detectors;
pub mod error;
pub mod extract;
pub mod indexing;
pub mod lang;
pub mod parse;
pub mod schema;
pub mod toon;
pub mod utils;

// Re-export commonly used types
pub use agent::{CodeAnalysisAgent, ToolCall, ToolDefinition, ToolResult};
pub use cli::{Cli, OutputFormat};
pub use error::{AegisError, ParseFailure, Result};
pub use extract::{analyze, analyze_source, extract, extract_structure};
pub use indexing::{analyze_files_parallel, collect_files};
pub use lang::Lang;
pub use parse::parse_python;
pub use schema::{
    AnalysisDocument, ClassRecord, ErrorDocument, FileAnalysis, FunctionRecord, ImportRecord,
    Location, StructuralDocument, SYNTAX_ERROR_LABEL,
};
pub use toon::{encode_toon, encode_toon_batch};
