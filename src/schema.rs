//! Output schema for structural analysis
//!
//! Field names and their order are part of the output contract: consumers
//! look documents up by key, so renaming or reordering a field here is a
//! breaking change.

use serde::{Deserialize, Serialize};

use crate::error::ParseFailure;

/// Fixed `error` label of every error document.
///
/// Callers match on this exact string, so it stays the same whichever
/// dialect failed to parse.
pub const SYNTAX_ERROR_LABEL: &str = "Invalid Python syntax";

/// Source location (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Top-level declarations of one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuralDocument {
    pub imports: Vec<ImportRecord>,
    pub classes: Vec<ClassRecord>,
    /// Module-level functions only; methods live in their class
    pub functions: Vec<FunctionRecord>,
}

impl StructuralDocument {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.classes.is_empty() && self.functions.is_empty()
    }

    /// Total number of methods across all classes
    pub fn method_count(&self) -> usize {
        self.classes.iter().map(|c| c.methods.len()).sum()
    }
}

/// One imported name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportRecord {
    /// Dotted module path; `X.Y` for `from X import Y`
    pub module: String,
    /// Local rename, if the import binds a different name
    #[serde(alias = "as")]
    pub alias: Option<String>,
}

impl ImportRecord {
    pub fn new(module: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            module: module.into(),
            alias,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassRecord {
    pub name: String,
    /// Base classes given as plain identifiers, in declaration order
    pub bases: Vec<String>,
    pub methods: Vec<FunctionRecord>,
}

/// A function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionRecord {
    pub name: String,
    /// Positional parameter names
    pub args: Vec<String>,
    pub docstring: Option<String>,
}

/// Returned instead of a structural document when the source does not parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorDocument {
    pub error: String,
    pub details: String,
}

impl From<&ParseFailure> for ErrorDocument {
    fn from(failure: &ParseFailure) -> Self {
        Self {
            error: SYNTAX_ERROR_LABEL.to_string(),
            details: failure.to_string(),
        }
    }
}

impl From<ParseFailure> for ErrorDocument {
    fn from(failure: ParseFailure) -> Self {
        Self::from(&failure)
    }
}

/// Outcome of analyzing one source text: exactly one of the two documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisDocument {
    Structure(StructuralDocument),
    Error(ErrorDocument),
}

impl AnalysisDocument {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_structure(&self) -> Option<&StructuralDocument> {
        match self {
            Self::Structure(doc) => Some(doc),
            Self::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorDocument> {
        match self {
            Self::Error(doc) => Some(doc),
            Self::Structure(_) => None,
        }
    }
}

impl From<std::result::Result<StructuralDocument, ParseFailure>> for AnalysisDocument {
    fn from(result: std::result::Result<StructuralDocument, ParseFailure>) -> Self {
        match result {
            Ok(doc) => Self::Structure(doc),
            Err(failure) => Self::Error(failure.into()),
        }
    }
}

/// Analysis of one file in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub file: String,
    pub result: AnalysisDocument,
}
