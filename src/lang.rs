//! Source kind detection and tree-sitter grammar loading

use std::path::Path;
use tree_sitter::Language;

use crate::error::{AegisError, Result};

/// Python source kinds the extractor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    /// Regular module (`.py`)
    #[default]
    Python,
    /// Type stub (`.pyi`)
    PythonStub,
}

impl Lang {
    /// Detect source kind from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| AegisError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect source kind from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Ok(Self::Python),
            "pyi" => Ok(Self::PythonStub),
            _ => Err(AegisError::UnsupportedLanguage {
                extension: ext.to_string(),
            }),
        }
    }

    /// Get the canonical name of the source kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::PythonStub => "python-stub",
        }
    }

    /// Get the tree-sitter Language for parsing
    ///
    /// Stubs use the regular grammar; `...` bodies are ordinary expressions.
    pub fn tree_sitter_language(&self) -> Language {
        tree_sitter_python::LANGUAGE.into()
    }

    /// File extensions for this source kind
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Python => &["py"],
            Self::PythonStub => &["pyi"],
        }
    }

    /// Every extension the extractor accepts
    pub fn all_extensions() -> Vec<&'static str> {
        [Self::Python, Self::PythonStub]
            .iter()
            .flat_map(|lang| lang.extensions().iter().copied())
            .collect()
    }
}
