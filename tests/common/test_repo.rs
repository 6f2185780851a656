//! Temporary Python project builder

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway project directory that is deleted on drop
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the repo
    pub fn file(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories as needed
    pub fn add_file(&self, relative: &str, content: &str) -> &Self {
        let path = self.file(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// A small package: models with a class, a utility module and a broken file
    pub fn with_python_package() -> Self {
        let repo = Self::new();
        repo.add_file(
            "app/models.py",
            r#""""Data models."""
from dataclasses import dataclass


@dataclass
class User(Base):
    """A registered user."""

    def display_name(self):
        return self.name
"#,
        )
        .add_file(
            "app/utils.py",
            r#"import os
import json as j


def load(path, default=None):
    """Load a JSON file."""
    with open(path) as f:
        return j.load(f)
"#,
        )
        .add_file("app/__init__.py", "")
        .add_file("README.md", "# app\n");
        repo
    }

    pub fn with_syntax_error(self) -> Self {
        self.add_file("app/broken.py", "def broken(\n");
        self
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
