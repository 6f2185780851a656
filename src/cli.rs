//! CLI argument definitions using clap

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Python structure extractor with JSON and TOON output
#[derive(Parser, Debug)]
#[command(name = "aegis-code")]
#[command(
    about = "Extract imports, classes and top-level functions from Python source",
    long_about = "Extract imports, classes and top-level functions from Python source.\n\n\
                  With no PATH, or with '-', source is read from stdin. A directory is \
                  walked recursively for .py and .pyi files."
)]
#[command(version)]
pub struct Cli {
    /// Files or directories to analyze ('-' for stdin)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format [default: json, or the config file value]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the parsed syntax tree to stderr (for debugging)
    #[arg(long)]
    pub print_ast: bool,

    /// Maximum directory depth when walking directories
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Config file path (defaults to ./.aegis.toml)
    #[arg(short, long, value_name = "FILE", env = "AEGIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print a default config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Exit with status 2 if any input has a syntax error
    #[arg(long)]
    pub strict: bool,

    /// Print the agent tool definition as JSON and exit
    #[arg(long)]
    pub tool_schema: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON (2-space indent)
    #[default]
    Json,
    /// Single-line JSON
    Compact,
    /// TOON (Token-Oriented Object Notation) - token-efficient format
    Toon,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether input comes from stdin
    pub fn reads_stdin(&self) -> bool {
        self.paths.is_empty() || (self.paths.len() == 1 && self.paths[0] == Path::new("-"))
    }
}
