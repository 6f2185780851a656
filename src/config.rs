//! Configuration file handling.
//!
//! Settings come from a `.aegis.toml` file. Lookup order is an explicit
//! `--config` path, then `./.aegis.toml`, then
//! `<config_dir>/aegis-code/config.toml`. Command-line flags override file
//! values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::error::{AegisError, Result};

/// Project-local config file name
pub const CONFIG_FILE_NAME: &str = ".aegis.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Directory scan settings.
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
        }
    }
}

/// Directory scan settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum directory depth below the root (0 = root only).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Extensions to include; empty means every Python extension.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Extra directory or file names to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            extensions: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

fn default_max_depth() -> usize {
    10
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AegisError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| AegisError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Resolve and load configuration.
    ///
    /// An explicit path must exist. Otherwise the first existing default
    /// location wins, and no file at all yields the defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(AegisError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            return Self::load(path);
        }

        for candidate in Self::default_locations() {
            if candidate.is_file() {
                debug!("Loading config from {}", candidate.display());
                return Self::load(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Default config locations, highest priority first.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("aegis-code").join("config.toml"));
        }
        locations
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values the user passed explicitly take precedence.
    pub fn merge_with_args(&mut self, args: &Cli) {
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(depth) = args.max_depth {
            self.scan.max_depth = depth;
        }
        if args.verbose {
            self.logging.level = "debug".to_string();
        }
    }

    /// Whether a path matches one of the configured exclusions.
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.scan.exclude.iter().any(|e| e == name.as_ref())
        })
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Config::default()).unwrap_or_default()
    }
}
