//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.projdata.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".projdata.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Aggregation settings.
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Where projects are read from and where the data script goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Directory holding one sub-folder per project.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Generated JavaScript file.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Global the JSON array is assigned to.
    #[serde(default = "default_variable")]
    pub variable: String,

    /// Process project folders in name order instead of listing order.
    #[serde(default = "default_true")]
    pub sort_by_name: bool,

    /// Treat symlinks to directories as project folders.
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            output: default_output(),
            variable: default_variable(),
            sort_by_name: true,
            follow_symlinks: true,
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("posts/assets")
}

fn default_output() -> PathBuf {
    PathBuf::from("js/projects_data.js")
}

fn default_variable() -> String {
    "window.PROJECTS_DATA".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.projdata.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref root) = args.root {
            self.aggregator.root_dir = root.clone();
        }
        if let Some(ref output) = args.output {
            self.aggregator.output = output.clone();
        }
        if let Some(ref variable) = args.variable {
            self.aggregator.variable = variable.clone();
        }

        // Flags only ever switch behavior off
        if args.unsorted {
            self.aggregator.sort_by_name = false;
        }
        if args.no_follow_symlinks {
            self.aggregator.follow_symlinks = false;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level after merging: `quiet` wins, then `verbose` from either source.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize default config")
    }
}

impl AggregatorConfig {
    /// Check settings that may have come from the config file unvalidated.
    pub fn validate(&self) -> Result<()> {
        if !crate::cli::is_valid_variable(&self.variable) {
            bail!(
                "Variable name must be a dotted JavaScript identifier: {:?}",
                self.variable
            );
        }
        if self.output.as_os_str().is_empty() {
            bail!("Output path must not be empty");
        }
        Ok(())
    }
}
