//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Values left unset here fall back to
//! `.projdata.toml` and then to built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// projdata - build the projects data script for a static site
///
/// Reads `<root>/<project>/info.json` for every project folder, normalizes
/// the `visible`, `id` and `has_wiki` fields, and writes all projects as a
/// JSON array assigned to a global variable.
///
/// Examples:
///   projdata
///   projdata --root posts/assets --output js/projects_data.js
///   projdata --dry-run
///   projdata --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing one folder per project
    ///
    /// Default: posts/assets (or the value from .projdata.toml)
    #[arg(short, long, value_name = "DIR", env = "PROJDATA_ROOT")]
    pub root: Option<PathBuf>,

    /// Output file for the generated data script
    ///
    /// Default: js/projects_data.js (or the value from .projdata.toml)
    #[arg(short, long, value_name = "FILE", env = "PROJDATA_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Global variable the project array is assigned to
    #[arg(long, value_name = "NAME")]
    pub variable: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .projdata.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep file-system listing order instead of sorting folders by name
    #[arg(long)]
    pub unsorted: bool,

    /// Ignore symlinks that point to directories
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Print the generated script instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .projdata.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref variable) = self.variable {
            if !is_valid_variable(variable) {
                return Err(format!(
                    "Variable name must be a dotted JavaScript identifier: {}",
                    variable
                ));
            }
        }

        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path must not be empty".to_string());
            }
            if output.is_dir() {
                return Err(format!("Output path is a directory: {}", output.display()));
            }
        }

        if let Some(ref config) = self.config {
            if !config.is_file() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// `name` or `a.b.c`, each segment a plain identifier.
pub fn is_valid_variable(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}
