//! Per-project error types.
//!
//! A `ProjectError` never aborts a run: the aggregator logs it and moves on
//! to the next project directory.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn one `info.json` into a record.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON object, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },
}

impl ProjectError {
    /// Path of the metadata file that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            ProjectError::Read { path, .. }
            | ProjectError::Parse { path, .. }
            | ProjectError::NotAnObject { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;
