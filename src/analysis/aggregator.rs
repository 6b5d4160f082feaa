//! Project aggregation.
//!
//! Turns each project folder into a `ProjectRecord`. A folder without
//! `info.json` is ignored; a folder with a broken one is logged and
//! skipped without affecting the others.

use crate::error::{ProjectError, Result};
use crate::models::{json_type_name, ProjectRecord};
use crate::scanner::{ProjectDir, ProjectScanner};
use serde_json::Value;
use std::fs;
use tracing::{debug, warn};

/// A project folder that had an `info.json` but could not be used.
#[derive(Debug)]
pub struct SkippedProject {
    /// Folder name.
    pub name: String,
    /// Why it was skipped.
    pub error: ProjectError,
}

/// Result of one aggregation pass.
#[derive(Debug, Default)]
pub struct AggregateOutcome {
    /// Records in processing order.
    pub records: Vec<ProjectRecord>,
    /// Folders whose metadata failed to load.
    pub skipped: Vec<SkippedProject>,
}

impl AggregateOutcome {
    /// Number of records that will be written.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn visible_count(&self) -> usize {
        self.records.iter().filter(|r| r.visible()).count()
    }
}

/// Aggregate every project folder the scanner finds.
pub fn aggregate_projects(scanner: &ProjectScanner) -> AggregateOutcome {
    let mut outcome = AggregateOutcome::default();

    for dir in scanner.scan() {
        match load_project(&dir) {
            Ok(Some(record)) => {
                debug!(
                    "Loaded project {} (visible: {}, wiki: {})",
                    record.id(),
                    record.visible(),
                    record.has_wiki()
                );
                outcome.records.push(record);
            }
            Ok(None) => {
                debug!("No info.json in {}, skipping", dir.path.display());
            }
            Err(error) => {
                warn!("Error reading {}: {}", error.path().display(), error);
                outcome.skipped.push(SkippedProject {
                    name: dir.name,
                    error,
                });
            }
        }
    }

    outcome
}

/// Load and normalize a single project folder.
///
/// Returns `Ok(None)` when the folder has no `info.json`.
pub fn load_project(dir: &ProjectDir) -> Result<Option<ProjectRecord>> {
    let info_path = dir.info_path();
    if !info_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&info_path).map_err(|source| ProjectError::Read {
        path: info_path.clone(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| ProjectError::Parse {
        path: info_path.clone(),
        source,
    })?;

    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(ProjectError::NotAnObject {
                path: info_path,
                found: json_type_name(&other),
            })
        }
    };

    let has_wiki = dir.readme_path().exists();
    Ok(Some(ProjectRecord::from_metadata(&dir.name, fields, has_wiki)))
}
