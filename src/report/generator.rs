//! Data script generation.
//!
//! The generated file is a single statement, `<variable> = <json>;`, where
//! the JSON is the pretty-printed project array. Browsers load it with a
//! plain `<script>` tag.

use crate::models::ProjectRecord;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Render the full data script for a set of records.
pub fn generate_data_script(variable: &str, records: &[ProjectRecord]) -> Result<String> {
    // serde_json's pretty printer indents by two spaces and leaves non-ASCII alone
    let json = serde_json::to_string_pretty(records).context("Failed to serialize projects")?;
    Ok(format!("{} = {};", variable, json))
}

/// Write the data script, replacing any previous file.
///
/// Missing parent directories are created.
pub fn write_data_script(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write output to {}", path.display()))?;

    Ok(())
}

/// Pull the JSON array back out of a generated script.
#[cfg(test)]
pub fn extract_json(script: &str) -> Option<&str> {
    let (_, rhs) = script.split_once(" = ")?;
    rhs.strip_suffix(';')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use tempfile::TempDir;

    fn record(id: &str, fields: Value, has_wiki: bool) -> ProjectRecord {
        let fields: Map<String, Value> = serde_json::from_value(fields).unwrap();
        ProjectRecord::from_metadata(id, fields, has_wiki)
    }

    #[test]
    fn test_empty_script() {
        let script = generate_data_script("window.PROJECTS_DATA", &[]).unwrap();
        assert_eq!(script, "window.PROJECTS_DATA = [];");
    }

    #[test]
    fn test_pretty_printed_with_two_spaces() {
        let records = vec![record("proj-a", json!({"title": "A"}), false)];
        let script = generate_data_script("window.PROJECTS_DATA", &records).unwrap();

        let expected = r#"window.PROJECTS_DATA = [
  {
    "title": "A",
    "visible": true,
    "id": "proj-a",
    "has_wiki": false
  }
];"#;
        assert_eq!(script, expected);
    }

    #[test]
    fn test_non_ascii_is_not_escaped() {
        let records = vec![record("campus-login", json!({"title": "自动登录校园网项目"}), true)];
        let script = generate_data_script("window.PROJECTS_DATA", &records).unwrap();

        assert!(script.contains("\"title\": \"自动登录校园网项目\""));
        assert!(!script.contains("\\u"));
    }

    #[test]
    fn test_extract_json_round_trip() {
        let records = vec![
            record("a", json!({"title": "A", "visible": false}), false),
            record("b", json!({"title": "B"}), true),
        ];
        let script = generate_data_script("window.PROJECTS_DATA", &records).unwrap();

        let json = extract_json(&script).unwrap();
        let parsed: Vec<ProjectRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("js").join("projects_data.js");

        write_data_script(&path, "window.PROJECTS_DATA = [\n  {}\n];").unwrap();
        write_data_script(&path, "window.PROJECTS_DATA = [];").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "window.PROJECTS_DATA = [];");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        // The output path is an existing directory
        let err = write_data_script(temp.path(), "x").unwrap_err();
        assert!(err.to_string().contains("Failed to write output"));
    }
}
