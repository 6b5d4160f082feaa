//! Project directory discovery.
//!
//! Lists the immediate sub-folders of the projects root. Nothing below
//! depth one is visited; each folder found is a candidate project.

use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Options for listing project folders.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Sort folders by file name before yielding them.
    pub sort_by_name: bool,
    /// Follow symlinks when deciding whether an entry is a directory.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sort_by_name: true,
            follow_symlinks: true,
        }
    }
}

impl From<&crate::config::AggregatorConfig> for ScanConfig {
    fn from(config: &crate::config::AggregatorConfig) -> Self {
        Self {
            sort_by_name: config.sort_by_name,
            follow_symlinks: config.follow_symlinks,
        }
    }
}

/// A candidate project folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    /// Folder name, used as the project id.
    pub name: String,
    /// Full path to the folder.
    pub path: PathBuf,
}

impl ProjectDir {
    /// Path of the metadata file inside this folder.
    pub fn info_path(&self) -> PathBuf {
        self.path.join("info.json")
    }

    /// Path of the optional wiki page inside this folder.
    pub fn readme_path(&self) -> PathBuf {
        self.path.join("README.md")
    }
}

/// Lists project folders under a root directory.
pub struct ProjectScanner {
    config: ScanConfig,
    root: PathBuf,
}

impl ProjectScanner {
    /// Create a new project scanner.
    pub fn new(root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// List all immediate sub-directories of the root.
    ///
    /// A missing root yields no folders. Entries that cannot be inspected
    /// (broken symlinks, permission errors) are logged and skipped.
    pub fn scan(&self) -> Vec<ProjectDir> {
        if !self.root.exists() {
            debug!("Projects root {} does not exist", self.root.display());
            return Vec::new();
        }

        if !self.root.is_dir() {
            warn!("Projects root {} is not a directory", self.root.display());
            return Vec::new();
        }

        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks);
        if self.config.sort_by_name {
            walker = walker.sort_by_file_name();
        }

        let mut dirs = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Root listing failures surface here at depth 0
                    if e.depth() == 0 {
                        warn!("Cannot list {}: {}", self.root.display(), e);
                    } else {
                        debug!("Skipping unreadable entry: {}", e);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            dirs.push(ProjectDir {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }

        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(dirs: &[ProjectDir]) -> Vec<&str> {
        dirs.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let scanner = ProjectScanner::new(temp.path().join("nope"), ScanConfig::default());
        assert!(scanner.scan().is_empty());
    }

    #[test]
    fn test_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("assets");
        fs::write(&file, "not a dir").unwrap();

        let scanner = ProjectScanner::new(file, ScanConfig::default());
        assert!(scanner.scan().is_empty());
    }

    #[test]
    fn test_only_immediate_directories_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("zeta")).unwrap();
        fs::create_dir_all(temp.path().join("alpha/nested")).unwrap();
        fs::create_dir_all(temp.path().join("mid")).unwrap();
        fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let scanner = ProjectScanner::new(temp.path(), ScanConfig::default());
        let dirs = scanner.scan();

        assert_eq!(names(&dirs), vec!["alpha", "mid", "zeta"]);
        assert_eq!(dirs[0].path, temp.path().join("alpha"));
        assert_eq!(dirs[0].info_path(), temp.path().join("alpha").join("info.json"));
    }

    #[test]
    fn test_unsorted_returns_same_set() {
        let temp = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }

        let config = ScanConfig {
            sort_by_name: false,
            ..ScanConfig::default()
        };
        let scanner = ProjectScanner::new(temp.path(), config);
        let mut found: Vec<String> = scanner.scan().into_iter().map(|d| d.name).collect();
        found.sort();

        assert_eq!(found, vec!["a", "b", "c"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("assets");
        let target = temp.path().join("shared");
        fs::create_dir_all(root.join("real")).unwrap();
        fs::create_dir_all(&target).unwrap();
        std::os::unix::fs::symlink(&target, root.join("linked")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), root.join("broken")).unwrap();

        let following = ProjectScanner::new(&root, ScanConfig::default());
        assert_eq!(names(&following.scan()), vec!["linked", "real"]);

        let config = ScanConfig {
            follow_symlinks: false,
            ..ScanConfig::default()
        };
        let not_following = ProjectScanner::new(&root, config);
        assert_eq!(names(&not_following.scan()), vec!["real"]);
    }
}
