//! Scan configuration.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Options controlling a scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanOptions {
    /// Root path to scan.
    pub root: PathBuf,

    /// Follow symbolic links. When disabled (the default) a symlink is
    /// recorded as a zero-size entry and never descended into, which keeps
    /// the tree acyclic.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Fold extension keys to lowercase before accumulating.
    #[builder(default = "false")]
    #[serde(default)]
    pub case_insensitive_extensions: bool,

    /// Minimum interval between progress snapshots. Zero disables progress
    /// reporting entirely.
    #[builder(default = "Duration::ZERO")]
    #[serde(default)]
    pub progress_interval: Duration,
}

impl ScanOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Root path is required".to_string()),
        }
    }
}

impl ScanOptions {
    /// Create a new options builder.
    pub fn builder() -> ScanOptionsBuilder {
        ScanOptionsBuilder::default()
    }

    /// Create default options for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            case_insensitive_extensions: false,
            progress_interval: Duration::ZERO,
        }
    }

    /// Check whether progress reporting is enabled.
    pub fn progress_enabled(&self) -> bool {
        !self.progress_interval.is_zero()
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ScanOptions::builder()
            .root("/home/user")
            .follow_symlinks(true)
            .progress_interval(Duration::from_millis(250))
            .build()
            .unwrap();

        assert_eq!(options.root, PathBuf::from("/home/user"));
        assert!(options.follow_symlinks);
        assert!(options.progress_enabled());
    }

    #[test]
    fn test_options_defaults() {
        let options = ScanOptions::new("/home/user");
        assert!(!options.follow_symlinks);
        assert!(!options.case_insensitive_extensions);
        assert!(!options.progress_enabled());
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(ScanOptions::builder().root("").build().is_err());
        assert!(ScanOptions::builder().build().is_err());
    }
}
