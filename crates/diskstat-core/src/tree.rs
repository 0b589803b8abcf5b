//! Scan result container and summary counters.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorLog, FailureKind};
use crate::ext::ExtensionTable;
use crate::node::UsageNode;

/// Summary counters for a completed scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Number of files measured.
    pub files: u64,
    /// Number of directories entered.
    pub dirs: u64,
    /// Number of symlinks recorded (not followed).
    pub symlinks: u64,
}

impl ScanStats {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured file.
    pub fn record_file(&mut self) {
        self.files += 1;
    }

    /// Record a directory.
    pub fn record_dir(&mut self) {
        self.dirs += 1;
    }

    /// Record a symlink.
    pub fn record_symlink(&mut self) {
        self.symlinks += 1;
    }

    /// Total entries seen.
    pub fn entries(&self) -> u64 {
        self.files + self.dirs + self.symlinks
    }
}

/// Everything a scan produces: the sized tree, the extension histogram, the
/// failure log, and summary counters. Owns all substructures; immutable once
/// returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root node of the usage tree.
    pub root: UsageNode,

    /// Root path that was scanned.
    pub root_path: PathBuf,

    /// Bytes per extension, files only.
    pub extensions: ExtensionTable,

    /// Non-fatal failures in discovery order.
    pub errors: ErrorLog,

    /// Summary counters.
    pub stats: ScanStats,

    /// Total bytes successfully measured; always equals `root.size`.
    pub total_size: u64,

    /// Wall-clock duration of the scan.
    pub scan_duration: Duration,
}

impl ScanResult {
    /// Assemble a result from the walk's pieces.
    pub fn new(
        root: UsageNode,
        root_path: PathBuf,
        extensions: ExtensionTable,
        errors: ErrorLog,
        stats: ScanStats,
        scan_duration: Duration,
    ) -> Self {
        let total_size = root.size;
        Self {
            root,
            root_path,
            extensions,
            errors,
            stats,
            total_size,
            scan_duration,
        }
    }

    /// Total bytes successfully measured.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Check whether any non-fatal failure was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check whether the scan ended early because it was cancelled.
    pub fn was_cancelled(&self) -> bool {
        self.errors.has_kind(FailureKind::Cancelled)
    }
}
