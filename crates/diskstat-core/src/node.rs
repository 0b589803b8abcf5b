//! Usage tree node types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Percentage of `part` relative to `total`, in `[0, 100]`.
///
/// Defined as 0 when `total` is 0 so empty trees never divide by zero.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Kind of file system entry a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file (or other non-directory entry measured like one).
    File,
    /// Directory.
    Directory,
    /// Symbolic link that was not followed; contributes zero bytes.
    Symlink,
}

impl EntryKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::Symlink)
    }
}

/// A single file or directory in the scanned tree.
///
/// Built once during the scan and immutable afterwards. A directory's `size`
/// is the sum of its children's sizes, aggregated bottom-up; `children` keep
/// the order in which the directory was enumerated, so sorted views can always
/// be rebuilt from the canonical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageNode {
    /// File/directory name (not full path).
    pub name: CompactString,

    /// Absolute path; stable identity within one scan.
    pub path: PathBuf,

    /// Entry kind.
    pub kind: EntryKind,

    /// Size in bytes (aggregate for directories).
    pub size: u64,

    /// Child nodes in enumeration order; empty for files and symlinks.
    pub children: Vec<UsageNode>,
}

impl UsageNode {
    /// Create a new file node.
    pub fn new_file(name: impl Into<CompactString>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            size,
            children: Vec::new(),
        }
    }

    /// Create a new directory node with no children yet.
    pub fn new_directory(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
            size: 0,
            children: Vec::new(),
        }
    }

    /// Create a symlink node. Symlinks are never descended into and carry
    /// zero bytes.
    pub fn new_symlink(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Symlink,
            size: 0,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// This node's share of `total` bytes, in percent.
    pub fn percentage(&self, total: u64) -> f64 {
        percentage(self.size, total)
    }
}
