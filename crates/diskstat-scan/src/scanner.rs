//! Single-pass depth-first scanning engine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use diskstat_core::{
    ErrorLog, ErrorRecord, ExtensionTable, ScanError, ScanOptions, ScanResult, ScanStats,
    UsageNode,
};

use crate::progress::{ProgressEmitter, ScanProgress};

/// Traversal-and-aggregation engine.
///
/// One recursive walk produces the sized tree, the extension histogram and
/// the failure log together. The walk itself is single-threaded; progress
/// snapshots go out over a broadcast channel, and cancellation is requested
/// through the engine's token and honored cooperatively between entries.
pub struct ScanEngine {
    progress_tx: broadcast::Sender<ScanProgress>,
    cancel: CancellationToken,
}

impl ScanEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            progress_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Subscribe to progress snapshots.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Token a requester can use to cancel a running scan. Cancellation is
    /// cooperative: the walk checks it between entries and returns whatever
    /// it has aggregated so far.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Walk `options.root` once and aggregate sizes, extensions and failures.
    ///
    /// Per-entry failures never abort the walk; they are recorded in the
    /// result's [`ErrorLog`]. The only fatal case is the root itself being
    /// inaccessible.
    pub fn scan(&self, options: &ScanOptions) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let root_path = options.root.as_path();

        let metadata = root_metadata(root_path, options.follow_symlinks)
            .map_err(|e| ScanError::root(root_path, e))?;

        let mut walk = Walk {
            options,
            errors: ErrorLog::new(),
            stats: ScanStats::new(),
            entries_processed: 0,
            bytes_seen: 0,
            progress: ProgressEmitter::new(&self.progress_tx, options.progress_interval),
            cancel: &self.cancel,
            cancelled: false,
        };

        let name = root_name(root_path);
        let file_type = metadata.file_type();

        let (root, extensions) = if file_type.is_dir() {
            walk.walk_dir(root_path, name)
        } else if file_type.is_symlink() {
            walk.stats.record_symlink();
            walk.entries_processed += 1;
            (UsageNode::new_symlink(name, root_path), ExtensionTable::new())
        } else {
            let mut table = ExtensionTable::new();
            let size = metadata.len();
            walk.stats.record_file();
            walk.entries_processed += 1;
            walk.bytes_seen += size;
            table.record_file(&name, size, options.case_insensitive_extensions);
            (UsageNode::new_file(name, root_path, size), table)
        };

        let Walk {
            mut errors,
            stats,
            cancelled,
            ..
        } = walk;

        if cancelled {
            errors.append(ErrorRecord::cancelled(root_path));
        }

        Ok(ScanResult::new(
            root,
            options.root.clone(),
            extensions,
            errors,
            stats,
            start.elapsed(),
        ))
    }
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state threaded through one recursive walk.
struct Walk<'a> {
    options: &'a ScanOptions,
    errors: ErrorLog,
    stats: ScanStats,
    entries_processed: u64,
    bytes_seen: u64,
    progress: ProgressEmitter<'a>,
    cancel: &'a CancellationToken,
    cancelled: bool,
}

impl Walk<'_> {
    /// Enumerate one directory and recurse, bottom-up aggregating child sizes
    /// into the directory node and child extension tables into its table.
    fn walk_dir(&mut self, path: &Path, name: CompactString) -> (UsageNode, ExtensionTable) {
        let mut node = UsageNode::new_directory(name, path);
        let mut table = ExtensionTable::new();

        self.stats.record_dir();
        self.entries_processed += 1;
        self.maybe_emit(path);

        if self.cancel.is_cancelled() {
            self.cancelled = true;
            return (node, table);
        }

        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(err) => {
                // Listing failed (typically permission denied): one record
                // for the directory, size stays the sum of nothing.
                tracing::debug!(path = %path.display(), error = %err, "directory listing failed");
                self.errors.append(ErrorRecord::from_io(path, &err));
                return (node, table);
            }
        };

        for entry in reader {
            if self.cancelled || self.cancel.is_cancelled() {
                self.cancelled = true;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "unreadable directory entry");
                    self.errors.append(ErrorRecord::from_io(path, &err));
                    continue;
                }
            };

            let child_path = entry.path();
            let child_name = CompactString::new(entry.file_name().to_string_lossy());

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.record_stat_failure(&child_path, &err);
                    node.children.push(UsageNode::new_file(child_name, child_path, 0));
                    continue;
                }
            };

            if file_type.is_symlink() {
                self.visit_symlink(&mut node, &mut table, child_name, child_path);
            } else if file_type.is_dir() {
                let (child, child_table) = self.walk_dir(&child_path, child_name);
                node.size += child.size;
                table.merge(&child_table);
                node.children.push(child);
            } else {
                // Regular files and anything else statable (sockets, fifos)
                // measure through metadata.
                match entry.metadata() {
                    Ok(metadata) => {
                        self.measure_file(&mut node, &mut table, child_name, child_path, metadata.len());
                    }
                    Err(err) => {
                        self.record_stat_failure(&child_path, &err);
                        node.children.push(UsageNode::new_file(child_name, child_path, 0));
                    }
                }
            }
        }

        (node, table)
    }

    /// Symlinks are only descended when explicitly enabled; otherwise they
    /// become zero-size entries, which keeps cyclic links from recursing.
    fn visit_symlink(
        &mut self,
        parent: &mut UsageNode,
        table: &mut ExtensionTable,
        name: CompactString,
        path: PathBuf,
    ) {
        if !self.options.follow_symlinks {
            self.stats.record_symlink();
            self.entries_processed += 1;
            parent.children.push(UsageNode::new_symlink(name, path));
            return;
        }

        match fs::metadata(&path) {
            Ok(target) if target.is_dir() => {
                let (child, child_table) = self.walk_dir(&path, name);
                parent.size += child.size;
                table.merge(&child_table);
                parent.children.push(child);
            }
            Ok(target) => {
                self.measure_file(parent, table, name, path, target.len());
            }
            Err(err) => {
                // Broken link target; the link itself contributes zero.
                self.record_stat_failure(&path, &err);
                parent.children.push(UsageNode::new_symlink(name, path));
            }
        }
    }

    fn measure_file(
        &mut self,
        parent: &mut UsageNode,
        table: &mut ExtensionTable,
        name: CompactString,
        path: PathBuf,
        size: u64,
    ) {
        parent.size += size;
        self.bytes_seen += size;
        self.stats.record_file();
        self.entries_processed += 1;
        table.record_file(&name, size, self.options.case_insensitive_extensions);
        self.maybe_emit(&path);
        parent.children.push(UsageNode::new_file(name, path, size));
    }

    fn record_stat_failure(&mut self, path: &Path, err: &std::io::Error) {
        tracing::debug!(path = %path.display(), error = %err, "stat failed");
        self.errors.append(ErrorRecord::from_io(path, err));
        self.entries_processed += 1;
    }

    fn maybe_emit(&mut self, current: &Path) {
        if !self.progress.due() {
            return;
        }
        let snapshot = ScanProgress {
            entries_processed: self.entries_processed,
            files_scanned: self.stats.files,
            dirs_scanned: self.stats.dirs,
            bytes_scanned: self.bytes_seen,
            errors_count: self.errors.len() as u64,
            current_path: current.to_path_buf(),
            elapsed: self.progress.elapsed(),
        };
        self.progress.send(snapshot);
    }
}

fn root_metadata(path: &Path, follow_symlinks: bool) -> std::io::Result<fs::Metadata> {
    if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    }
}

fn root_name(path: &Path) -> CompactString {
    path.file_name()
        .map(|n| CompactString::new(n.to_string_lossy()))
        .unwrap_or_else(|| CompactString::new(path.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.log"), "another file here").unwrap();

        temp
    }

    #[test]
    fn test_basic_scan() {
        let temp = create_test_tree();
        let options = ScanOptions::new(temp.path());

        let engine = ScanEngine::new();
        let result = engine.scan(&options).unwrap();

        assert_eq!(result.stats.files, 4);
        assert_eq!(result.stats.dirs, 4); // root + dir1 + dir2 + subdir
        assert_eq!(result.total_size(), 5 + 17 + 4 + 17);
        assert_eq!(result.total_size, result.root.size);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_extension_totals() {
        let temp = create_test_tree();
        let options = ScanOptions::new(temp.path());

        let result = ScanEngine::new().scan(&options).unwrap();

        assert_eq!(result.extensions.get(".txt"), 5 + 17 + 4);
        assert_eq!(result.extensions.get(".log"), 17);
        assert_eq!(result.extensions.len(), 2);
    }

    #[test]
    fn test_root_can_be_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("single.txt");
        fs::write(&file, "12345678").unwrap();

        let result = ScanEngine::new().scan(&ScanOptions::new(&file)).unwrap();

        assert!(result.root.is_file());
        assert_eq!(result.total_size(), 8);
        assert_eq!(result.extensions.get(".txt"), 8);
        assert_eq!(result.stats.files, 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("does-not-exist");

        let err = ScanEngine::new().scan(&ScanOptions::new(&gone)).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }
}
