//! Error taxonomy: the one fatal error and the per-entry failure log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal scan error. Only raised when the root path itself cannot be opened;
/// every other failure is recorded in the [`ErrorLog`] instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied opening the root.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Root path does not exist.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Other I/O error opening the root.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error on the root path.
    pub fn root(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of non-fatal failure recorded during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Permission was denied reading an entry or listing a directory.
    PermissionDenied,
    /// Entry vanished between enumeration and stat (concurrent mutation).
    NotFound,
    /// The scan was cancelled; the result covers only entries processed
    /// before the cancellation point.
    Cancelled,
    /// Any other OS error.
    Other,
}

/// One non-fatal failure: which path, what kind, and the OS message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Path where the failure occurred.
    pub path: PathBuf,
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable message.
    pub message: String,
}

impl ErrorRecord {
    /// Create a record with an explicit kind and message.
    pub fn new(path: impl Into<PathBuf>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Classify an I/O error on an entry.
    pub fn from_io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            std::io::ErrorKind::NotFound => FailureKind::NotFound,
            _ => FailureKind::Other,
        };
        Self::new(path, kind, source.to_string())
    }

    /// Marker record appended when a scan is cancelled.
    pub fn cancelled(path: impl Into<PathBuf>) -> Self {
        Self::new(path, FailureKind::Cancelled, "scan cancelled")
    }
}

/// Ordered collection of non-fatal failures.
///
/// Append-only while the scan runs; records keep discovery order and are
/// never removed. Read-only once the scan has returned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn append(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    /// All records, in discovery order.
    pub fn all(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Iterate over records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    /// Check whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether any record has the given kind.
    pub fn has_kind(&self, kind: FailureKind) -> bool {
        self.records.iter().any(|r| r.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_root_classification() {
        let err = ScanError::root(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::root(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_error_record_from_io() {
        let record = ErrorRecord::from_io(
            "/test/file",
            &std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(record.kind, FailureKind::NotFound);

        let record = ErrorRecord::from_io(
            "/test/file",
            &std::io::Error::other("weird"),
        );
        assert_eq!(record.kind, FailureKind::Other);
    }

    #[test]
    fn test_error_log_keeps_order() {
        let mut log = ErrorLog::new();
        assert!(log.is_empty());

        log.append(ErrorRecord::new("/a", FailureKind::PermissionDenied, "first"));
        log.append(ErrorRecord::new("/b", FailureKind::NotFound, "second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0].message, "first");
        assert_eq!(log.all()[1].message, "second");
        assert!(log.has_kind(FailureKind::NotFound));
        assert!(!log.has_kind(FailureKind::Cancelled));
    }
}
