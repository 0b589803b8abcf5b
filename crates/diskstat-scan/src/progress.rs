//! Scan progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;

/// Progress snapshot emitted periodically while a scan runs.
///
/// Snapshots are value copies; receivers never share mutable state with the
/// scanning thread.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Entries (files, directories, symlinks) processed so far.
    pub entries_processed: u64,
    /// Files measured so far.
    pub files_scanned: u64,
    /// Directories entered so far.
    pub dirs_scanned: u64,
    /// Bytes measured so far.
    pub bytes_scanned: u64,
    /// Failures recorded so far.
    pub errors_count: u64,
    /// Path being processed when the snapshot was taken.
    pub current_path: PathBuf,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Processing rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.entries_processed as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Throttled sender: forwards snapshots over the broadcast channel no more
/// often than the configured interval. An interval of zero disables emission.
pub(crate) struct ProgressEmitter<'a> {
    tx: &'a broadcast::Sender<ScanProgress>,
    interval: Duration,
    started: Instant,
    last_emit: Option<Instant>,
}

impl<'a> ProgressEmitter<'a> {
    pub(crate) fn new(tx: &'a broadcast::Sender<ScanProgress>, interval: Duration) -> Self {
        Self {
            tx,
            interval,
            started: Instant::now(),
            last_emit: None,
        }
    }

    /// Whether enough time has passed since the last snapshot.
    pub(crate) fn due(&self) -> bool {
        if self.interval.is_zero() {
            return false;
        }
        match self.last_emit {
            None => true,
            Some(at) => at.elapsed() >= self.interval,
        }
    }

    /// Time elapsed since the scan started.
    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Send a snapshot. Receivers may have gone away; that is not an error.
    pub(crate) fn send(&mut self, progress: ScanProgress) {
        self.last_emit = Some(Instant::now());
        let _ = self.tx.send(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_interval_never_due() {
        let (tx, _rx) = broadcast::channel(4);
        let emitter = ProgressEmitter::new(&tx, Duration::ZERO);
        assert!(!emitter.due());
    }

    #[test]
    fn test_first_emit_is_immediate() {
        let (tx, mut rx) = broadcast::channel(4);
        let mut emitter = ProgressEmitter::new(&tx, Duration::from_secs(3600));
        assert!(emitter.due());

        emitter.send(ScanProgress {
            entries_processed: 1,
            files_scanned: 0,
            dirs_scanned: 1,
            bytes_scanned: 0,
            errors_count: 0,
            current_path: PathBuf::from("/"),
            elapsed: Duration::ZERO,
        });

        // Throttled now that one snapshot went out.
        assert!(!emitter.due());
        assert_eq!(rx.try_recv().unwrap().entries_processed, 1);
    }

    #[test]
    fn test_entries_per_second() {
        let progress = ScanProgress {
            entries_processed: 100,
            files_scanned: 90,
            dirs_scanned: 10,
            bytes_scanned: 4096,
            errors_count: 0,
            current_path: PathBuf::new(),
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(progress.entries_per_second(), 50.0);
    }
}
