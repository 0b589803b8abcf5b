//! Directory traversal and aggregation engine for diskstat.
//!
//! One depth-first pass over the root produces the sized usage tree, the
//! per-extension byte histogram and the non-fatal failure log together, so
//! presentation never re-walks the filesystem.
//!
//! # Overview
//!
//! - **Single-threaded traversal** keeps size accumulation and error ordering
//!   deterministic.
//! - **Partial-failure semantics**: permission denials, vanished entries and
//!   other per-entry errors are recorded and contribute zero; only an
//!   inaccessible root fails the call.
//! - **Progress updates** via a broadcast channel, throttled to the
//!   configured interval.
//! - **Cooperative cancellation** through a token, returning a partial result
//!   with a marker record.
//!
//! # Example
//!
//! ```rust,no_run
//! use diskstat_scan::{ScanEngine, ScanOptions};
//!
//! let options = ScanOptions::new("/path/to/scan");
//! let engine = ScanEngine::new();
//! let result = engine.scan(&options).unwrap();
//!
//! println!("Total size: {} bytes", result.total_size());
//! println!("Entries: {}", result.stats.entries());
//! ```
//!
//! # Progress monitoring
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use diskstat_scan::{ScanEngine, ScanOptions};
//!
//! let options = ScanOptions::builder()
//!     .root("/path/to/scan")
//!     .progress_interval(Duration::from_millis(200))
//!     .build()
//!     .unwrap();
//!
//! let engine = ScanEngine::new();
//! let mut progress_rx = engine.subscribe();
//!
//! std::thread::spawn(move || {
//!     while let Ok(progress) = progress_rx.blocking_recv() {
//!         eprintln!("{} entries so far", progress.entries_processed);
//!     }
//! });
//!
//! let result = engine.scan(&options).unwrap();
//! ```

mod progress;
mod scanner;

pub use progress::ScanProgress;
pub use scanner::ScanEngine;

// Re-export core types for convenience
pub use diskstat_core::{
    EntryKind, ErrorLog, ErrorRecord, ExtensionTable, FailureKind, ScanError, ScanOptions,
    ScanResult, ScanStats, UsageNode,
};
