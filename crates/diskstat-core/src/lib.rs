//! Core types for diskstat.
//!
//! This crate provides the data model shared by the scanning engine and the
//! presentation layers: usage tree nodes, the per-extension byte histogram,
//! the non-fatal failure log, scan options, and size formatting.

mod error;
mod ext;
mod format;
mod node;
mod options;
mod tree;

pub use error::{ErrorLog, ErrorRecord, FailureKind, ScanError};
pub use ext::{ExtensionTable, extension_of};
pub use format::format_size;
pub use node::{EntryKind, UsageNode, percentage};
pub use options::{ScanOptions, ScanOptionsBuilder};
pub use tree::{ScanResult, ScanStats};
