//! Presentation-time views over diskstat scan results.
//!
//! Nothing here touches the filesystem or mutates a [`UsageNode`] tree:
//! sorting produces borrowed views rebuilt from canonical child order on
//! every call, and reports read the already-aggregated extension table.
//!
//! ```rust,ignore
//! use diskstat_analyze::{ExtensionReport, SortDirection, SortKey, sorted_children};
//! use diskstat_scan::{ScanEngine, ScanOptions};
//!
//! let result = ScanEngine::new().scan(&ScanOptions::new("/data")).unwrap();
//!
//! for child in sorted_children(&result.root, SortKey::Size, SortDirection::Descending) {
//!     println!("{}: {}", child.name, child.size);
//! }
//!
//! let report = ExtensionReport::new(&result.extensions, result.total_size());
//! for row in report.top_n(10) {
//!     println!("{}: {}", row.label(), row.size);
//! }
//! ```

mod report;
mod sort;

pub use report::{ExtensionReport, ExtensionUsage};
pub use sort::{SortDirection, SortKey, sorted_children};

// Re-export core types
pub use diskstat_core::{ExtensionTable, UsageNode};
