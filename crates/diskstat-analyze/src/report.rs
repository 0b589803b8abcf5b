//! Usage-by-extension report.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use diskstat_core::{ExtensionTable, percentage};

/// One row of the extension report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionUsage {
    /// Extension key, including the leading dot; empty for extensionless
    /// files.
    pub extension: CompactString,
    /// Accumulated bytes.
    pub size: u64,
}

impl ExtensionUsage {
    /// Label suitable for display; extensionless files get a placeholder.
    pub fn label(&self) -> &str {
        if self.extension.is_empty() {
            "(no extension)"
        } else {
            &self.extension
        }
    }
}

/// Extension usage ordered for presentation: size descending, ties broken by
/// extension ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionReport {
    /// Ordered rows.
    pub rows: Vec<ExtensionUsage>,
    /// Scan total the shares are computed against.
    pub total_size: u64,
}

impl ExtensionReport {
    /// Build a report from an accumulated table and the scan total.
    pub fn new(table: &ExtensionTable, total_size: u64) -> Self {
        let mut rows: Vec<ExtensionUsage> = table
            .iter()
            .map(|(extension, size)| ExtensionUsage {
                extension: CompactString::new(extension),
                size,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then_with(|| a.extension.cmp(&b.extension))
        });
        Self { rows, total_size }
    }

    /// The `n` largest rows.
    pub fn top_n(&self, n: usize) -> &[ExtensionUsage] {
        &self.rows[..self.rows.len().min(n)]
    }

    /// A row's share of the scan total, in percent (0 when the total is 0).
    pub fn share(&self, row: &ExtensionUsage) -> f64 {
        percentage(row.size, self.total_size)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the report has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExtensionTable {
        let mut table = ExtensionTable::new();
        table.add(".txt", 400);
        table.add(".rs", 100);
        table.add(".md", 100);
        table.add("", 25);
        table
    }

    #[test]
    fn test_rows_ordered_by_size_then_extension() {
        let report = ExtensionReport::new(&table(), 625);
        let keys: Vec<&str> = report.rows.iter().map(|r| r.extension.as_str()).collect();
        // .md and .rs share a size; .md wins the tie.
        assert_eq!(keys, vec![".txt", ".md", ".rs", ""]);
    }

    #[test]
    fn test_top_n_clamps() {
        let report = ExtensionReport::new(&table(), 625);
        assert_eq!(report.top_n(2).len(), 2);
        assert_eq!(report.top_n(100).len(), 4);
    }

    #[test]
    fn test_share() {
        let report = ExtensionReport::new(&table(), 625);
        assert_eq!(report.share(&report.rows[0]), 64.0);

        let empty = ExtensionReport::new(&ExtensionTable::new(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_label_for_extensionless() {
        let report = ExtensionReport::new(&table(), 625);
        let row = report.rows.iter().find(|r| r.extension.is_empty()).unwrap();
        assert_eq!(row.label(), "(no extension)");
    }
}
