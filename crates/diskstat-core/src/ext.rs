//! Per-extension byte accumulation.

use std::collections::BTreeMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Extract the extension key for a file name.
///
/// The key is the suffix from the last `.` onwards (`"a.txt"` → `".txt"`,
/// `"archive.tar.gz"` → `".gz"`). Names without a dot, and dotfiles like
/// `".bashrc"` whose only dot leads, map to the empty string. With
/// `fold_case` the key is lowercased.
pub fn extension_of(name: &str, fold_case: bool) -> CompactString {
    let ext = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[idx..],
        _ => "",
    };
    if fold_case {
        CompactString::new(ext.to_lowercase())
    } else {
        CompactString::new(ext)
    }
}

/// Mapping from file extension to accumulated byte total.
///
/// Only file entries contribute; directories add nothing directly. Keys are
/// case-sensitive as the filesystem reports them unless the scan folds case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionTable {
    totals: BTreeMap<CompactString, u64>,
}

impl ExtensionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `size` bytes under `ext`.
    pub fn add(&mut self, ext: impl Into<CompactString>, size: u64) {
        *self.totals.entry(ext.into()).or_insert(0) += size;
    }

    /// Accumulate a file by name.
    pub fn record_file(&mut self, name: &str, size: u64, fold_case: bool) {
        self.add(extension_of(name, fold_case), size);
    }

    /// Fold another table into this one, summing matching keys and keeping
    /// all keys from both. Merging is commutative and associative, and the
    /// empty table is the identity.
    pub fn merge(&mut self, other: &ExtensionTable) {
        for (ext, size) in &other.totals {
            *self.totals.entry(ext.clone()).or_insert(0) += size;
        }
    }

    /// Bytes accumulated under `ext` (0 if absent).
    pub fn get(&self, ext: &str) -> u64 {
        self.totals.get(ext).copied().unwrap_or(0)
    }

    /// Iterate over `(extension, size)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.totals.iter().map(|(ext, size)| (ext.as_str(), *size))
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum of all accumulated bytes.
    pub fn total(&self) -> u64 {
        self.totals.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.txt", false), ".txt");
        assert_eq!(extension_of("archive.tar.gz", false), ".gz");
        assert_eq!(extension_of("Makefile", false), "");
        assert_eq!(extension_of(".bashrc", false), "");
        assert_eq!(extension_of("trailing.", false), ".");
    }

    #[test]
    fn test_extension_of_fold_case() {
        assert_eq!(extension_of("README.TXT", true), ".txt");
        assert_eq!(extension_of("README.TXT", false), ".TXT");
    }

    #[test]
    fn test_record_and_get() {
        let mut table = ExtensionTable::new();
        table.record_file("a.txt", 100, false);
        table.record_file("b.txt", 300, false);
        table.record_file("noext", 7, false);

        assert_eq!(table.get(".txt"), 400);
        assert_eq!(table.get(""), 7);
        assert_eq!(table.get(".rs"), 0);
        assert_eq!(table.total(), 407);
    }

    #[test]
    fn test_merge_empty_is_identity() {
        let mut table = ExtensionTable::new();
        table.add(".rs", 10);
        let before = table.clone();

        table.merge(&ExtensionTable::new());
        assert_eq!(table, before);
    }

    #[test]
    fn test_merge_is_commutative() {
        let mut a = ExtensionTable::new();
        a.add(".rs", 10);
        a.add(".txt", 5);

        let mut b = ExtensionTable::new();
        b.add(".txt", 3);
        b.add(".md", 1);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);

        assert_eq!(ab, ba);
        assert_eq!(ab.get(".txt"), 8);
        assert_eq!(ab.len(), 3);
    }
}
