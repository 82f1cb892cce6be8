//! File manifest
//!
//! The ordered list of relative paths inside a snapshot. Manifests are only
//! used to compute which paths disappeared between two snapshots; they are
//! never written to disk.

use std::cmp::Ordering;
use std::collections::HashSet;

/// One entry of a snapshot tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
    path: String,
    is_dir: bool,
}

impl ManifestEntry {
    /// `path` is relative to the snapshot root and uses `/` separators.
    pub fn new(path: impl Into<String>, is_dir: bool) -> Self {
        let path = path.into();
        let path = path.trim_matches('/').to_string();
        Self { path, is_dir }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, false)
    }

    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, true)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Whether the entry sits directly under the snapshot root
    pub fn is_top_level(&self) -> bool {
        !self.path.contains('/')
    }
}

/// Manifest ordering: directories before files, then entries directly under
/// the root, then byte-wise order of the full relative path.
pub fn compare_entries(a: &ManifestEntry, b: &ManifestEntry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| b.is_top_level().cmp(&a.is_top_level()))
        .then_with(|| a.path.cmp(&b.path))
}

/// Sorted, de-duplicated set of snapshot entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileManifest {
    entries: Vec<ManifestEntry>,
}

impl FileManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest from entries in any order.
    pub fn from_entries(entries: impl IntoIterator<Item = ManifestEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut entries: Vec<ManifestEntry> = entries
            .into_iter()
            .filter(|e| !e.path.is_empty())
            .filter(|e| seen.insert(e.path.clone()))
            .collect();
        entries.sort_by(compare_entries);
        Self { entries }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Entries of `self` whose path is absent from `other`, in manifest order.
    pub fn difference<'a>(&'a self, other: &FileManifest) -> Vec<&'a ManifestEntry> {
        let keep: HashSet<&str> = other.paths().collect();
        self.entries
            .iter()
            .filter(|e| !keep.contains(e.path.as_str()))
            .collect()
    }
}
