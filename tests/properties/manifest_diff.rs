//! Property tests for stale-entry computation between two snapshots.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use proptest::prelude::*;

use hoist::domain::entities::{compare_entries, FileManifest, ManifestEntry};

/// File paths whose directory segments never collide with file names.
fn file_paths() -> impl Strategy<Value = BTreeSet<String>> {
    let dir = proptest::string::string_regex("[a-c]").unwrap();
    let file = proptest::string::string_regex("[a-d]\\.html").unwrap();
    let path = (proptest::collection::vec(dir, 0..=3), file).prop_map(|(dirs, file)| {
        let mut parts = dirs;
        parts.push(file);
        parts.join("/")
    });
    proptest::collection::btree_set(path, 0..12)
}

/// Manifest of a tree holding `files`, including every ancestor directory.
fn manifest_of(files: &BTreeSet<String>) -> FileManifest {
    let mut entries = Vec::new();
    for file in files {
        let parts: Vec<&str> = file.split('/').collect();
        for depth in 1..parts.len() {
            entries.push(ManifestEntry::dir(parts[..depth].join("/")));
        }
        entries.push(ManifestEntry::file(file.clone()));
    }
    FileManifest::from_entries(entries)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: stale entries are exactly old minus new.
    #[test]
    fn property_stale_entries_are_old_minus_new(
        old_files in file_paths(),
        new_files in file_paths(),
    ) {
        let old = manifest_of(&old_files);
        let new = manifest_of(&new_files);

        let stale: Vec<&str> = old.difference(&new).iter().map(|e| e.path()).collect();

        for path in &stale {
            prop_assert!(!new.contains(path));
        }
        let expected: Vec<&str> = old.paths().filter(|p| !new.contains(p)).collect();
        prop_assert_eq!(stale, expected);
    }

    /// PROPERTY: stale entries come out in manifest order.
    #[test]
    fn property_stale_entries_are_in_manifest_order(
        old_files in file_paths(),
        new_files in file_paths(),
    ) {
        let old = manifest_of(&old_files);
        let new = manifest_of(&new_files);

        let stale = old.difference(&new);

        for pair in stale.windows(2) {
            prop_assert_eq!(compare_entries(pair[0], pair[1]), Ordering::Less);
        }
    }

    /// PROPERTY: a directory that still holds a published file is never stale.
    #[test]
    fn property_ancestors_of_new_files_are_never_stale(
        old_files in file_paths(),
        new_files in file_paths(),
    ) {
        let old = manifest_of(&old_files);
        let new = manifest_of(&new_files);

        for entry in old.difference(&new) {
            let prefix = format!("{}/", entry.path());
            prop_assert!(
                !new_files.iter().any(|f| f.starts_with(&prefix)),
                "{} is an ancestor of a new file",
                entry.path()
            );
        }
    }

    /// PROPERTY: identical snapshots leave nothing to clean up.
    #[test]
    fn property_identical_manifests_have_no_stale_entries(files in file_paths()) {
        let manifest = manifest_of(&files);
        prop_assert!(manifest.difference(&manifest.clone()).is_empty());
    }
}
