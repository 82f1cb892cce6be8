//! Snapshot Store
//!
//! Timestamped build outputs under the snapshots directory. Snapshots are
//! created by the site builder and never deleted here; they stay around as
//! history and as the baseline for the next deploy's cleanup diff.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::entities::FileManifest;
use crate::domain::value_objects::{Revision, SnapshotName};
use crate::error::HoistResult;
use crate::infrastructure::fs::manifest_of;

/// A snapshot directory found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub name: SnapshotName,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> HoistResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// All snapshots, oldest first. Entries that do not follow the
    /// `<timestamp>-<revision>` naming are skipped.
    pub fn list(&self) -> HoistResult<Vec<SnapshotInfo>> {
        let read = match std::fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut snapshots = Vec::new();
        for entry in read {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(SnapshotName::parse) else {
                continue;
            };
            snapshots.push(SnapshotInfo {
                name,
                path: entry.path(),
            });
        }

        // Names round-trip exactly, so this is the on-disk lexical order.
        snapshots.sort_by_cached_key(|s| s.name.dir_name());
        Ok(snapshots)
    }

    /// Lexically last snapshot, which by the naming convention is the newest.
    pub fn latest(&self) -> HoistResult<Option<SnapshotInfo>> {
        Ok(self.list()?.pop())
    }

    /// Snapshot that is live for `deployed`: the newest one carrying that
    /// revision, or the newest overall when none does.
    ///
    /// A newer snapshot of another revision can be left behind by an
    /// interrupted deploy and never went live.
    pub fn baseline(&self, deployed: Option<&Revision>) -> HoistResult<Option<SnapshotInfo>> {
        let mut snapshots = self.list()?;
        let matching = deployed.and_then(|rev| {
            snapshots
                .iter()
                .rposition(|s| s.name.revision() == rev)
        });
        Ok(match matching {
            Some(i) => Some(snapshots.swap_remove(i)),
            None => snapshots.pop(),
        })
    }

    /// Path the next snapshot for `revision` built at `now` will use.
    /// Creates nothing.
    pub fn new_snapshot_path(&self, revision: &Revision, now: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(SnapshotName::new(now, revision.clone()).dir_name())
    }

    /// Ordered manifest of a snapshot; an absent snapshot has an empty one.
    pub fn list_files(&self, snapshot: Option<&Path>) -> HoistResult<FileManifest> {
        match snapshot {
            None => Ok(FileManifest::new()),
            Some(path) if !path.exists() => Ok(FileManifest::new()),
            Some(path) => Ok(manifest_of(path)?),
        }
    }
}
