//! Status Use Case
//!
//! Read-only view of a deploy setup: marker, current revision, snapshots
//! and lock holder. Never takes the lock.

use crate::application::revision_tracker::RevisionTracker;
use crate::domain::ports::RevisionSource;
use crate::domain::value_objects::{DeployLayout, Revision};
use crate::error::HoistResult;
use crate::infrastructure::{
    DeployLock, LockPolicy, LockState, RevisionMarkerRepository, SnapshotInfo, SnapshotStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Revision named by the marker
    pub deployed: Option<Revision>,
    /// Current source revision, or why it could not be computed
    pub current: Result<Revision, String>,
    pub latest_snapshot: Option<SnapshotInfo>,
    pub snapshot_count: usize,
    pub lock: LockState,
}

impl StatusReport {
    /// Whether a plain `hoist deploy` would do anything
    pub fn is_pending(&self) -> bool {
        match &self.current {
            Ok(current) => self.deployed.as_ref() != Some(current),
            Err(_) => false,
        }
    }
}

/// A snapshot plus whether it carries the deployed revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotListing {
    pub snapshot: SnapshotInfo,
    pub is_deployed: bool,
}

pub struct StatusUseCase<RS: RevisionSource> {
    tracker: RevisionTracker<RS>,
    store: SnapshotStore,
    lock: DeployLock,
}

impl<RS: RevisionSource> StatusUseCase<RS> {
    pub fn new(layout: &DeployLayout, source: RS) -> Self {
        Self {
            tracker: RevisionTracker::new(
                source,
                RevisionMarkerRepository::new(layout.marker_path()),
            ),
            store: SnapshotStore::new(layout.snapshots_dir()),
            lock: DeployLock::new(layout.lock_path(), LockPolicy::default()),
        }
    }

    pub fn execute(&self) -> HoistResult<StatusReport> {
        let mut snapshots = self.store.list()?;
        Ok(StatusReport {
            deployed: self.tracker.deployed()?,
            current: self.tracker.current().map_err(|e| e.to_string()),
            snapshot_count: snapshots.len(),
            latest_snapshot: snapshots.pop(),
            lock: self.lock.state()?,
        })
    }

    /// Snapshots oldest first. Only the newest snapshot carrying the
    /// deployed revision is marked.
    pub fn snapshots(&self) -> HoistResult<Vec<SnapshotListing>> {
        let deployed = self.tracker.deployed()?;
        let snapshots = self.store.list()?;

        let marked = deployed.as_ref().and_then(|rev| {
            snapshots
                .iter()
                .rposition(|s| s.name.revision() == rev)
        });

        Ok(snapshots
            .into_iter()
            .enumerate()
            .map(|(i, snapshot)| SnapshotListing {
                snapshot,
                is_deployed: Some(i) == marked,
            })
            .collect())
    }
}
