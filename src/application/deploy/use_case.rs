//! Deploy Use Case
//!
//! Revision check, lock, build, promote, record. The lock guard lives for
//! the rest of `execute` once taken, so every exit after that point
//! releases it.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::application::promotion::PromotionEngine;
use crate::application::revision_tracker::RevisionTracker;
use crate::domain::ports::{DeployEvent, DeployEventSink, RevisionSource, SiteBuilder};
use crate::domain::value_objects::{DeployLayout, Revision};
use crate::error::HoistResult;
use crate::infrastructure::fs::remove_with_retries;
use crate::infrastructure::{
    DeployLock, LockPolicy, RevisionMarkerRepository, SnapshotInfo, SnapshotStore,
};

use super::options::DeployOptions;
use super::result::{DeployOutcome, DeployResult};

/// Poll interval while waiting for a free snapshot name
const SNAPSHOT_NAME_POLL: Duration = Duration::from_millis(200);

/// Polls spent waiting for a name that sorts after the previous snapshot
const MAX_ORDERING_POLLS: u32 = 10;

pub struct DeployUseCase<RS: RevisionSource, B: SiteBuilder> {
    layout: DeployLayout,
    tracker: RevisionTracker<RS>,
    lock: DeployLock,
    store: SnapshotStore,
    engine: PromotionEngine,
    builder: B,
    /// Snapshot currently being built, if any
    in_progress: Arc<Mutex<Option<PathBuf>>>,
}

impl<RS: RevisionSource, B: SiteBuilder> DeployUseCase<RS, B> {
    pub fn new(layout: DeployLayout, source: RS, builder: B, policy: LockPolicy) -> Self {
        let store = SnapshotStore::new(layout.snapshots_dir());
        Self {
            tracker: RevisionTracker::new(
                source,
                RevisionMarkerRepository::new(layout.marker_path()),
            ),
            lock: DeployLock::new(layout.lock_path(), policy),
            engine: PromotionEngine::new(layout.deploy_dir(), store.clone()),
            store,
            builder,
            layout,
            in_progress: Arc::new(Mutex::new(None)),
        }
    }

    pub fn layout(&self) -> &DeployLayout {
        &self.layout
    }

    /// The lock this use case takes; the binary watches its held flag
    pub fn lock(&self) -> &DeployLock {
        &self.lock
    }

    /// Path of the snapshot while its build runs; the binary removes it on
    /// interrupt so a partial build is never left behind
    pub fn in_progress_snapshot(&self) -> Arc<Mutex<Option<PathBuf>>> {
        Arc::clone(&self.in_progress)
    }

    pub fn execute(
        &self,
        options: &DeployOptions,
        events: &dyn DeployEventSink,
    ) -> HoistResult<DeployOutcome> {
        events.on_event(DeployEvent::Started {
            root: self.layout.root().to_path_buf(),
            config: options.config_path.clone(),
        });

        std::fs::create_dir_all(self.layout.output_dir())?;

        let decision = self.tracker.should_deploy()?;
        events.on_event(DeployEvent::RevisionChecked {
            old: decision.old_revision.clone(),
            new: decision.new_revision.clone(),
            strategy: self.tracker.source_name(),
        });

        if !decision.proceed && !options.force {
            events.on_event(DeployEvent::UpToDate {
                revision: decision.new_revision.clone(),
            });
            return Ok(DeployOutcome::UpToDate {
                revision: decision.new_revision,
            });
        }

        let guard = self.lock.acquire(events)?;

        self.store.ensure_dir()?;
        let latest = self.store.latest()?;
        let baseline = self.store.baseline(decision.old_revision.as_ref())?;
        let snapshot = self.next_snapshot_path(&decision.new_revision, latest.as_ref());

        events.on_event(DeployEvent::BuildStarted {
            snapshot: snapshot.clone(),
            builder: self.builder.describe(),
        });
        self.set_in_progress(Some(&snapshot));
        let built = self.builder.build(&snapshot);
        self.set_in_progress(None);
        if let Err(err) = built {
            // A half-written build must not become the next cleanup baseline.
            if let Err(cleanup) = remove_with_retries(&snapshot, 0, Duration::ZERO) {
                events.on_event(DeployEvent::SnapshotCleanupFailed {
                    snapshot: snapshot.clone(),
                    error: cleanup.to_string(),
                });
            }
            return Err(err.into_hoist(&snapshot));
        }
        events.on_event(DeployEvent::Built {
            snapshot: snapshot.clone(),
        });

        let promotion = self.engine.promote(
            baseline.as_ref().map(|s| s.path.as_path()),
            &snapshot,
            events,
        )?;

        self.tracker.record(&decision.new_revision)?;
        events.on_event(DeployEvent::MarkerSaved {
            path: self.tracker.marker().path().to_path_buf(),
            revision: decision.new_revision.clone(),
        });

        // The deploy is live and recorded; a leftover record only needs `hoist unlock`.
        let lock_path = guard.path().to_path_buf();
        if let Err(err) = guard.release() {
            events.on_event(DeployEvent::LockReleaseFailed {
                path: lock_path,
                error: err.to_string(),
            });
        }

        events.on_event(DeployEvent::Completed {
            old: decision.old_revision.clone(),
            new: decision.new_revision.clone(),
            removed_count: promotion.removed_count(),
        });

        Ok(DeployOutcome::Deployed(DeployResult {
            old_revision: decision.old_revision,
            new_revision: decision.new_revision,
            snapshot,
            previous_snapshot: baseline.map(|s| s.path),
            promotion,
        }))
    }

    fn set_in_progress(&self, snapshot: Option<&PathBuf>) {
        if let Ok(mut slot) = self.in_progress.lock() {
            *slot = snapshot.cloned();
        }
    }

    /// A name that is unused and sorts after `previous`.
    ///
    /// Snapshot names have second precision, so two deploys within the same
    /// second may have to wait for the clock to tick. The ordering wait is
    /// bounded so a snapshot stamped in the future cannot stall the deploy.
    fn next_snapshot_path(&self, revision: &Revision, previous: Option<&SnapshotInfo>) -> PathBuf {
        let mut polls = 0;
        loop {
            let path = self.store.new_snapshot_path(revision, Utc::now());
            let after_previous = match previous {
                Some(p) => polls >= MAX_ORDERING_POLLS || path.file_name() > p.path.file_name(),
                None => true,
            };
            polls += 1;
            if after_previous && path.symlink_metadata().is_err() {
                return path;
            }
            std::thread::sleep(SNAPSHOT_NAME_POLL);
        }
    }
}
