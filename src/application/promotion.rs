//! Promotion Engine
//!
//! Publishes a snapshot into the live deploy directory without ever
//! replacing the directory wholesale:
//!
//! 1. copy the whole new snapshot over the deploy directory (add/overwrite)
//! 2. remove exactly the entries of the previous snapshot that the new one
//!    no longer has
//!
//! Entries present in both snapshots are only ever overwritten.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::FileManifest;
use crate::domain::ports::{DeployEvent, DeployEventSink};
use crate::error::{HoistError, HoistResult};
use crate::infrastructure::fs::{copy_tree, remove_with_retries};
use crate::infrastructure::SnapshotStore;

/// Extra attempts for a removal that failed transiently
pub const REMOVE_RETRIES: u32 = 2;

/// Pause between removal attempts
pub const REMOVE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// A stale entry that could not be removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRemoval {
    pub path: String,
    pub error: String,
}

/// What a promotion changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionReport {
    /// Manifest of the promoted snapshot
    pub built: FileManifest,
    /// Files copied into the deploy directory
    pub copied_files: usize,
    /// Stale entries that are gone from the deploy directory
    pub removed: Vec<String>,
    /// Stale entries that are still there
    pub failed: Vec<FailedRemoval>,
}

impl PromotionReport {
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct PromotionEngine {
    deploy_dir: PathBuf,
    store: SnapshotStore,
    remove_retries: u32,
    retry_delay: Duration,
}

impl PromotionEngine {
    pub fn new(deploy_dir: impl Into<PathBuf>, store: SnapshotStore) -> Self {
        Self {
            deploy_dir: deploy_dir.into(),
            store,
            remove_retries: REMOVE_RETRIES,
            retry_delay: REMOVE_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn deploy_dir(&self) -> &Path {
        &self.deploy_dir
    }

    /// Promote `new` over the deploy directory, cleaning up after `old`.
    ///
    /// A copy failure aborts with `CopyFailed`; removal failures are
    /// reported in the result and do not abort.
    pub fn promote(
        &self,
        old: Option<&Path>,
        new: &Path,
        events: &dyn DeployEventSink,
    ) -> HoistResult<PromotionReport> {
        let built = self.store.list_files(Some(new))?;

        let detailed = events.wants_detailed_events();
        let copied_files = copy_tree(new, &self.deploy_dir, |rel| {
            if detailed {
                events.on_event(DeployEvent::FileCopied {
                    path: rel.to_string(),
                });
            }
        })
        .map_err(|e| HoistError::CopyFailed {
            from: e.from,
            to: e.to,
            source: e.error,
        })?;
        events.on_event(DeployEvent::Copied {
            file_count: copied_files,
        });

        let old_files = self.store.list_files(old)?;
        let mut report = PromotionReport {
            built,
            copied_files,
            ..PromotionReport::default()
        };

        for entry in old_files.difference(&report.built) {
            let target = self.deploy_dir.join(entry.path());
            match remove_with_retries(&target, self.remove_retries, self.retry_delay) {
                Ok(_) => {
                    if detailed {
                        events.on_event(DeployEvent::FileRemoved {
                            path: entry.path().to_string(),
                        });
                    }
                    report.removed.push(entry.path().to_string());
                }
                Err(err) => {
                    events.on_event(DeployEvent::RemoveFailed {
                        path: entry.path().to_string(),
                        error: err.to_string(),
                    });
                    report.failed.push(FailedRemoval {
                        path: entry.path().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        if !report.removed.is_empty() {
            events.on_event(DeployEvent::CleanedUp {
                count: report.removed.len(),
            });
        }

        Ok(report)
    }
}
