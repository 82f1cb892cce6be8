//! Deploy Event Port
//!
//! Provides an observable interface for deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::Revision;

/// Event emitted during deploy operations
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        root: PathBuf,
        config: Option<PathBuf>,
    },

    /// Old and new revisions were compared
    RevisionChecked {
        old: Option<Revision>,
        new: Revision,
        strategy: &'static str,
    },

    /// Nothing to deploy; the marker already names the current revision
    UpToDate { revision: Revision },

    /// The lock is held elsewhere; waiting before the next attempt
    LockWaiting {
        attempt: u32,
        max_attempts: u32,
        delay: Duration,
    },

    /// The deploy lock was taken
    LockAcquired { path: PathBuf },

    /// The site build is starting
    BuildStarted { snapshot: PathBuf, builder: String },

    /// The site build finished into the snapshot
    Built { snapshot: PathBuf },

    /// A failed build's partial snapshot could not be removed
    SnapshotCleanupFailed { snapshot: PathBuf, error: String },

    /// A single entry was copied into the deploy directory
    FileCopied { path: String },

    /// The snapshot was copied into the deploy directory
    Copied { file_count: usize },

    /// A stale entry was removed from the deploy directory
    FileRemoved { path: String },

    /// A stale entry could not be removed
    RemoveFailed { path: String, error: String },

    /// Summary of the cleanup pass
    CleanedUp { count: usize },

    /// The revision marker now names the deployed revision
    MarkerSaved { path: PathBuf, revision: Revision },

    /// The deploy finished but its lock record could not be removed
    LockReleaseFailed { path: PathBuf, error: String },

    /// Deploy completed
    Completed {
        old: Option<Revision>,
        new: Revision,
        removed_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (e.g., per-file)
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
