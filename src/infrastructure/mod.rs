//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic writes, tree walk/copy/remove
//! - `lock/` - The deploy lock
//! - `repositories/` - Snapshot store, revision marker
//! - `revision/` - Revision sources (content hash, git)
//! - `build/` - Site builders (command, static copy)
//! - `events/` - Event sinks

pub mod build;
pub mod events;
pub mod fs;
pub mod lock;
pub mod repositories;
pub mod revision;

// Re-export for convenience
pub use build::{CommandBuilder, StaticCopyBuilder};
pub use events::JsonEventSink;
pub use lock::{Backoff, DeployLock, DeployLockGuard, LockPolicy, LockState};
pub use repositories::{RevisionMarkerRepository, SnapshotInfo, SnapshotStore};
pub use revision::{ContentHashSource, GitRevisionSource};
