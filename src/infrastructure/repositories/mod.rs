//! Repository Implementations
//!
//! On-disk state owned by the deploy pipeline.

mod marker;
mod snapshot_store;

pub use marker::RevisionMarkerRepository;
pub use snapshot_store::{SnapshotInfo, SnapshotStore};
