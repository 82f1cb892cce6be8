//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod layout;
mod revision;
mod snapshot_name;

pub use layout::{DeployLayout, LOCK_FILE_NAME, MARKER_FILE_NAME};
pub use revision::{Revision, SHORT_LENGTH};
pub use snapshot_name::{SnapshotName, TIMESTAMP_FORMAT};
