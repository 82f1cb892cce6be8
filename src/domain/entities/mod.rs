//! Domain Entities
//!
//! - `FileManifest` - ordered path set of a snapshot
//! - `LockRecord` - informational content of the deploy lock

mod lock_record;
mod manifest;

pub use lock_record::LockRecord;
pub use manifest::{compare_entries, FileManifest, ManifestEntry};
