//! File System Helpers
//!
//! Local disk operations shared by the snapshot store, the marker
//! repository and the promotion engine.

mod atomic;
mod tree;

pub use atomic::{atomic_copy, atomic_write};
pub use tree::{
    copy_tree, manifest_of, remove_with_retries, to_relative_string, walk_tree, CopyError,
    TreeEntry,
};
