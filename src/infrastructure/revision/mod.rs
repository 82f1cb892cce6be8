//! Revision Sources
//!
//! Implementations of the `RevisionSource` port.

mod content;
mod git;

pub use content::{ContentHashSource, IGNORE_FILE_NAME};
pub use git::GitRevisionSource;
