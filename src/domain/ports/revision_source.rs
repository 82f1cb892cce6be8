//! RevisionSource port - computes the current source revision

use crate::domain::value_objects::Revision;
use crate::error::HoistResult;

/// Produces the identifier of the source tree as it is right now.
///
/// Implementations:
/// - `ContentHashSource` - SHA-256 over the working tree
/// - `GitRevisionSource` - `git rev-parse HEAD`
pub trait RevisionSource {
    /// Short label for diagnostics ("content", "git")
    fn name(&self) -> &'static str;

    fn current(&self) -> HoistResult<Revision>;
}

impl<T: RevisionSource + ?Sized> RevisionSource for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn current(&self) -> HoistResult<Revision> {
        (**self).current()
    }
}
