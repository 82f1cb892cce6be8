//! Revision Tracker
//!
//! Gates the deploy: compares the current source revision with the marker
//! left by the last successful deploy.

use crate::domain::ports::RevisionSource;
use crate::domain::value_objects::Revision;
use crate::error::HoistResult;
use crate::infrastructure::RevisionMarkerRepository;

/// Outcome of the revision check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployDecision {
    pub proceed: bool,
    pub old_revision: Option<Revision>,
    pub new_revision: Revision,
}

impl DeployDecision {
    pub fn is_first_deploy(&self) -> bool {
        self.old_revision.is_none()
    }
}

pub struct RevisionTracker<RS: RevisionSource> {
    source: RS,
    marker: RevisionMarkerRepository,
}

impl<RS: RevisionSource> RevisionTracker<RS> {
    pub fn new(source: RS, marker: RevisionMarkerRepository) -> Self {
        Self { source, marker }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn marker(&self) -> &RevisionMarkerRepository {
        &self.marker
    }

    /// Revision of the last successful deploy, if any
    pub fn deployed(&self) -> HoistResult<Option<Revision>> {
        self.marker.load()
    }

    /// Revision of the source tree right now
    pub fn current(&self) -> HoistResult<Revision> {
        self.source.current()
    }

    pub fn should_deploy(&self) -> HoistResult<DeployDecision> {
        let new_revision = self.source.current()?;
        let old_revision = self.marker.load()?;
        let proceed = old_revision.as_ref() != Some(&new_revision);
        Ok(DeployDecision {
            proceed,
            old_revision,
            new_revision,
        })
    }

    /// Persist `revision` as deployed. Call only after promotion succeeded.
    pub fn record(&self, revision: &Revision) -> HoistResult<()> {
        self.marker.save(revision)
    }
}
