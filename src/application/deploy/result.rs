//! Deploy Result

use std::path::PathBuf;

use crate::application::promotion::PromotionReport;
use crate::domain::value_objects::Revision;

/// How a deploy run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The marker already matched; nothing was locked, built or copied
    UpToDate { revision: Revision },
    Deployed(DeployResult),
}

impl DeployOutcome {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, DeployOutcome::UpToDate { .. })
    }
}

/// Result of a deploy that promoted a new snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployResult {
    /// `None` on the first deploy
    pub old_revision: Option<Revision>,
    pub new_revision: Revision,
    /// Snapshot built and promoted by this run
    pub snapshot: PathBuf,
    /// Snapshot used as the cleanup baseline
    pub previous_snapshot: Option<PathBuf>,
    pub promotion: PromotionReport,
}

impl DeployResult {
    pub fn is_clean(&self) -> bool {
        self.promotion.is_clean()
    }
}
