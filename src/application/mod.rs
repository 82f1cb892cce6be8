//! Application Layer
//!
//! Use cases that orchestrate the deploy flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `RevisionTracker` - Decides whether a deploy is needed, records the result
//! - `PromotionEngine` - Copies a snapshot live and removes stale entries
//! - `DeployUseCase` - Revision check, lock, build, promote, record
//! - `StatusUseCase` - Read-only status and snapshot listing

pub mod deploy;
pub mod promotion;
pub mod revision_tracker;
pub mod status;

pub use deploy::{DeployOptions, DeployOutcome, DeployResult, DeployUseCase};
pub use promotion::{FailedRemoval, PromotionEngine, PromotionReport};
pub use revision_tracker::{DeployDecision, RevisionTracker};
pub use status::{SnapshotListing, StatusReport, StatusUseCase};
