//! Hoist - snapshot-based static site deploys
//!
//! Hoist runs a site build into a timestamped snapshot directory and promotes
//! that snapshot into a live deploy directory incrementally: new files are
//! copied over, files the previous snapshot had and the new one lacks are
//! removed, everything else is left alone. A file-presence lock keeps two
//! deploys from interleaving, and a revision marker turns repeated deploys of
//! an unchanged source into no-ops.
//!
//! ## Layers
//!
//! - `domain` - Pure types and ports
//! - `infrastructure` - Filesystem, lock, revision and build adapters
//! - `application` - Use cases (`DeployUseCase`, `StatusUseCase`)
//! - `config` - `hoist.toml` loading
//! - `presentation` - CLI definitions

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    DeployOptions, DeployOutcome, DeployResult, DeployUseCase, PromotionEngine, PromotionReport,
    RevisionTracker, StatusReport, StatusUseCase,
};
pub use config::Config;
pub use domain::ports::{DeployEvent, DeployEventSink, NoopEventSink, RevisionSource, SiteBuilder};
pub use domain::value_objects::{DeployLayout, Revision, SnapshotName};
pub use error::{HoistError, HoistResult};
