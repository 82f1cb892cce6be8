//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod revision_source;
pub mod site_builder;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use revision_source::RevisionSource;
pub use site_builder::{BuildError, SiteBuilder};
