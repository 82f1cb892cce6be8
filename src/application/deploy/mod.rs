//! Deploy Module
//!
//! Orchestrates one deploy run.
//!
//! ## Structure
//!
//! - `options` - Per-run switches (`DeployOptions`)
//! - `result` - Outcome types (`DeployOutcome`, `DeployResult`)
//! - `use_case` - The orchestration (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use hoist::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(layout, revision_source, builder, lock_policy);
//! let outcome = use_case.execute(&DeployOptions::new(), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::{DeployOutcome, DeployResult};
pub use use_case::DeployUseCase;
