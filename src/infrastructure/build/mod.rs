//! Site Builders
//!
//! Implementations of the `SiteBuilder` port.

mod command;
mod copy;

pub use command::{CommandBuilder, DEST_ENV_VAR, DEST_PLACEHOLDER};
pub use copy::StaticCopyBuilder;
