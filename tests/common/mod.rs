//! Common test utilities for hoist CLI tests.
//!
//! - `TestEnv`: isolated project directory plus helpers to run the binary

pub mod env;

pub use env::*;
