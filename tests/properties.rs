//! Property tests for hoist.
//!
//! Properties use randomized input generation to protect the ordering and
//! cleanup rules that a deploy depends on.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/manifest_diff.rs"]
mod manifest_diff;

#[path = "properties/snapshot_names.rs"]
mod snapshot_names;
