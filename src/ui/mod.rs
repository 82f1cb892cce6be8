//! Console rendering for the hoist binary

pub mod console;
pub mod error;
pub mod json;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
