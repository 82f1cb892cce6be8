//! Domain Layer
//!
//! Pure types of the deploy pipeline, without I/O.
//!
//! ## Structure
//!
//! - `entities/` - File manifests and the lock record
//! - `value_objects/` - Revision, snapshot names, deploy layout
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod value_objects;
