//! # Storage
//!
//! Containers that keep records ordered by identifier and can back a union.

mod component_set;

pub use component_set::ComponentSet;
