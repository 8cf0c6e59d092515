//! # CONFLUENCE Core Engine
//!
//! Iterates the entities present in several component sets at once.
//!
//! Every set keeps its records sorted by identifier. A [`Union`] borrows a
//! handful of them and walks their intersection lazily, leapfrogging the
//! cursors:
//! - No allocation during iteration
//! - O(1) extra memory per sequence
//! - Work proportional to the skips, not the product of the sizes
//!
//! ## Example
//!
//! ```rust,ignore
//! use confluence_core::{ComponentSet, Union, View};
//!
//! let mut union = Union::from_tuple((&transforms, &mut bodies));
//! for mut view in union.iter() {
//!     let x = view.get::<Transform, _>().x;
//!     view.get_mut::<RigidBody, _>().velocity += x;
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod storage;
pub mod union;

pub use config::{DuplicatePolicy, StorageConfig, MAX_INITIAL_CAPACITY};
pub use error::{ConfigError, ConfigResult, StorageError, StorageResult};
pub use storage::ComponentSet;
pub use union::{
    get, get_mut, identifier_of, union_begin, union_end, union_find, union_of, ElementId, IdOf,
    Intersection, OrderedSequence, SeqCursor, Union, UnionBase, View, ViewOf,
};
