//! # CONFLUENCE
//!
//! Entity Component System queries without an entity table.
//!
//! An entity is nothing but an identifier. Its components live in separate
//! [`ComponentSet`]s, each sorted by that identifier. Asking for "every
//! entity with a `Transform` and a `RigidBody`" is the intersection of two
//! sets, walked lazily:
//!
//! ```rust,ignore
//! use confluence::{entities, ComponentSet, Entity};
//!
//! fn integrate(mut e: Entity![&Transform, &mut RigidBody]) {
//!     let y = e.get::<Transform, _>().y;
//!     e.get_mut::<RigidBody, _>().mass += y;
//! }
//!
//! for e in entities((&transforms, &mut bodies)) {
//!     integrate(e);
//! }
//! ```
//!
//! ## Architecture Rules
//!
//! 1. **Components carry their entity id** - see [`ElementId`]
//! 2. **Sets stay sorted** - only opted-in containers ([`UnionBase`]) can be queried
//! 3. **Borrows decide access** - `&set` yields `&T`, `&mut set` yields `&mut T`

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;

pub use confluence_core::{
    config, error, get, get_mut, identifier_of, storage, union, union_begin, union_end,
    union_find, union_of, ComponentSet, ConfigError, ConfigResult, DuplicatePolicy, ElementId,
    IdOf, Intersection, OrderedSequence, SeqCursor, StorageConfig, StorageError, StorageResult,
    Union, UnionBase, View, ViewOf,
};
pub use ecs::{entities, entities_begin, entities_end, entities_find, EntityIter};
