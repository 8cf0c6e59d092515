//! # Union Index and Intersection Iteration
//!
//! Streaming intersection over several identifier-ordered sequences.
//!
//! ## Layers
//!
//! - [`id`]: identifier projection (`ElementId`)
//! - [`sequence`]: ordered containers and their cursors
//! - [`list`]: nested-pair type lists and type-level indices
//! - [`view`]: composite views, one slot per sequence
//! - [`intersection`]: the leapfrog iterator
//! - [`index`]: the union that groups borrowed sequences

pub mod id;
pub mod index;
pub mod intersection;
pub mod list;
pub mod sequence;
pub mod view;

pub use id::{identifier_of, ElementId, IdOf};
pub use index::{
    union_begin, union_end, union_find, union_of, IntoUnionIter, Seek, Source, SourceChain,
    SourceList, Union, UnionIter,
};
pub use intersection::{Catch, CursorChain, CursorList, Intersection, ViewOf};
pub use list::{Here, IntoList, IntoTuple, Len, There};
pub use sequence::{Cursor, CursorMut, OrderedSequence, SeqCursor, UnionBase};
pub use view::{get, get_mut, Pluck, Reborrow, Sculpt, Selector, SelectorMut, Share, Slot, View};
