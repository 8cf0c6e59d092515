//! # Ordered Sequences and Cursors
//!
//! The engine never owns records. It borrows containers that keep their
//! records sorted by identifier and walks them with cursors.
//!
//! ```text
//! records:  [ r0 | r1 | r2 | r3 ]
//!                  ^              ^
//!               current          end
//! ```
//!
//! A cursor binds the live position and the end of its sequence, so it can
//! always tell whether it is exhausted without consulting the container.

use super::id::{ElementId, IdOf};

/// Contract the engine consumes from an ordered container.
///
/// Records are exposed in ascending identifier order with unique
/// identifiers. Position `0` is the beginning, `records().len()` the end.
pub trait OrderedSequence {
    /// The record type stored in this container.
    type Record: ElementId;

    /// Returns all records in identifier order.
    fn records(&self) -> &[Self::Record];

    /// Returns all records in identifier order, mutably.
    ///
    /// Callers must not change identifiers through this slice.
    fn records_mut(&mut self) -> &mut [Self::Record];

    /// Returns the position of `id`, or the end position if it is absent.
    ///
    /// The default implementation is a binary search, O(log n).
    fn find(&self, id: IdOf<Self::Record>) -> usize {
        let records = self.records();
        records
            .binary_search_by(|record| record.element_id().cmp(&id))
            .unwrap_or(records.len())
    }
}

/// Opt-in marker for containers that may be used as the base of a union.
///
/// Implementing [`OrderedSequence`] is not enough: a container must state
/// explicitly that it maintains the ordering invariant at all times.
///
/// ```
/// use confluence_core::{ElementId, OrderedSequence, Union, UnionBase};
///
/// struct Tag(u32);
///
/// impl ElementId for Tag {
///     type Id = u32;
///     fn element_id(&self) -> u32 {
///         self.0
///     }
/// }
///
/// struct Tags(Vec<Tag>);
///
/// impl OrderedSequence for Tags {
///     type Record = Tag;
///     fn records(&self) -> &[Tag] {
///         &self.0
///     }
///     fn records_mut(&mut self) -> &mut [Tag] {
///         &mut self.0
///     }
/// }
///
/// impl UnionBase for Tags {}
///
/// let tags = Tags(vec![Tag(1), Tag(2)]);
/// let mut union = Union::from_tuple((&tags,));
/// assert_eq!(union.iter().count(), 2);
/// ```
///
/// Without the marker the same container cannot back a union:
///
/// ```compile_fail
/// use confluence_core::{ElementId, OrderedSequence, Union};
///
/// struct Tag(u32);
///
/// impl ElementId for Tag {
///     type Id = u32;
///     fn element_id(&self) -> u32 {
///         self.0
///     }
/// }
///
/// struct Tags(Vec<Tag>);
///
/// impl OrderedSequence for Tags {
///     type Record = Tag;
///     fn records(&self) -> &[Tag] {
///         &self.0
///     }
///     fn records_mut(&mut self) -> &mut [Tag] {
///         &mut self.0
///     }
/// }
///
/// let tags = Tags(vec![Tag(1), Tag(2)]);
/// let mut union = Union::from_tuple((&tags,));
/// let _ = union.iter().count();
/// ```
pub trait UnionBase: OrderedSequence {}

/// A position within one ordered sequence, bound to that sequence's end.
pub trait SeqCursor {
    /// The record type under the cursor.
    type Record: ElementId;

    /// What [`SeqCursor::take`] hands out: `&T` or `&mut T`.
    type Slot;

    /// Returns the record under the cursor, or `None` at the end.
    fn peek(&self) -> Option<&Self::Record>;

    /// Returns the identifier under the cursor, or `None` at the end.
    #[inline]
    fn id(&self) -> Option<IdOf<Self::Record>> {
        self.peek().map(ElementId::element_id)
    }

    /// Moves to the next record.
    ///
    /// Stepping at the end does nothing in release builds and trips a
    /// debug assertion otherwise.
    fn step(&mut self);

    /// Hands out the current record and moves to the next one.
    fn take(&mut self) -> Option<Self::Slot>;

    /// Moves straight to the end.
    fn seek_end(&mut self);

    /// Offset of the cursor from the beginning of its sequence.
    fn position(&self) -> usize;

    /// Number of records between the cursor and the end.
    fn remaining(&self) -> usize;

    /// Checks if the cursor reached the end.
    #[inline]
    fn is_end(&self) -> bool {
        self.remaining() == 0
    }
}

#[inline]
fn debug_check_order<T: ElementId>(current: &T, rest: &[T]) {
    debug_assert!(
        rest.first()
            .map_or(true, |next| current.element_id() < next.element_id()),
        "sequence is not strictly ordered by identifier"
    );
}

/// Read-only cursor over a sorted slice.
#[derive(Debug)]
pub struct Cursor<'a, T> {
    rest: &'a [T],
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Creates a cursor at `position` (clamped to the end).
    #[inline]
    #[must_use]
    pub fn new(records: &'a [T], position: usize) -> Self {
        let position = position.min(records.len());
        Self {
            rest: &records[position..],
            position,
        }
    }

    /// Creates a cursor at the first record.
    #[inline]
    #[must_use]
    pub fn begin(records: &'a [T]) -> Self {
        Self::new(records, 0)
    }

    /// Creates a cursor at the end.
    #[inline]
    #[must_use]
    pub fn end(records: &'a [T]) -> Self {
        Self::new(records, records.len())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, T: ElementId> SeqCursor for Cursor<'a, T> {
    type Record = T;
    type Slot = &'a T;

    #[inline]
    fn peek(&self) -> Option<&T> {
        self.rest.first()
    }

    #[inline]
    fn step(&mut self) {
        debug_assert!(!self.rest.is_empty(), "stepped past the end of a sequence");
        let _ = self.take();
    }

    #[inline]
    fn take(&mut self) -> Option<&'a T> {
        let (current, rest) = self.rest.split_first()?;
        debug_check_order(current, rest);
        self.rest = rest;
        self.position += 1;
        Some(current)
    }

    #[inline]
    fn seek_end(&mut self) {
        self.position += self.rest.len();
        self.rest = &[];
    }

    #[inline]
    fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.rest.len()
    }
}

/// Mutable cursor over a sorted slice.
///
/// Every record is handed out at most once, which is what allows
/// [`SeqCursor::take`] to return `&'a mut T` without `unsafe`.
#[derive(Debug)]
pub struct CursorMut<'a, T> {
    rest: &'a mut [T],
    position: usize,
}

impl<'a, T> CursorMut<'a, T> {
    /// Creates a cursor at `position` (clamped to the end).
    #[inline]
    #[must_use]
    pub fn new(records: &'a mut [T], position: usize) -> Self {
        let position = position.min(records.len());
        Self {
            rest: &mut records[position..],
            position,
        }
    }

    /// Creates a cursor at the first record.
    #[inline]
    #[must_use]
    pub fn begin(records: &'a mut [T]) -> Self {
        Self::new(records, 0)
    }

    /// Creates a cursor at the end.
    #[inline]
    #[must_use]
    pub fn end(records: &'a mut [T]) -> Self {
        let len = records.len();
        Self::new(records, len)
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<'a, T: ElementId> SeqCursor for CursorMut<'a, T> {
    type Record = T;
    type Slot = &'a mut T;

    #[inline]
    fn peek(&self) -> Option<&T> {
        self.rest.first()
    }

    #[inline]
    fn step(&mut self) {
        debug_assert!(!self.rest.is_empty(), "stepped past the end of a sequence");
        let _ = self.take();
    }

    #[inline]
    fn take(&mut self) -> Option<&'a mut T> {
        let rest = std::mem::take(&mut self.rest);
        let (current, rest) = rest.split_first_mut()?;
        debug_check_order(current, rest);
        self.rest = rest;
        self.position += 1;
        Some(current)
    }

    #[inline]
    fn seek_end(&mut self) {
        let rest = std::mem::take(&mut self.rest);
        self.position += rest.len();
    }

    #[inline]
    fn position(&self) -> usize {
        self.position
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.rest.len()
    }
}
