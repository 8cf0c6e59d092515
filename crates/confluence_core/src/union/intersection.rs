//! # Multiway Intersection Iterator
//!
//! Walks N identifier-ordered sequences in lockstep and stops only on
//! identifiers present in all of them.
//!
//! ## Synchronization
//!
//! ```text
//! max = id(driver)
//! loop:
//!     for cursor in cursors:
//!         while id(cursor) < max: step(cursor)    // exhausted -> END
//!         if id(cursor) > max: max = id(cursor); restart
//!     all cursors on max -> POSITIONED
//! ```
//!
//! Every record of every sequence is inspected at most once per traversal,
//! O(sum of lengths). There is no galloping search: intersecting a huge
//! sequence with a tiny one still walks the huge one.
//!
//! A single-sequence intersection has its own [`CursorList`] impl that
//! skips synchronization entirely.

use std::fmt::Debug;
use std::iter::FusedIterator;

use super::id::{ElementId, IdOf};
use super::list::IntoList;
use super::sequence::SeqCursor;
use super::view::View;

/// Outcome of one catch-up pass over a chain of cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catch {
    /// Every cursor sits on `max`.
    Aligned,
    /// A cursor overshot `max`; `max` was raised and the pass must restart.
    Raised,
    /// A cursor ran out of records.
    Exhausted,
}

/// Per-element operations on a nested list of cursors sharing identifier `Id`.
pub trait CursorChain<Id> {
    /// Slots handed out when every cursor takes its current record.
    type Slots;

    /// Shared references to every current record.
    type Peeks<'b>
    where
        Self: 'b;

    /// Advances every cursor to at least `max`, raising `max` on overshoot.
    fn catch_up(&mut self, max: &mut Id) -> Catch;

    /// Checks if any cursor is exhausted.
    fn any_exhausted(&self) -> bool;

    /// Moves every cursor to its end.
    fn exhaust(&mut self);

    /// Takes the current record of every cursor.
    fn take_slots(&mut self) -> Option<Self::Slots>;

    /// Borrows the current record of every cursor.
    fn peek_records(&self) -> Option<Self::Peeks<'_>>;

    /// Smallest number of records left in any cursor.
    fn min_remaining(&self) -> usize;

    /// Checks if every cursor sits on `id`.
    fn aligned_on(&self, id: Id) -> bool;
}

impl<Id> CursorChain<Id> for () {
    type Slots = ();
    type Peeks<'b> = ();

    #[inline]
    fn catch_up(&mut self, _max: &mut Id) -> Catch {
        Catch::Aligned
    }

    #[inline]
    fn any_exhausted(&self) -> bool {
        false
    }

    #[inline]
    fn exhaust(&mut self) {}

    #[inline]
    fn take_slots(&mut self) -> Option<()> {
        Some(())
    }

    #[inline]
    fn peek_records(&self) -> Option<()> {
        Some(())
    }

    #[inline]
    fn min_remaining(&self) -> usize {
        usize::MAX
    }

    #[inline]
    fn aligned_on(&self, _id: Id) -> bool {
        true
    }
}

impl<Id, H, T> CursorChain<Id> for (H, T)
where
    Id: Ord + Copy,
    H: SeqCursor,
    H::Record: ElementId<Id = Id>,
    T: CursorChain<Id>,
{
    type Slots = (H::Slot, T::Slots);
    type Peeks<'b> = (&'b H::Record, T::Peeks<'b>) where Self: 'b;

    #[inline]
    fn catch_up(&mut self, max: &mut Id) -> Catch {
        loop {
            match self.0.id() {
                None => return Catch::Exhausted,
                Some(id) if id < *max => self.0.step(),
                Some(id) if id > *max => {
                    *max = id;
                    return Catch::Raised;
                }
                Some(_) => return self.1.catch_up(max),
            }
        }
    }

    #[inline]
    fn any_exhausted(&self) -> bool {
        self.0.is_end() || self.1.any_exhausted()
    }

    #[inline]
    fn exhaust(&mut self) {
        self.0.seek_end();
        self.1.exhaust();
    }

    #[inline]
    fn take_slots(&mut self) -> Option<Self::Slots> {
        let head = self.0.take()?;
        Some((head, self.1.take_slots()?))
    }

    #[inline]
    fn peek_records(&self) -> Option<Self::Peeks<'_>> {
        Some((self.0.peek()?, self.1.peek_records()?))
    }

    #[inline]
    fn min_remaining(&self) -> usize {
        self.0.remaining().min(self.1.min_remaining())
    }

    #[inline]
    fn aligned_on(&self, id: Id) -> bool {
        self.0.id() == Some(id) && self.1.aligned_on(id)
    }
}

/// The cursor list driven by an [`Intersection`].
///
/// Implemented for one cursor `(C, ())` and for two or more cursors
/// `(C0, (C1, ...))`. The first cursor is the driver. The empty list has no
/// impl: an intersection over nothing does not compile.
pub trait CursorList {
    /// Identifier shared by every sequence, taken from the driver.
    type Id: Ord + Copy + Debug;

    /// Slots yielded per common identifier.
    type Slots;

    /// Shared references to the current records.
    type Peeks<'b>
    where
        Self: 'b;

    /// Identifier under the driver, `None` at the end.
    fn lead(&self) -> Option<Self::Id>;

    /// Moves every cursor to the next common identifier, or to the end.
    fn synchronize(&mut self);

    /// Steps the driver by one record.
    fn step_lead(&mut self);

    /// Takes the current record of every cursor, advancing each by one.
    fn take(&mut self) -> Option<Self::Slots>;

    /// Borrows the current record of every cursor.
    fn peek(&self) -> Option<Self::Peeks<'_>>;

    /// Upper bound on the number of common identifiers left.
    fn remaining(&self) -> usize;
}

impl<C: SeqCursor> CursorList for (C, ()) {
    type Id = IdOf<C::Record>;
    type Slots = (C::Slot, ());
    type Peeks<'b> = (&'b C::Record, ()) where Self: 'b;

    #[inline]
    fn lead(&self) -> Option<Self::Id> {
        self.0.id()
    }

    #[inline]
    fn synchronize(&mut self) {}

    #[inline]
    fn step_lead(&mut self) {
        self.0.step();
    }

    #[inline]
    fn take(&mut self) -> Option<Self::Slots> {
        Some((self.0.take()?, ()))
    }

    #[inline]
    fn peek(&self) -> Option<Self::Peeks<'_>> {
        Some((self.0.peek()?, ()))
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.0.remaining()
    }
}

type Chain<C0, C1, T> = (C0, (C1, T));

impl<C0, C1, T> CursorList for Chain<C0, C1, T>
where
    C0: SeqCursor,
    C1: SeqCursor,
    C1::Record: ElementId<Id = IdOf<C0::Record>>,
    T: CursorChain<IdOf<C0::Record>>,
{
    type Id = IdOf<C0::Record>;
    type Slots = <Self as CursorChain<IdOf<C0::Record>>>::Slots;
    type Peeks<'b> = <Self as CursorChain<IdOf<C0::Record>>>::Peeks<'b> where Self: 'b;

    #[inline]
    fn lead(&self) -> Option<Self::Id> {
        self.0.id()
    }

    fn synchronize(&mut self) {
        if <Self as CursorChain<IdOf<C0::Record>>>::any_exhausted(self) {
            <Self as CursorChain<IdOf<C0::Record>>>::exhaust(self);
            return;
        }
        let Some(mut max) = self.0.id() else {
            return;
        };
        loop {
            match <Self as CursorChain<IdOf<C0::Record>>>::catch_up(self, &mut max) {
                Catch::Aligned => break,
                Catch::Raised => {}
                Catch::Exhausted => {
                    <Self as CursorChain<IdOf<C0::Record>>>::exhaust(self);
                    return;
                }
            }
        }
        debug_assert!(
            <Self as CursorChain<IdOf<C0::Record>>>::aligned_on(self, max),
            "cursors are not aligned on {max:?}"
        );
    }

    #[inline]
    fn step_lead(&mut self) {
        self.0.step();
    }

    #[inline]
    fn take(&mut self) -> Option<Self::Slots> {
        <Self as CursorChain<IdOf<C0::Record>>>::take_slots(self)
    }

    #[inline]
    fn peek(&self) -> Option<Self::Peeks<'_>> {
        <Self as CursorChain<IdOf<C0::Record>>>::peek_records(self)
    }

    #[inline]
    fn remaining(&self) -> usize {
        <Self as CursorChain<IdOf<C0::Record>>>::min_remaining(self)
    }
}

/// Iterator over the identifiers common to every participating sequence.
///
/// Always either positioned on a common identifier or at the end. Yields one
/// [`View`] per common identifier, in ascending order.
///
/// Two intersections compare equal when every corresponding cursor sits at
/// the same position, which makes `find(id) == end()` the "not found" test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intersection<L> {
    cursors: L,
}

/// The view type yielded by an [`Intersection`] over `L`.
pub type ViewOf<L> = View<<L as CursorList>::Slots>;

impl<L: CursorList> Intersection<L> {
    /// Creates an intersection and moves it to the first common identifier.
    #[must_use]
    pub fn new(cursors: L) -> Self {
        let mut this = Self { cursors };
        this.cursors.synchronize();
        this
    }

    /// Creates an intersection from a flat tuple of cursors.
    #[must_use]
    pub fn from_tuple<T>(cursors: T) -> Self
    where
        T: IntoList<List = L>,
    {
        Self::new(cursors.into_list())
    }

    /// Checks if the intersection is exhausted.
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.cursors.lead().is_none()
    }

    /// Returns the current common identifier, or `None` at the end.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Option<L::Id> {
        self.cursors.lead()
    }

    /// Returns a read-only view of the current records without advancing.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<View<L::Peeks<'_>>> {
        self.cursors.peek().map(View::new)
    }

    /// Moves to the next common identifier.
    ///
    /// Advancing at the end does nothing (debug builds assert).
    pub fn advance(&mut self) {
        debug_assert!(!self.is_end(), "advanced past the end of an intersection");
        if self.is_end() {
            return;
        }
        self.cursors.step_lead();
        self.cursors.synchronize();
    }
}

impl<L: CursorList> Iterator for Intersection<L> {
    type Item = ViewOf<L>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slots = self.cursors.take()?;
        self.cursors.synchronize();
        Some(View::new(slots))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(!self.is_end());
        (lower, Some(self.cursors.remaining().max(lower)))
    }
}

impl<L: CursorList> FusedIterator for Intersection<L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union::sequence::{Cursor, CursorMut};

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: u32,
        value: i32,
    }

    impl ElementId for Rec {
        type Id = u32;
        fn element_id(&self) -> u32 {
            self.id
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Other(u32);

    impl ElementId for Other {
        type Id = u32;
        fn element_id(&self) -> u32 {
            self.0
        }
    }

    fn recs(ids: &[u32]) -> Vec<Rec> {
        ids.iter()
            .map(|&id| Rec {
                id,
                value: i32::try_from(id).unwrap() * 10,
            })
            .collect()
    }

    fn others(ids: &[u32]) -> Vec<Other> {
        ids.iter().copied().map(Other).collect()
    }

    #[test]
    fn test_pairwise_intersection() {
        let a = recs(&[1, 2, 3]);
        let b = others(&[1, 2]);
        let ids: Vec<u32> = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)))
            .map(|view| view.id())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_three_way_intersection_restarts() {
        let a = recs(&[1, 4, 5, 9, 12, 20]);
        let b = others(&[2, 5, 9, 11, 12, 30]);
        let c = others(&[0, 5, 12, 20]);
        let ids: Vec<u32> = Intersection::from_tuple((
            Cursor::begin(&a),
            Cursor::begin(&b),
            Cursor::begin(&c),
        ))
        .map(|view| view.id())
        .collect();
        assert_eq!(ids, vec![5, 12]);
    }

    #[test]
    fn test_empty_sequence_means_end() {
        let a = recs(&[1, 2, 3]);
        let b: Vec<Other> = Vec::new();
        let it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        assert!(it.is_end());
        assert_eq!(it, Intersection::from_tuple((Cursor::end(&a), Cursor::end(&b))));
    }

    #[test]
    fn test_disjoint_sequences() {
        let a = recs(&[1, 3, 5]);
        let b = others(&[2, 4, 6]);
        let mut it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        assert!(it.is_end());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_advance_and_peek() {
        let a = recs(&[1, 2, 3, 4]);
        let b = others(&[2, 4]);
        let mut it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));

        assert_eq!(it.id(), Some(2));
        let view = it.peek().unwrap();
        assert_eq!(view.get::<Rec, _>().value, 20);
        assert_eq!(view.get::<Other, _>(), &Other(2));

        it.advance();
        assert_eq!(it.id(), Some(4));
        it.advance();
        assert!(it.is_end());
        assert!(it.peek().is_none());
    }

    #[test]
    fn test_single_sequence_passes_through() {
        let a = recs(&[3, 7, 8]);
        let it = Intersection::from_tuple((Cursor::begin(&a),));
        assert_eq!(it.size_hint(), (1, Some(3)));
        let ids: Vec<u32> = it.map(|view| view.id()).collect();
        assert_eq!(ids, vec![3, 7, 8]);
    }

    #[test]
    fn test_mutable_cursor_writes_through() {
        let mut a = recs(&[1, 2, 3]);
        let b = others(&[2, 3]);
        for mut view in Intersection::from_tuple((CursorMut::begin(&mut a), Cursor::begin(&b))) {
            view.get_mut::<Rec, _>().value = -1;
        }
        let values: Vec<i32> = a.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![10, -1, -1]);
    }

    #[test]
    fn test_equality_follows_positions() {
        let a = recs(&[1, 2, 3]);
        let b = others(&[2, 3]);
        let first = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        let found = Intersection::from_tuple((Cursor::new(&a, 1), Cursor::new(&b, 0)));
        assert_eq!(first, found);

        let mut advanced = first.clone();
        advanced.advance();
        assert_ne!(first, advanced);
    }

    #[test]
    fn test_size_hint_is_bounded_by_shortest() {
        let a = recs(&[1, 2, 3, 4, 5, 6]);
        let b = others(&[2, 6]);
        let it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        let (lower, upper) = it.size_hint();
        assert_eq!(lower, 1);
        assert_eq!(upper, Some(2));
        assert_eq!(it.count(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "advanced past the end")]
    fn test_advance_past_end_is_caught_in_debug() {
        let a = recs(&[1, 2]);
        let b = others(&[3]);
        let mut it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        assert!(it.is_end());
        it.advance();
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_advance_past_end_is_a_no_op() {
        let a = recs(&[1, 2]);
        let b = others(&[3]);
        let mut it = Intersection::from_tuple((Cursor::begin(&a), Cursor::begin(&b)));
        it.advance();
        assert!(it.is_end());
        assert!(it.next().is_none());
    }
}
