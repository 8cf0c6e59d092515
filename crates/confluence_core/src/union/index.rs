//! # Union Index
//!
//! Groups borrowed sequences and hands out intersection iterators over them.
//!
//! Each source is a borrow of a container opted in with [`UnionBase`]:
//! - `&S` yields `&Record` slots
//! - `&mut S` yields `&mut Record` slots
//!
//! Shared and mutable sources mix freely in one union.

use std::fmt::Debug;

use super::id::{ElementId, IdOf};
use super::intersection::{CursorChain, CursorList, Intersection, ViewOf};
use super::list::{IntoList, Len};
use super::sequence::{Cursor, CursorMut, SeqCursor, UnionBase};

/// Where cursors start when an iterator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seek<Id> {
    /// At the first record.
    Begin,
    /// At the end.
    End,
    /// At the record with this identifier, or at the end if it is absent.
    Find(Id),
}

/// A borrowed sequence that can produce a cursor.
pub trait Source {
    /// Record type of the sequence.
    type Record: ElementId;

    /// Cursor produced by this source.
    type Cursor: SeqCursor<Record = Self::Record>;

    /// This source borrowed for a shorter lifetime.
    type Reborrowed<'b>: Source<Record = Self::Record>
    where
        Self: 'b;

    /// Reborrows the source.
    fn reborrow(&mut self) -> Self::Reborrowed<'_>;

    /// Consumes the source into a cursor placed at `seek`.
    fn into_cursor(self, seek: Seek<IdOf<Self::Record>>) -> Self::Cursor;
}

impl<'a, S: UnionBase> Source for &'a S {
    type Record = S::Record;
    type Cursor = Cursor<'a, S::Record>;
    type Reborrowed<'b> = &'b S where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> &S {
        self
    }

    #[inline]
    fn into_cursor(self, seek: Seek<IdOf<S::Record>>) -> Self::Cursor {
        let records = self.records();
        match seek {
            Seek::Begin => Cursor::begin(records),
            Seek::End => Cursor::end(records),
            Seek::Find(id) => Cursor::new(records, self.find(id)),
        }
    }
}

impl<'a, S: UnionBase> Source for &'a mut S {
    type Record = S::Record;
    type Cursor = CursorMut<'a, S::Record>;
    type Reborrowed<'b> = &'b mut S where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> &mut S {
        self
    }

    #[inline]
    fn into_cursor(self, seek: Seek<IdOf<S::Record>>) -> Self::Cursor {
        let position = match seek {
            Seek::Begin => 0,
            Seek::End => usize::MAX,
            Seek::Find(id) => self.find(id),
        };
        CursorMut::new(self.records_mut(), position)
    }
}

/// Per-element operations on a nested list of sources sharing identifier `Id`.
pub trait SourceChain<Id> {
    /// Cursors produced by the sources.
    type Cursors: CursorChain<Id>;

    /// The sources borrowed for a shorter lifetime.
    type Reborrowed<'b>: SourceChain<Id>
    where
        Self: 'b;

    /// Reborrows every source.
    fn reborrow(&mut self) -> Self::Reborrowed<'_>;

    /// Consumes every source into a cursor placed at `seek`.
    fn into_cursors(self, seek: Seek<Id>) -> Self::Cursors;
}

impl<Id> SourceChain<Id> for () {
    type Cursors = ();
    type Reborrowed<'b> = ();

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {}

    #[inline]
    fn into_cursors(self, _seek: Seek<Id>) -> Self::Cursors {}
}

impl<Id, S, T> SourceChain<Id> for (S, T)
where
    Id: Ord + Copy,
    S: Source,
    S::Record: ElementId<Id = Id>,
    T: SourceChain<Id>,
{
    type Cursors = (S::Cursor, T::Cursors);
    type Reborrowed<'b> = (S::Reborrowed<'b>, T::Reborrowed<'b>) where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {
        (self.0.reborrow(), self.1.reborrow())
    }

    #[inline]
    fn into_cursors(self, seek: Seek<Id>) -> Self::Cursors {
        (self.0.into_cursor(seek), self.1.into_cursors(seek))
    }
}

/// A non-empty list of sources, ready to back a [`Union`].
///
/// Implemented for one source `(S, ())` and for two or more sources
/// `(S0, (S1, ...))`. The empty list has no impl, so a union over nothing
/// does not compile:
///
/// ```compile_fail
/// use confluence_core::Union;
///
/// let _ = Union::new(());
/// ```
pub trait SourceList {
    /// Identifier shared by every source.
    type Id: Ord + Copy + Debug;

    /// The cursor list driven by the intersection.
    type Cursors: CursorList<Id = Self::Id>;

    /// The sources borrowed for a shorter lifetime.
    type Reborrowed<'b>: SourceList<Id = Self::Id>
    where
        Self: 'b;

    /// Reborrows every source.
    fn reborrow(&mut self) -> Self::Reborrowed<'_>;

    /// Consumes every source into a cursor placed at `seek`.
    fn into_cursors(self, seek: Seek<Self::Id>) -> Self::Cursors;
}

impl<S: Source> SourceList for (S, ()) {
    type Id = IdOf<S::Record>;
    type Cursors = (S::Cursor, ());
    type Reborrowed<'b> = (S::Reborrowed<'b>, ()) where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {
        (self.0.reborrow(), ())
    }

    #[inline]
    fn into_cursors(self, seek: Seek<Self::Id>) -> Self::Cursors {
        (self.0.into_cursor(seek), ())
    }
}

impl<S0, S1, T> SourceList for (S0, (S1, T))
where
    S0: Source,
    S1: Source,
    S1::Record: ElementId<Id = IdOf<S0::Record>>,
    T: SourceChain<IdOf<S0::Record>>,
{
    type Id = IdOf<S0::Record>;
    type Cursors = (S0::Cursor, (S1::Cursor, T::Cursors));
    type Reborrowed<'b> = (S0::Reborrowed<'b>, (S1::Reborrowed<'b>, T::Reborrowed<'b>))
    where
        Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {
        let (first, (second, rest)) = self;
        (first.reborrow(), (second.reborrow(), rest.reborrow()))
    }

    #[inline]
    fn into_cursors(self, seek: Seek<Self::Id>) -> Self::Cursors {
        let (first, (second, rest)) = self;
        (
            first.into_cursor(seek),
            (second.into_cursor(seek), rest.into_cursors(seek)),
        )
    }
}

/// Iterator over a union borrowed for `'b`.
pub type UnionIter<'b, L> =
    Intersection<<<L as SourceList>::Reborrowed<'b> as SourceList>::Cursors>;

/// Iterator over a union consumed by value.
pub type IntoUnionIter<L> = Intersection<<L as SourceList>::Cursors>;

/// The intersection of several ordered sequences.
///
/// Nothing is computed up front: every call builds a fresh
/// [`Intersection`] that walks the sequences lazily.
///
/// # Example
///
/// ```rust,ignore
/// let mut union = Union::from_tuple((&transforms, &mut bodies));
/// for mut view in union.iter() {
///     let x = view.get::<Transform, _>().x;
///     view.get_mut::<RigidBody, _>().mass += x;
/// }
/// assert!(union.find(3).is_end());
/// ```
#[derive(Debug)]
pub struct Union<L> {
    sources: L,
}

impl<L: SourceList> Union<L> {
    /// Creates a union over a nested list of sources.
    #[must_use]
    pub fn new(sources: L) -> Self
    where
        L: Len,
    {
        tracing::debug!(arity = L::LEN, "union index built");
        Self { sources }
    }

    /// Creates a union over a flat tuple of sources.
    #[must_use]
    pub fn from_tuple<T>(sources: T) -> Self
    where
        T: IntoList<List = L>,
        L: Len,
    {
        Self::new(sources.into_list())
    }

    /// Returns an iterator positioned on the first common identifier.
    #[must_use]
    pub fn begin(&mut self) -> UnionIter<'_, L> {
        Intersection::new(self.sources.reborrow().into_cursors(Seek::Begin))
    }

    /// Returns the exhausted iterator.
    #[must_use]
    pub fn end(&mut self) -> UnionIter<'_, L> {
        Intersection::new(self.sources.reborrow().into_cursors(Seek::End))
    }

    /// Returns an iterator positioned on `id`, or the exhausted iterator if
    /// any sequence lacks `id`.
    ///
    /// Every sequence is searched independently, O(k log n).
    #[must_use]
    pub fn find(&mut self, id: L::Id) -> UnionIter<'_, L> {
        let found = Intersection::new(self.sources.reborrow().into_cursors(Seek::Find(id)));
        if found.is_end() {
            tracing::trace!(?id, "lookup missed in at least one sequence");
        }
        found
    }

    /// Same as [`Union::begin`].
    #[inline]
    #[must_use]
    pub fn iter(&mut self) -> UnionIter<'_, L> {
        self.begin()
    }

    /// Returns the view of `id`, if every sequence contains it.
    #[must_use]
    pub fn get(&mut self, id: L::Id) -> Option<ViewOf<<L::Reborrowed<'_> as SourceList>::Cursors>> {
        self.find(id).next()
    }

    /// Checks if every sequence contains `id`.
    #[must_use]
    pub fn contains(&mut self, id: L::Id) -> bool {
        !self.find(id).is_end()
    }

    /// Consumes the union into an iterator positioned on the first common
    /// identifier.
    #[must_use]
    pub fn into_begin(self) -> IntoUnionIter<L> {
        Intersection::new(self.sources.into_cursors(Seek::Begin))
    }

    /// Consumes the union into the exhausted iterator.
    #[must_use]
    pub fn into_end(self) -> IntoUnionIter<L> {
        Intersection::new(self.sources.into_cursors(Seek::End))
    }

    /// Consumes the union into an iterator positioned on `id`.
    #[must_use]
    pub fn into_find(self, id: L::Id) -> IntoUnionIter<L> {
        let found = Intersection::new(self.sources.into_cursors(Seek::Find(id)));
        if found.is_end() {
            tracing::trace!(?id, "lookup missed in at least one sequence");
        }
        found
    }
}

impl<L: SourceList> IntoIterator for Union<L> {
    type Item = ViewOf<L::Cursors>;
    type IntoIter = IntoUnionIter<L>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.into_begin()
    }
}

impl<'b, L: SourceList> IntoIterator for &'b mut Union<L> {
    type Item = ViewOf<<L::Reborrowed<'b> as SourceList>::Cursors>;
    type IntoIter = UnionIter<'b, L>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// Creates a union over a flat tuple of sources.
#[inline]
#[must_use]
pub fn union_of<T>(sources: T) -> Union<T::List>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    Union::new(sources.into_list())
}

/// Returns an iterator on the first identifier common to all `sources`.
#[inline]
#[must_use]
pub fn union_begin<T>(sources: T) -> IntoUnionIter<T::List>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_of(sources).into_begin()
}

/// Returns the exhausted iterator over `sources`.
#[inline]
#[must_use]
pub fn union_end<T>(sources: T) -> IntoUnionIter<T::List>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_of(sources).into_end()
}

/// Returns an iterator on `id` over `sources`, or the exhausted iterator.
#[inline]
#[must_use]
pub fn union_find<T>(id: <T::List as SourceList>::Id, sources: T) -> IntoUnionIter<T::List>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_of(sources).into_find(id)
}
