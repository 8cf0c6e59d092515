//! # Composite Views
//!
//! A view bundles one reference per participating sequence, all pointing at
//! records with the same identifier. It owns nothing: each slot is a plain
//! borrow, `&T` when the sequence was borrowed shared and `&mut T` when it
//! was borrowed mutably, so the mutability of every source carries over to
//! the view.
//!
//! ```text
//! View<(&Transform, (&mut RigidBody, ()))>
//!        |                |
//!        |                +--> bodies[k]      (writable)
//!        +-------------------> transforms[j]  (read-only)
//! ```
//!
//! All capability checks happen at compile time:
//! - `get::<T, _>()` only compiles if `T` occurs exactly once in the view
//! - `get_mut::<T, _>()` additionally requires a `&mut T` slot
//! - `subset()` only compiles if every requested slot is present

use super::id::{ElementId, IdOf};
use super::list::{Here, IntoList, IntoTuple, There};

/// One element of a view: a shared or exclusive reference.
pub trait Slot {
    /// The referenced record type.
    type Target: ?Sized;

    /// Returns the referenced record.
    fn target(&self) -> &Self::Target;
}

impl<T: ?Sized> Slot for &T {
    type Target = T;

    #[inline]
    fn target(&self) -> &T {
        self
    }
}

impl<T: ?Sized> Slot for &mut T {
    type Target = T;

    #[inline]
    fn target(&self) -> &T {
        self
    }
}

/// Read access to the slot of type `T`, located at type-level index `I`.
pub trait Selector<T: ?Sized, I> {
    /// Returns the record of type `T`.
    fn select(&self) -> &T;
}

/// Write access to the `&mut T` slot located at type-level index `I`.
pub trait SelectorMut<T: ?Sized, I>: Selector<T, I> {
    /// Returns the record of type `T`, mutably.
    fn select_mut(&mut self) -> &mut T;
}

impl<T: ?Sized, Tail> Selector<T, Here> for (&T, Tail) {
    #[inline]
    fn select(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized, Tail> Selector<T, Here> for (&mut T, Tail) {
    #[inline]
    fn select(&self) -> &T {
        &*self.0
    }
}

impl<T: ?Sized, Tail> SelectorMut<T, Here> for (&mut T, Tail) {
    #[inline]
    fn select_mut(&mut self) -> &mut T {
        &mut *self.0
    }
}

impl<H, Tail, T: ?Sized, I> Selector<T, There<I>> for (H, Tail)
where
    Tail: Selector<T, I>,
{
    #[inline]
    fn select(&self) -> &T {
        self.1.select()
    }
}

impl<H, Tail, T: ?Sized, I> SelectorMut<T, There<I>> for (H, Tail)
where
    Tail: SelectorMut<T, I>,
{
    #[inline]
    fn select_mut(&mut self) -> &mut T {
        self.1.select_mut()
    }
}

/// Removes the slot `S` (at index `I`) from a list by value.
pub trait Pluck<S, I> {
    /// The list without the removed slot.
    type Rest;

    /// Splits the slot off the list.
    fn pluck(self) -> (S, Self::Rest);
}

impl<H, Tail> Pluck<H, Here> for (H, Tail) {
    type Rest = Tail;

    #[inline]
    fn pluck(self) -> (H, Tail) {
        self
    }
}

impl<H, Tail, S, I> Pluck<S, There<I>> for (H, Tail)
where
    Tail: Pluck<S, I>,
{
    type Rest = (H, <Tail as Pluck<S, I>>::Rest);

    #[inline]
    fn pluck(self) -> (S, Self::Rest) {
        let (slot, rest) = self.1.pluck();
        (slot, (self.0, rest))
    }
}

/// Builds the list `Target` out of the slots of `Self`.
///
/// `Indices` is a list of type-level indices, one per target slot. Each
/// slot is plucked out of the source before the next one is looked up, so a
/// target can never take the same source slot twice.
pub trait Sculpt<Target, Indices> {
    /// Slots of the source not used by the target.
    type Rest;

    /// Splits the target slots off the source.
    fn sculpt(self) -> (Target, Self::Rest);
}

impl<Src> Sculpt<(), ()> for Src {
    type Rest = Src;

    #[inline]
    fn sculpt(self) -> ((), Src) {
        ((), self)
    }
}

impl<Src, TH, TT, IH, IT> Sculpt<(TH, TT), (IH, IT)> for Src
where
    Src: Pluck<TH, IH>,
    <Src as Pluck<TH, IH>>::Rest: Sculpt<TT, IT>,
{
    type Rest = <<Src as Pluck<TH, IH>>::Rest as Sculpt<TT, IT>>::Rest;

    #[inline]
    fn sculpt(self) -> ((TH, TT), Self::Rest) {
        let (head, rest) = self.pluck();
        let (tail, rest) = rest.sculpt();
        ((head, tail), rest)
    }
}

/// Shortens the lifetime of every slot, keeping its mutability.
pub trait Reborrow {
    /// The same list, borrowed for `'b`.
    type Reborrowed<'b>
    where
        Self: 'b;

    /// Reborrows every slot.
    fn reborrow(&mut self) -> Self::Reborrowed<'_>;
}

impl Reborrow for () {
    type Reborrowed<'b> = ();

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {}
}

impl<T: ?Sized, Tail: Reborrow> Reborrow for (&T, Tail) {
    type Reborrowed<'b> = (&'b T, Tail::Reborrowed<'b>) where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {
        (&*self.0, self.1.reborrow())
    }
}

impl<T: ?Sized, Tail: Reborrow> Reborrow for (&mut T, Tail) {
    type Reborrowed<'b> = (&'b mut T, Tail::Reborrowed<'b>) where Self: 'b;

    #[inline]
    fn reborrow(&mut self) -> Self::Reborrowed<'_> {
        (&mut *self.0, self.1.reborrow())
    }
}

/// Turns every slot into a shared reference.
pub trait Share {
    /// The same list with only `&T` slots.
    type Shared<'b>
    where
        Self: 'b;

    /// Borrows every slot shared.
    fn share(&self) -> Self::Shared<'_>;
}

impl Share for () {
    type Shared<'b> = ();

    #[inline]
    fn share(&self) -> Self::Shared<'_> {}
}

impl<S: Slot, Tail: Share> Share for (S, Tail) {
    type Shared<'b> = (&'b S::Target, Tail::Shared<'b>) where Self: 'b;

    #[inline]
    fn share(&self) -> Self::Shared<'_> {
        (self.0.target(), self.1.share())
    }
}

/// A bundle of references to records sharing one identifier.
///
/// Obtained by iterating a [`Union`](crate::Union). Name view types with
/// the [`View!`](crate::View!) macro:
///
/// ```rust,ignore
/// fn integrate(view: View![&Velocity, &mut Position]) {
///     let dx = view.get::<Velocity, _>().x;
///     view.get_mut::<Position, _>().x += dx;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct View<L>(L);

impl<L> View<L> {
    /// Creates a view from a nested list of slots.
    #[inline]
    #[must_use]
    pub const fn new(slots: L) -> Self {
        Self(slots)
    }

    /// Creates a view from a flat tuple of slots.
    #[inline]
    #[must_use]
    pub fn from_tuple<T>(slots: T) -> Self
    where
        T: IntoList<List = L>,
    {
        Self(slots.into_list())
    }

    /// Returns the nested list of slots.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> L {
        self.0
    }

    /// Returns the slots as a flat tuple, ready for destructuring.
    #[inline]
    #[must_use]
    pub fn into_tuple(self) -> L::Tuple
    where
        L: IntoTuple,
    {
        self.0.into_tuple()
    }

    /// Returns the record of type `T`.
    ///
    /// The index `I` is inferred; call as `view.get::<T, _>()`.
    ///
    /// ```
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    ///
    /// let t = Transform(4);
    /// let view = View::from_tuple((&t,));
    /// assert_eq!(view.get::<Transform, _>().0, 4);
    /// ```
    ///
    /// A type the view does not hold is rejected:
    ///
    /// ```compile_fail
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    /// struct RigidBody(i32);
    ///
    /// let t = Transform(4);
    /// let view = View::from_tuple((&t,));
    /// let _ = view.get::<RigidBody, _>().0;
    /// ```
    #[inline]
    #[must_use]
    pub fn get<T: ?Sized, I>(&self) -> &T
    where
        L: Selector<T, I>,
    {
        self.0.select()
    }

    /// Returns the record of type `T`, mutably.
    ///
    /// Only compiles when the view holds `&mut T`, i.e. the sequence of `T`
    /// was borrowed mutably. The identifier of the record must not change.
    ///
    /// ```
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    ///
    /// let mut t = Transform(4);
    /// let mut view = View::from_tuple((&mut t,));
    /// view.get_mut::<Transform, _>().0 = 5;
    /// assert_eq!(t.0, 5);
    /// ```
    ///
    /// A shared slot cannot be written:
    ///
    /// ```compile_fail
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    ///
    /// let t = Transform(4);
    /// let mut view = View::from_tuple((&t,));
    /// view.get_mut::<Transform, _>().0 = 5;
    /// ```
    #[inline]
    #[must_use]
    pub fn get_mut<T: ?Sized, I>(&mut self) -> &mut T
    where
        L: SelectorMut<T, I>,
    {
        self.0.select_mut()
    }

    /// Converts into a view over a subset of the slots.
    ///
    /// Slot types must match exactly: use [`View::as_shared`] first to
    /// turn `&mut T` into `&T`, or [`View::reborrow`] to keep this view.
    ///
    /// ```
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    /// struct RigidBody(i32);
    ///
    /// let (t, b) = (Transform(1), RigidBody(2));
    /// let view = View::from_tuple((&t, &b));
    /// let body: View<(&RigidBody, ())> = view.subset();
    /// assert_eq!(body.get::<RigidBody, _>().0, 2);
    /// ```
    ///
    /// Asking for a slot the view does not hold is rejected:
    ///
    /// ```compile_fail
    /// use confluence_core::View;
    ///
    /// struct Transform(i32);
    /// struct RigidBody(i32);
    /// struct Character(i32);
    ///
    /// let (t, b) = (Transform(1), RigidBody(2));
    /// let view = View::from_tuple((&t, &b));
    /// let _: View<(&Character, ())> = view.subset();
    /// ```
    #[inline]
    #[must_use]
    pub fn subset<S, I>(self) -> View<S>
    where
        L: Sculpt<S, I>,
    {
        View(self.0.sculpt().0)
    }

    /// Reborrows this view for a shorter lifetime.
    #[inline]
    pub fn reborrow(&mut self) -> View<L::Reborrowed<'_>>
    where
        L: Reborrow,
    {
        View(self.0.reborrow())
    }

    /// Returns a read-only copy of this view.
    #[inline]
    #[must_use]
    pub fn as_shared(&self) -> View<L::Shared<'_>>
    where
        L: Share,
    {
        View(self.0.share())
    }
}

impl<H: Slot, Tail> View<(H, Tail)>
where
    H::Target: ElementId,
{
    /// Returns the identifier shared by every record of the view.
    #[inline]
    #[must_use]
    pub fn id(&self) -> IdOf<H::Target> {
        (self.0).0.target().element_id()
    }
}

/// Returns the record of type `T` from `view`.
#[inline]
#[must_use]
pub fn get<T: ?Sized, I, L>(view: &View<L>) -> &T
where
    L: Selector<T, I>,
{
    view.get::<T, I>()
}

/// Returns the record of type `T` from `view`, mutably.
#[inline]
#[must_use]
pub fn get_mut<T: ?Sized, I, L>(view: &mut View<L>) -> &mut T
where
    L: SelectorMut<T, I>,
{
    view.get_mut::<T, I>()
}

/// Names a view type from its slot types.
///
/// `View![&A, &mut B]` expands to `View<(&A, (&mut B, ()))>`.
#[macro_export]
macro_rules! View {
    ($($slot:ty),+ $(,)?) => {
        $crate::View<$crate::__view_list!($($slot),+)>
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __view_list {
    () => { () };
    ($head:ty $(, $tail:ty)*) => {
        ($head, $crate::__view_list!($($tail),*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Transform {
        id: u32,
        x: i32,
    }

    #[derive(Debug, PartialEq)]
    struct RigidBody {
        id: u32,
        mass: i32,
    }

    #[derive(Debug, PartialEq)]
    struct Character {
        id: u32,
        archetype: &'static str,
    }

    impl ElementId for Transform {
        type Id = u32;
        fn element_id(&self) -> u32 {
            self.id
        }
    }

    fn mass_of(view: View![&RigidBody]) -> i32 {
        view.get::<RigidBody, _>().mass
    }

    fn push(mut view: View![&mut Transform, &RigidBody]) {
        let mass = view.get::<RigidBody, _>().mass;
        view.get_mut::<Transform, _>().x += mass;
    }

    #[test]
    fn test_get_by_type() {
        let t = Transform { id: 2, x: 5 };
        let b = RigidBody { id: 2, mass: 120 };
        let view = View::from_tuple((&t, &b));

        assert_eq!(view.get::<Transform, _>(), &t);
        assert_eq!(get::<RigidBody, _, _>(&view).mass, 120);
        assert_eq!(view.id(), 2);
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut t = Transform { id: 1, x: 1 };
        let b = RigidBody { id: 1, mass: 3 };
        {
            let mut view = View::from_tuple((&mut t, &b));
            view.get_mut::<Transform, _>().x = 10;
            get_mut::<Transform, _, _>(&mut view).x += 1;
            assert_eq!(view.get::<Transform, _>().x, 11);
        }
        assert_eq!(t.x, 11);
    }

    #[test]
    fn test_subset_keeps_same_records() {
        let t = Transform { id: 3, x: 0 };
        let b = RigidBody { id: 3, mass: 9 };
        let c = Character { id: 3, archetype: "Warlord" };
        let view = View::from_tuple((&t, &b, &c));

        let reordered: View![&Character, &Transform] = view.subset();
        assert!(std::ptr::eq(reordered.get::<Character, _>(), &c));
        assert!(std::ptr::eq(reordered.get::<Transform, _>(), &t));

        assert_eq!(mass_of(view.subset()), 9);
    }

    #[test]
    fn test_reborrow_passes_subset_and_keeps_view() {
        let mut t = Transform { id: 4, x: 0 };
        let b = RigidBody { id: 4, mass: 2 };
        let c = Character { id: 4, archetype: "Hero" };
        let mut view = View::from_tuple((&mut t, &b, &c));

        push(view.reborrow().subset());
        push(view.reborrow().subset());
        view.get_mut::<Transform, _>().x += 1;

        assert_eq!(view.get::<Character, _>().archetype, "Hero");
        assert_eq!(t.x, 5);
    }

    #[test]
    fn test_as_shared_is_copy() {
        let mut t = Transform { id: 8, x: 1 };
        let b = RigidBody { id: 8, mass: 1 };
        let view = View::from_tuple((&mut t, &b));

        let shared = view.as_shared();
        let copy = shared;
        assert_eq!(shared.get::<Transform, _>().x, 1);
        assert_eq!(copy.id(), 8);
        assert_eq!(mass_of(copy.subset()), 1);
    }

    #[test]
    fn test_into_tuple_destructures() {
        let t = Transform { id: 6, x: 2 };
        let b = RigidBody { id: 6, mass: 4 };
        let (transform, body) = View::from_tuple((&t, &b)).into_tuple();
        assert_eq!(transform.x * body.mass, 8);
    }
}
