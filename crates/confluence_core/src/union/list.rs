//! # Type Lists
//!
//! Heterogeneous lists are nested pairs terminated by `()`:
//!
//! ```text
//! (A, B, C)   <->   (A, (B, (C, ())))
//! ```
//!
//! The nested form lets every per-element operation be written as one impl
//! for `()` and one impl for `(Head, Tail)`, whatever the arity. Flat tuples
//! are accepted at the API surface and converted on the way in and out.

use std::marker::PhantomData;

/// Type-level index: the element is the head of the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Here;

/// Type-level index: the element is somewhere in the tail, at `I`.
#[derive(Debug, Clone, Copy, Default)]
pub struct There<I>(PhantomData<I>);

/// Flat tuple to nested list.
pub trait IntoList {
    /// The nested list form.
    type List;

    /// Converts the tuple into its nested form.
    fn into_list(self) -> Self::List;
}

/// Nested list to flat tuple.
pub trait IntoTuple {
    /// The flat tuple form.
    type Tuple;

    /// Converts the nested list into a flat tuple.
    fn into_tuple(self) -> Self::Tuple;
}

/// Number of elements of a nested list, known at compile time.
pub trait Len {
    /// The element count.
    const LEN: usize;
}

impl Len for () {
    const LEN: usize = 0;
}

impl<H, T: Len> Len for (H, T) {
    const LEN: usize = 1 + T::LEN;
}

macro_rules! nest {
    () => { () };
    ($head:ident $(, $tail:ident)*) => { ($head, nest!($($tail),*)) };
}

macro_rules! impl_tuple_list {
    ($($ty:ident $val:ident),+) => {
        impl<$($ty),+> IntoList for ($($ty,)+) {
            type List = nest!($($ty),+);

            #[inline]
            fn into_list(self) -> Self::List {
                let ($($val,)+) = self;
                nest!($($val),+)
            }
        }

        impl<$($ty),+> IntoTuple for nest!($($ty),+) {
            type Tuple = ($($ty,)+);

            #[inline]
            fn into_tuple(self) -> Self::Tuple {
                let nest!($($val),+) = self;
                ($($val,)+)
            }
        }
    };
}

impl_tuple_list!(A a);
impl_tuple_list!(A a, B b);
impl_tuple_list!(A a, B b, C c);
impl_tuple_list!(A a, B b, C c, D d);
impl_tuple_list!(A a, B b, C c, D d, E e);
impl_tuple_list!(A a, B b, C c, D d, E e, F f);
impl_tuple_list!(A a, B b, C c, D d, E e, F f, G g);
impl_tuple_list!(A a, B b, C c, D d, E e, F f, G g, H h);
