//! # Identifier Projection
//!
//! Every record stored in an ordered sequence carries an identifier shared
//! with records of other types. The identifier is the only thing the engine
//! ever compares: two records "belong to the same entity" when their
//! identifiers are equal.

use std::fmt::Debug;

/// Projection from a record to its shared identifier.
///
/// Implement this once per record type. Different record types may
/// compute their identifier differently, as long as all types taking part
/// in one union use the same `Id` type.
///
/// The projection must agree with the order of the sequence the record
/// lives in. The engine relies on it and never checks it in release builds.
///
/// # Example
///
/// ```rust
/// use confluence_core::ElementId;
///
/// struct Transform {
///     id: u32,
///     x: f32,
/// }
///
/// impl ElementId for Transform {
///     type Id = u32;
///
///     fn element_id(&self) -> u32 {
///         self.id
///     }
/// }
/// ```
pub trait ElementId {
    /// The identifier type. Totally ordered and cheap to copy.
    type Id: Ord + Copy + Debug;

    /// Returns the identifier of this record.
    fn element_id(&self) -> Self::Id;
}

/// Identifier type of a record.
pub type IdOf<T> = <T as ElementId>::Id;

/// Returns the identifier of `record`.
#[inline]
pub fn identifier_of<T: ElementId + ?Sized>(record: &T) -> T::Id {
    record.element_id()
}

impl<T: ElementId + ?Sized> ElementId for &T {
    type Id = T::Id;

    #[inline]
    fn element_id(&self) -> Self::Id {
        (**self).element_id()
    }
}

impl<T: ElementId + ?Sized> ElementId for &mut T {
    type Id = T::Id;

    #[inline]
    fn element_id(&self) -> Self::Id {
        (**self).element_id()
    }
}
