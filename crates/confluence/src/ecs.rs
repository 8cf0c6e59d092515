//! # Entity Queries
//!
//! ECS names for the union operations. A query takes a flat tuple of
//! borrowed component sets:
//!
//! | Query                                   | Yields                               |
//! |-----------------------------------------|--------------------------------------|
//! | `entities((&a, &mut b))`                | a reusable [`Union`]                 |
//! | `entities_begin((&a, &b))`              | iterator on the first common entity  |
//! | `entities_end((&a, &b))`                | the exhausted iterator               |
//! | `entities_find(id, (&a, &b))`           | iterator on `id`, or exhausted       |
//!
//! A single set works too: `entities_find(id, (&a,))` is a binary search.

use confluence_core::union::{IntoList, IntoUnionIter, Len, SourceList};
use confluence_core::{union_begin, union_end, union_find, union_of, Union};

/// Iterator returned by the entity queries.
pub type EntityIter<T> = IntoUnionIter<<T as IntoList>::List>;

/// Names the view of one entity from its component borrows.
///
/// `Entity![&Transform, &mut RigidBody]` is the item type of a query over
/// `(&transforms, &mut bodies)`. Any subset, in any order, can be
/// obtained from a wider entity with [`View::subset`](crate::View::subset).
#[macro_export]
macro_rules! Entity {
    ($($component:ty),+ $(,)?) => {
        $crate::View![$($component),+]
    };
}

/// Returns the entities having a component in every one of `sets`.
#[inline]
#[must_use]
pub fn entities<T>(sets: T) -> Union<T::List>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_of(sets)
}

/// Returns an iterator on the first entity present in all `sets`.
#[inline]
#[must_use]
pub fn entities_begin<T>(sets: T) -> EntityIter<T>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_begin(sets)
}

/// Returns the exhausted iterator over `sets`.
#[inline]
#[must_use]
pub fn entities_end<T>(sets: T) -> EntityIter<T>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_end(sets)
}

/// Returns an iterator on entity `id` if every set has a component for it,
/// otherwise the exhausted iterator.
#[inline]
#[must_use]
pub fn entities_find<T>(id: <T::List as SourceList>::Id, sets: T) -> EntityIter<T>
where
    T: IntoList,
    T::List: SourceList + Len,
{
    union_find(id, sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentSet, ElementId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Armor {
        entity: u16,
        rating: u8,
    }

    impl ElementId for Armor {
        type Id = u16;
        fn element_id(&self) -> u16 {
            self.entity
        }
    }

    fn armory() -> ComponentSet<Armor> {
        [(4, 10), (9, 30), (1, 5)]
            .into_iter()
            .map(|(entity, rating)| Armor { entity, rating })
            .collect()
    }

    #[test]
    fn test_single_set_queries() {
        let armor = armory();
        assert_eq!(entities_begin((&armor,)).count(), 3);
        assert!(entities_end((&armor,)).is_end());
        assert_eq!(entities_find(9, (&armor,)).id(), Some(9));
        assert_eq!(entities_find(2, (&armor,)), entities_end((&armor,)));
    }

    #[test]
    fn test_entity_macro_names_the_item_type() {
        let mut armor = armory();
        let upgrade = |mut e: Entity![&mut Armor]| e.get_mut::<Armor, _>().rating += 1;
        entities((&mut armor,)).into_iter().for_each(upgrade);
        let ratings: Vec<u8> = armor.iter().map(|a| a.rating).collect();
        assert_eq!(ratings, vec![6, 11, 31]);
    }
}
