//! # Component Set
//!
//! A sorted, identifier-unique set of records in one contiguous array.
//!
//! - Lookup is O(log n) by binary search
//! - Iteration is a linear walk over a slice
//! - Inserts and removals shift the tail, O(n)
//!
//! Built for read-heavy workloads: fill once, iterate many times.

use std::fmt::Debug;

use crate::config::{DuplicatePolicy, StorageConfig};
use crate::error::{StorageError, StorageResult};
use crate::union::{ElementId, IdOf, OrderedSequence, UnionBase};

/// Records sorted by identifier, at most one per identifier.
///
/// # Type Parameters
///
/// * `T` - The record type, which carries its own identifier
///
/// # Example
///
/// ```rust,ignore
/// let mut bodies = ComponentSet::new();
/// bodies.insert(RigidBody { id: 7, mass: 2 })?;
/// assert!(bodies.contains(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSet<T> {
    /// Records in ascending identifier order.
    records: Vec<T>,
    /// Insert behavior for identifiers already present.
    duplicates: DuplicatePolicy,
}

impl<T> Default for ComponentSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl<T: ElementId> ComponentSet<T> {
    /// Creates an empty set that keeps existing records on duplicate inserts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Creates an empty set from a loaded configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Capacity to reserve and duplicate policy to apply
    #[must_use]
    pub fn with_config(config: &StorageConfig) -> Self {
        Self {
            records: Vec::with_capacity(config.initial_capacity),
            duplicates: config.duplicates,
        }
    }

    /// Takes ownership of records already sorted by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unordered`] if identifiers are not strictly
    /// ascending.
    pub fn try_from_sorted(records: Vec<T>) -> StorageResult<Self> {
        if let Some(index) = records
            .windows(2)
            .position(|pair| pair[0].element_id() >= pair[1].element_id())
        {
            return Err(StorageError::Unordered { position: index + 1 });
        }
        Ok(Self {
            records,
            duplicates: DuplicatePolicy::default(),
        })
    }

    /// Returns the duplicate policy.
    #[inline]
    #[must_use]
    pub const fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Changes the duplicate policy for later inserts.
    #[inline]
    pub fn set_duplicates(&mut self, policy: DuplicatePolicy) {
        self.duplicates = policy;
    }

    /// Inserts a record at its ordered position.
    ///
    /// # Arguments
    ///
    /// * `record` - The record to insert
    ///
    /// # Returns
    ///
    /// `true` if the identifier was new, `false` if it was already present
    /// and the policy kept or replaced the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::DuplicateId`] if the identifier is present and
    /// the policy is [`DuplicatePolicy::Reject`].
    pub fn insert(&mut self, record: T) -> StorageResult<bool> {
        let id = record.element_id();
        match self.search(id) {
            Ok(index) => match self.duplicates {
                DuplicatePolicy::Keep => Ok(false),
                DuplicatePolicy::Replace => {
                    self.records[index] = record;
                    Ok(false)
                }
                DuplicatePolicy::Reject => Err(StorageError::DuplicateId(format!("{id:?}"))),
            },
            Err(index) => {
                self.records.insert(index, record);
                Ok(true)
            }
        }
    }

    /// Removes and returns the record with identifier `id`.
    pub fn remove(&mut self, id: IdOf<T>) -> Option<T> {
        self.search(id).ok().map(|index| self.records.remove(index))
    }

    /// Gets the record with identifier `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: IdOf<T>) -> Option<&T> {
        self.search(id).ok().map(|index| &self.records[index])
    }

    /// Gets the record with identifier `id` mutably.
    ///
    /// The identifier must not be changed through the returned reference.
    #[inline]
    pub fn get_mut(&mut self, id: IdOf<T>) -> Option<&mut T> {
        match self.search(id) {
            Ok(index) => Some(&mut self.records[index]),
            Err(_) => None,
        }
    }

    /// Checks if a record with identifier `id` is stored.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: IdOf<T>) -> bool {
        self.search(id).is_ok()
    }

    /// Returns the index of `id` within [`ComponentSet::as_slice`].
    #[inline]
    #[must_use]
    pub fn position(&self, id: IdOf<T>) -> Option<usize> {
        self.search(id).ok()
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if the set is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records the set can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// Iterates over records in identifier order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Iterates mutably over records in identifier order.
    ///
    /// Identifiers must not be changed through the returned references.
    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.records.iter_mut()
    }

    /// Returns all records in identifier order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Removes every record, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Keeps only the records for which `keep` returns `true`.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.records.retain(keep);
    }

    /// Consumes the set, returning its records in identifier order.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.records
    }

    fn search(&self, id: IdOf<T>) -> Result<usize, usize> {
        self.records
            .binary_search_by(|record| record.element_id().cmp(&id))
    }
}

impl<T: ElementId> OrderedSequence for ComponentSet<T> {
    type Record = T;

    #[inline]
    fn records(&self) -> &[T] {
        &self.records
    }

    #[inline]
    fn records_mut(&mut self) -> &mut [T] {
        &mut self.records
    }
}

impl<T: ElementId> UnionBase for ComponentSet<T> {}

impl<T: ElementId> FromIterator<T> for ComponentSet<T> {
    /// Sorts the records and keeps the first occurrence of each identifier.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut records: Vec<T> = iter.into_iter().collect();
        records.sort_by_key(T::element_id);
        records.dedup_by(|later, earlier| later.element_id() == earlier.element_id());
        Self {
            records,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl<T: ElementId> Extend<T> for ComponentSet<T> {
    /// Inserts every record with the set's duplicate policy.
    ///
    /// Records refused under [`DuplicatePolicy::Reject`] are skipped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for record in iter {
            if let Err(err) = self.insert(record) {
                tracing::warn!(%err, "skipping record during extend");
            }
        }
    }
}

impl<T> IntoIterator for ComponentSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ComponentSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
