//! Identifier-keyed storage for transient actors.

use std::collections::BTreeMap;

use last_stand_core::{EnemyId, ProjectileId};

/// Identifier types that a [`Registry`] can allocate.
pub(crate) trait RegistryId: Copy + Ord {
    /// Builds the identifier wrapping the provided counter value.
    fn from_counter(value: u32) -> Self;
}

impl RegistryId for EnemyId {
    fn from_counter(value: u32) -> Self {
        EnemyId::new(value)
    }
}

impl RegistryId for ProjectileId {
    fn from_counter(value: u32) -> Self {
        ProjectileId::new(value)
    }
}

/// Ordered map of actors with monotonically allocated identifiers.
///
/// Identifiers are never reused, even after the entry they named is removed.
#[derive(Debug)]
pub(crate) struct Registry<I, T> {
    entries: BTreeMap<I, T>,
    next_id: u32,
}

impl<I: RegistryId, T> Registry<I, T> {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Stores the value under a freshly allocated identifier.
    pub(crate) fn insert(&mut self, value: T) -> I {
        let id = I::from_counter(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.entries.insert(id, value);
        id
    }

    /// Mutable access to a single entry.
    pub(crate) fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Iterates entries in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    /// Iterates entries mutably in identifier order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (I, &mut T)> {
        self.entries.iter_mut().map(|(id, value)| (*id, value))
    }

    /// Removes every entry matching the predicate, returning their identifiers in order.
    pub(crate) fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<I> {
        let doomed: Vec<I> = self
            .entries
            .iter()
            .filter(|(_, value)| predicate(value))
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            let _ = self.entries.remove(id);
        }
        doomed
    }
}
