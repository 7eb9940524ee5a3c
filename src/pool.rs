//! Captured pieces available for dropping.

use std::collections::BTreeMap;

use crate::role::Role;

/// A multiset of droppable piece types.
///
/// Entries are removed when their count reaches zero, so two pools compare
/// equal iff they hold the same pieces. Iteration is in [`Role`] order and
/// therefore deterministic.
#[derive(Clone, Default, Eq, PartialEq, Debug, Hash)]
pub struct Pool {
    counts: BTreeMap<Role, u8>,
}

/// The shared pool of variants that do not use one.
pub(crate) static EMPTY_POOL: Pool = Pool {
    counts: BTreeMap::new(),
};

impl Pool {
    pub const fn new() -> Pool {
        Pool {
            counts: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, role: Role) {
        *self.counts.entry(role).or_insert(0) += 1;
    }

    /// Removes one piece of the given type. Returns `false` if the pool has
    /// none.
    pub fn take(&mut self, role: Role) -> bool {
        match self.counts.get_mut(&role) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.counts.remove(&role);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, role: Role) -> u8 {
        self.counts.get(&role).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of pieces in the pool.
    pub fn len(&self) -> usize {
        self.counts.values().map(|&count| count as usize).sum()
    }

    /// `(role, count)` pairs in [`Role`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, u8)> + '_ {
        self.counts.iter().map(|(&role, &count)| (role, count))
    }

    /// Piece types present in the pool.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.counts.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_zero_removes_entry() {
        let mut pool = Pool::new();
        pool.add(Role::Knight);
        pool.add(Role::Knight);
        assert_eq!(pool.count(Role::Knight), 2);
        assert!(pool.take(Role::Knight));
        assert!(pool.take(Role::Knight));
        assert!(!pool.take(Role::Knight));
        assert!(pool.is_empty());
        assert_eq!(pool, Pool::new());
    }

    #[test]
    fn test_len() {
        let mut pool = Pool::new();
        pool.add(Role::Pawn);
        pool.add(Role::Pawn);
        pool.add(Role::Rook);
        assert_eq!(pool.len(), 3);
    }
}
