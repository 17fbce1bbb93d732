//! Precomputed flock buckets for neighbor-aware strategies.

use crate::item::AnimatedVectorItem;

/// Arena of flock buckets: `buckets[flock_id]` lists the indices (into the
/// layout's item array) of every member of that flock.
///
/// Built once per layout so flocking never scans the whole grid per entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlockIndex {
    buckets: Vec<Vec<usize>>,
}

impl FlockIndex {
    /// Group items by `flock_id`.
    #[must_use]
    pub fn build(items: &[AnimatedVectorItem]) -> Self {
        let bucket_count = items
            .iter()
            .map(|item| item.flock_id as usize + 1)
            .max()
            .unwrap_or(0);
        let mut buckets = vec![Vec::new(); bucket_count];
        for (idx, item) in items.iter().enumerate() {
            buckets[item.flock_id as usize].push(idx);
        }
        Self { buckets }
    }

    /// Item indices sharing `flock_id`; empty for unknown flocks.
    #[must_use]
    pub fn members(&self, flock_id: u32) -> &[usize] {
        self.buckets
            .get(flock_id as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of flock buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether there are no flocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn buckets_group_by_flock_id() {
        let items: Vec<_> = (0..7)
            .map(|i| {
                AnimatedVectorItem::new(i, 0, i, Vec2::ZERO, 0.0, i / 3)
            })
            .collect();
        let index = FlockIndex::build(&items);
        assert_eq!(index.len(), 3);
        assert_eq!(index.members(0), &[0, 1, 2]);
        assert_eq!(index.members(2), &[6]);
        assert!(index.members(9).is_empty());
    }

    #[test]
    fn empty_items_build_empty_index() {
        assert!(FlockIndex::build(&[]).is_empty());
    }
}
