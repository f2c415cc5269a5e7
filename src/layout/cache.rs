//! Per-element layout memoization.
//!
//! Every element keeps one [`LayoutCache`] with a slot per sizing phase.
//! A slot stores the answer together with the parent size it was computed
//! for; a query only hits when the phase and the parent size both match, so
//! a resize naturally forces recomputation without any explicit flush.
//!
//! Invalidation is all-or-nothing: a change notification clears all three
//! slots. Slots do not expire on their own; between two change
//! notifications every cached answer stays valid by construction.

use crate::geometry::Size;

use super::resolver::{ChildrenLayout, ElementLayout};

/// The three sizing questions an element can be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Smallest workable size.
    Min,
    /// Size wanted with unlimited space.
    Max,
    /// Size actually taken this frame.
    Render,
}

impl Phase {
    #[inline]
    const fn index(self) -> usize {
        match self {
            Phase::Min => 0,
            Phase::Max => 1,
            Phase::Render => 2,
        }
    }
}

/// One memoized layout answer.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedLayout {
    /// The parent size the query was made against (the cache key).
    pub parent: Size,
    pub layout: ElementLayout,
    /// Rects assigned to children, empty for leaves.
    pub children: ChildrenLayout,
}

/// Three keyed slots plus a lifetime counter of actual computations.
#[derive(Debug, Default)]
pub struct LayoutCache {
    slots: [Option<CachedLayout>; 3],
    computes: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached answer for this phase, if it was computed for the same
    /// parent size.
    pub fn get(&self, phase: Phase, parent: Size) -> Option<&CachedLayout> {
        self.slots[phase.index()]
            .as_ref()
            .filter(|entry| entry.parent == parent)
    }

    /// The slot contents regardless of key. The draw path uses this to pick
    /// up the entry its parent computed moments earlier in the same frame.
    pub fn peek(&self, phase: Phase) -> Option<&CachedLayout> {
        self.slots[phase.index()].as_ref()
    }

    /// Store a freshly computed answer, replacing whatever the slot held.
    pub fn store(&mut self, phase: Phase, entry: CachedLayout) {
        self.computes += 1;
        self.slots[phase.index()] = Some(entry);
    }

    /// Drop all three slots. The computation counter survives so callers
    /// can observe recomputation across invalidations.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// How many layouts were ever computed (stores, not hits).
    #[inline]
    pub fn computes(&self) -> u64 {
        self.computes
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::resolver::{resolve_box, BoxSpec};

    fn entry(parent: Size) -> CachedLayout {
        CachedLayout {
            parent,
            layout: resolve_box(&BoxSpec::default(), Size::new(5, 1), parent),
            children: vec![Rect::new(0, 0, 5, 1)],
        }
    }

    #[test]
    fn test_get_requires_matching_parent() {
        let mut cache = LayoutCache::new();
        cache.store(Phase::Min, entry(Size::new(80, 24)));

        assert!(cache.get(Phase::Min, Size::new(80, 24)).is_some());
        assert!(cache.get(Phase::Min, Size::new(40, 24)).is_none());
        assert!(cache.get(Phase::Max, Size::new(80, 24)).is_none());
    }

    #[test]
    fn test_phases_are_independent_slots() {
        let mut cache = LayoutCache::new();
        cache.store(Phase::Min, entry(Size::new(10, 10)));
        cache.store(Phase::Render, entry(Size::new(20, 20)));

        assert!(cache.get(Phase::Min, Size::new(10, 10)).is_some());
        assert!(cache.get(Phase::Render, Size::new(20, 20)).is_some());
        assert!(cache.get(Phase::Max, Size::new(10, 10)).is_none());
    }

    #[test]
    fn test_store_replaces_slot() {
        let mut cache = LayoutCache::new();
        cache.store(Phase::Render, entry(Size::new(80, 24)));
        cache.store(Phase::Render, entry(Size::new(40, 12)));

        assert!(cache.get(Phase::Render, Size::new(80, 24)).is_none());
        assert!(cache.get(Phase::Render, Size::new(40, 12)).is_some());
    }

    #[test]
    fn test_peek_ignores_key() {
        let mut cache = LayoutCache::new();
        assert!(cache.peek(Phase::Render).is_none());
        cache.store(Phase::Render, entry(Size::new(80, 24)));
        assert_eq!(
            cache.peek(Phase::Render).map(|e| e.parent),
            Some(Size::new(80, 24))
        );
    }

    #[test]
    fn test_clear_empties_all_slots_but_keeps_counter() {
        let mut cache = LayoutCache::new();
        cache.store(Phase::Min, entry(Size::new(10, 10)));
        cache.store(Phase::Max, entry(Size::new(10, 10)));
        assert_eq!(cache.computes(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.computes(), 2);
    }
}
