//! Bounded position history per body

use crate::body::BodyId;
use glam::DVec2;
use std::collections::{HashMap, VecDeque};

/// Keeps a FIFO trail of past positions for each live body.
///
/// Trails are display data only; nothing in the physics reads them. A body
/// gets its first trail entry on the first tick after creation, and a body
/// created by a merge starts with no history at all.
#[derive(Debug)]
pub struct TrailManager {
    trails: HashMap<BodyId, VecDeque<DVec2>>,
    limit: usize,
}

impl TrailManager {
    pub fn new(limit: usize) -> Self {
        Self {
            trails: HashMap::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the bound. Takes effect prospectively: existing trails shrink
    /// on their next append, not immediately.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// Push a position onto the trail for `id`, evicting oldest-first once
    /// the trail exceeds the bound
    pub fn append(&mut self, id: BodyId, position: DVec2) {
        let trail = self.trails.entry(id).or_default();
        trail.push_back(position);
        while trail.len() > self.limit {
            trail.pop_front();
        }
    }

    /// Oldest-to-newest copy of the trail for `id`; empty for unknown ids
    pub fn positions(&self, id: BodyId) -> Vec<DVec2> {
        self.trails
            .get(&id)
            .map(|trail| trail.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, id: BodyId) -> usize {
        self.trails.get(&id).map_or(0, VecDeque::len)
    }

    /// Drop trails whose body is no longer live
    pub fn retain_live<F>(&mut self, mut live: F)
    where
        F: FnMut(BodyId) -> bool,
    {
        self.trails.retain(|&id, _| live(id));
    }

    pub fn clear(&mut self) {
        self.trails.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_never_exceeds_the_limit() {
        let mut trails = TrailManager::new(3);
        for i in 0..10 {
            trails.append(BodyId(0), DVec2::new(i as f64, 0.0));
            assert!(trails.len(BodyId(0)) <= 3);
        }
        // Oldest entries were evicted first
        let kept = trails.positions(BodyId(0));
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].x, 7.0);
        assert_eq!(kept[2].x, 9.0);
    }

    #[test]
    fn limit_change_is_prospective() {
        let mut trails = TrailManager::new(5);
        for i in 0..5 {
            trails.append(BodyId(0), DVec2::new(i as f64, 0.0));
        }

        trails.set_limit(2);
        // Not resized until the next append
        assert_eq!(trails.len(BodyId(0)), 5);

        trails.append(BodyId(0), DVec2::new(5.0, 0.0));
        assert_eq!(trails.len(BodyId(0)), 2);
        assert_eq!(trails.positions(BodyId(0))[1].x, 5.0);
    }

    #[test]
    fn zero_limit_keeps_trails_empty() {
        let mut trails = TrailManager::new(0);
        trails.append(BodyId(0), DVec2::ONE);
        assert_eq!(trails.len(BodyId(0)), 0);
    }

    #[test]
    fn unknown_ids_have_empty_trails() {
        let trails = TrailManager::new(4);
        assert!(trails.positions(BodyId(9)).is_empty());
        assert_eq!(trails.len(BodyId(9)), 0);
    }

    #[test]
    fn retain_live_drops_dead_trails() {
        let mut trails = TrailManager::new(4);
        trails.append(BodyId(0), DVec2::ZERO);
        trails.append(BodyId(1), DVec2::ONE);

        trails.retain_live(|id| id == BodyId(1));
        assert!(trails.positions(BodyId(0)).is_empty());
        assert_eq!(trails.len(BodyId(1)), 1);
    }
}
