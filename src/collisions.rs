//! Collision detection and inelastic merge resolution
//!
//! Overlapping bodies merge into a single fresh body that conserves mass
//! and momentum but not kinetic energy. Merges inside one tick are applied
//! in ascending pair order over the id-ordered body list, and any pair
//! touching an id consumed by an earlier merge is skipped, which keeps
//! cascade handling deterministic.

use crate::body::{Body, BodyId};
use crate::registry::BodyRegistry;
use log::debug;
use std::collections::HashSet;

/// A detected overlap between two live bodies, with `first < second`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub first: BodyId,
    pub second: BodyId,
}

/// Scan the id-ordered body list for overlapping pairs.
///
/// Two bodies collide when their centers sit closer than the sum of their
/// radii. Pairs come out in ascending pair order over the input list, which
/// fixes the order `resolve_collisions` consumes them in.
pub fn detect_collisions(bodies: &[Body]) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            if bodies[i].overlaps(&bodies[j]) {
                pairs.push(CollisionPair {
                    first: bodies[i].id,
                    second: bodies[j].id,
                });
            }
        }
    }
    pairs
}

/// Merge every collidable pair into a fresh body.
///
/// The merged body takes the combined mass, the mass-weighted position and
/// the momentum-conserving velocity, and is created through the normal
/// spawn path, so it gets a brand new id and no history. Both inputs are
/// removed. Returns the ids created by merges this tick.
pub fn resolve_collisions(registry: &mut BodyRegistry, pairs: &[CollisionPair]) -> Vec<BodyId> {
    let mut consumed: HashSet<BodyId> = HashSet::new();
    let mut created = Vec::new();

    for pair in pairs {
        // Skip pairs referencing a body an earlier merge already consumed
        if consumed.contains(&pair.first) || consumed.contains(&pair.second) {
            continue;
        }

        let a = registry.get(pair.first).copied();
        let b = registry.get(pair.second).copied();
        if let (Some(a), Some(b)) = (a, b) {
            registry.remove_one(pair.first);
            registry.remove_one(pair.second);

            let total_mass = a.mass + b.mass;
            let position = (a.position * a.mass + b.position * b.mass) / total_mass;
            let velocity = (a.momentum() + b.momentum()) / total_mass;
            let id = registry.spawn(position, velocity, total_mass);

            debug!(
                "merged {} and {} into {} (mass {:.1})",
                pair.first, pair.second, id, total_mass
            );
            consumed.insert(pair.first);
            consumed.insert(pair.second);
            created.push(id);
        }
    }

    created
}
