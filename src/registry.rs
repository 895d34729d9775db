//! Live body arena with stable, monotonically assigned ids

use crate::body::{Body, BodyId};
use crate::error::{SimError, SimResult};
use glam::DVec2;
use std::collections::HashSet;

/// Owns the live set of bodies.
///
/// Bodies are kept in ascending id order, which makes every iteration over
/// the arena deterministic and gives collision handling a reproducible
/// tie-breaking order. Ids come from a counter that is never reset, so an id
/// handed to the host stays unique for the lifetime of the simulation even
/// across clears and merges.
#[derive(Debug)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    next_id: u32,
    radius_scale: f64,
}

impl BodyRegistry {
    pub fn new(radius_scale: f64) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 0,
            radius_scale,
        }
    }

    /// Validated creation path for hosts; rejects invalid mass and
    /// non-finite coordinates
    pub fn create(&mut self, position: DVec2, velocity: DVec2, mass: f64) -> SimResult<BodyId> {
        validate_spawn(position, velocity, mass)?;
        Ok(self.spawn(position, velocity, mass))
    }

    /// Unchecked creation, shared by `create` and merge resolution.
    /// Callers guarantee `mass > 0`.
    pub(crate) fn spawn(&mut self, position: DVec2, velocity: DVec2, mass: f64) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        // Monotonic ids mean a plain push keeps the arena sorted
        debug_assert!(
            self.bodies.last().map_or(true, |b| b.id < id),
            "id counter regressed at {id}"
        );
        self.bodies
            .push(Body::new(id, position, velocity, mass, self.radius_scale));
        id
    }

    /// Remove every body whose id is in `ids`
    pub fn remove(&mut self, ids: &HashSet<BodyId>) {
        self.bodies.retain(|b| !ids.contains(&b.id));
    }

    /// Remove a single body, returning it if it was live
    pub fn remove_one(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        Some(self.bodies.remove(index))
    }

    /// Drop all bodies. The id counter is not reset.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|index| &self.bodies[index])
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    /// Live bodies in ascending id order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }
}

/// Check creation inputs before they enter the arena.
///
/// Mass must be positive and finite; position and velocity must be finite.
/// The tick-time instability guard only inspects accumulated forces, and the
/// distance clamp plus zero-direction normalization map NaN coordinates to
/// finite forces, so non-finite state must not get past creation.
pub(crate) fn validate_spawn(position: DVec2, velocity: DVec2, mass: f64) -> SimResult<()> {
    if mass <= 0.0 || !mass.is_finite() {
        return Err(SimError::InvalidBody { mass });
    }
    if !position.is_finite() {
        return Err(SimError::NonFiniteValue { location: "position" });
    }
    if !velocity.is_finite() {
        return Err(SimError::NonFiniteValue { location: "velocity" });
    }
    Ok(())
}
