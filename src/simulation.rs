//! Simulation context and the per-tick pipeline
//!
//! One `tick` runs force accumulation, integration, collision resolution,
//! trail appends, and center-of-mass recomputation, in that order, then
//! hands back an owned snapshot. The context holds no UI state; hosts
//! translate input gestures into `create_body` calls and render from
//! snapshots.

use crate::body::{Body, BodyId};
use crate::collisions::{detect_collisions, resolve_collisions};
use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::forces::compute_forces;
use crate::integrator;
use crate::presets::Preset;
use crate::registry::{self, BodyRegistry};
use crate::trails::TrailManager;
use glam::DVec2;
use log::debug;
use std::collections::HashSet;

/// Mass-weighted average position; `None` when no bodies are live
pub fn center_of_mass(bodies: &[Body]) -> Option<DVec2> {
    if bodies.is_empty() {
        return None;
    }

    let mut total_mass = 0.0;
    let mut weighted = DVec2::ZERO;
    for body in bodies {
        weighted += body.position * body.mass;
        total_mass += body.mass;
    }
    Some(weighted / total_mass)
}

/// Consistent view of the world after a completed tick.
///
/// `trails` runs parallel to `bodies`: `trails[i]` is the history of
/// `bodies[i]`, oldest first. Renderers read snapshots instead of reaching
/// into the registry, so a tick is atomic from their point of view.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tick: u64,
    pub time: f64,
    pub bodies: Vec<Body>,
    pub trails: Vec<Vec<DVec2>>,
    pub center_of_mass: Option<DVec2>,
    pub live_count: usize,
}

/// The simulation state and its single-writer mutation surface
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    registry: BodyRegistry,
    trails: TrailManager,
    center_of_mass: Option<DVec2>,
    tick_count: u64,
    time: f64,
    merge_count: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            registry: BodyRegistry::new(config.radius_scale),
            trails: TrailManager::new(config.trail_limit),
            center_of_mass: None,
            tick_count: 0,
            time: 0.0,
            merge_count: 0,
        }
    }

    /// Advance one full tick and return the resulting snapshot.
    ///
    /// `time_scale` multiplies the fixed base timestep for this tick only.
    /// If any accumulated force is non-finite the tick fails before any
    /// body is mutated, so the previous state stays intact and queryable.
    pub fn tick(&mut self, time_scale: f64) -> SimResult<Snapshot> {
        let dt = self.config.base_dt * time_scale;

        let forces = compute_forces(self.registry.bodies(), self.config.gravity);
        if let Some(id) = forces.non_finite_body() {
            return Err(SimError::NumericalInstability { id });
        }

        integrator::step(self.registry.bodies_mut(), &forces, dt);

        let pairs = detect_collisions(self.registry.bodies());
        if !pairs.is_empty() {
            let created = resolve_collisions(&mut self.registry, &pairs);
            self.merge_count += created.len() as u64;
            let registry = &self.registry;
            self.trails.retain_live(|id| registry.contains(id));
        }

        for body in self.registry.bodies() {
            self.trails.append(body.id, body.position);
        }

        self.center_of_mass = center_of_mass(self.registry.bodies());
        self.tick_count += 1;
        self.time += dt;

        Ok(self.snapshot())
    }

    /// Owned copy of the current state, valid until the next mutation
    pub fn snapshot(&self) -> Snapshot {
        let bodies: Vec<Body> = self.registry.bodies().to_vec();
        let trails = bodies
            .iter()
            .map(|body| self.trails.positions(body.id))
            .collect();
        let live_count = bodies.len();

        Snapshot {
            tick: self.tick_count,
            time: self.time,
            bodies,
            trails,
            center_of_mass: self.center_of_mass,
            live_count,
        }
    }

    /// Create a body; takes effect from the next tick
    pub fn create_body(
        &mut self,
        position: DVec2,
        velocity: DVec2,
        mass: f64,
    ) -> SimResult<BodyId> {
        let id = self.registry.create(position, velocity, mass)?;
        self.center_of_mass = center_of_mass(self.registry.bodies());
        Ok(id)
    }

    /// Remove a specific set of bodies and their trails
    pub fn remove_bodies(&mut self, ids: &[BodyId]) {
        let doomed: HashSet<BodyId> = ids.iter().copied().collect();
        self.registry.remove(&doomed);
        let registry = &self.registry;
        self.trails.retain_live(|id| registry.contains(id));
        self.center_of_mass = center_of_mass(self.registry.bodies());
    }

    /// Clear the world. Ids are not recycled and the clock keeps running.
    pub fn remove_all_bodies(&mut self) {
        self.registry.clear();
        self.trails.clear();
        self.center_of_mass = None;
    }

    /// Replace the world with a preset's bodies, returning their ids in
    /// creation order.
    ///
    /// The preset is validated up front: if any listed body is invalid the
    /// current world is left untouched.
    pub fn load_preset(&mut self, preset: &Preset) -> SimResult<Vec<BodyId>> {
        for spawn in &preset.bodies {
            registry::validate_spawn(spawn.position(), spawn.velocity(), spawn.mass)?;
        }

        self.remove_all_bodies();
        let mut ids = Vec::with_capacity(preset.bodies.len());
        for spawn in &preset.bodies {
            ids.push(
                self.registry
                    .create(spawn.position(), spawn.velocity(), spawn.mass)?,
            );
        }
        self.center_of_mass = center_of_mass(self.registry.bodies());
        debug!("loaded preset '{}' with {} bodies", preset.name, ids.len());
        Ok(ids)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Bound on retained trail positions; changes apply prospectively
    pub fn trail_limit(&self) -> usize {
        self.trails.limit()
    }

    pub fn set_trail_limit(&mut self, limit: usize) {
        self.trails.set_limit(limit);
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.registry.get(id)
    }

    pub fn bodies(&self) -> &[Body] {
        self.registry.bodies()
    }

    pub fn live_count(&self) -> usize {
        self.registry.len()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated time advanced so far, in time units
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total merges resolved since construction
    pub fn merge_count(&self) -> u64 {
        self.merge_count
    }

    /// Sum of `m * v` over live bodies; unchanged by collision-free ticks
    pub fn total_momentum(&self) -> DVec2 {
        self.registry.bodies().iter().map(Body::momentum).sum()
    }

    /// Sum of kinetic energy over live bodies
    pub fn total_kinetic_energy(&self) -> f64 {
        self.registry.bodies().iter().map(Body::kinetic_energy).sum()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_body_sim() -> (Simulation, BodyId) {
        let mut sim = Simulation::default();
        let id = sim
            .create_body(DVec2::new(10.0, 20.0), DVec2::new(60.0, 0.0), 4.0)
            .unwrap();
        (sim, id)
    }

    #[test]
    fn center_of_mass_is_none_when_empty() {
        assert_eq!(center_of_mass(&[]), None);
        let sim = Simulation::default();
        assert_eq!(sim.snapshot().center_of_mass, None);
    }

    #[test]
    fn center_of_mass_of_one_body_is_its_position() {
        let (sim, _) = single_body_sim();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.center_of_mass, Some(DVec2::new(10.0, 20.0)));
    }

    #[test]
    fn center_of_mass_weights_by_mass() {
        let bodies = [
            Body::new(BodyId(0), DVec2::ZERO, DVec2::ZERO, 30.0, 2.0),
            Body::new(BodyId(1), DVec2::new(8.0, 0.0), DVec2::ZERO, 10.0, 2.0),
        ];
        let com = center_of_mass(&bodies).unwrap();
        assert!((com.x - 2.0).abs() < 1e-12);
    }

    #[test]
    fn tick_advances_clock_and_counts() {
        let (mut sim, _) = single_body_sim();
        let snapshot = sim.tick(1.0).unwrap();
        assert_eq!(snapshot.tick, 1);
        assert!((snapshot.time - 1.0 / 60.0).abs() < 1e-15);
        assert_eq!(sim.tick_count(), 1);
    }

    #[test]
    fn time_scale_stretches_the_step() {
        let (mut sim, id) = single_body_sim();
        sim.tick(2.0).unwrap();
        // Velocity 60 for one tick at double scale moves 2 units
        let body = sim.body(id).unwrap();
        assert!((body.position.x - 12.0).abs() < 1e-12);
    }

    #[test]
    fn snapshot_trails_run_parallel_to_bodies() {
        let mut sim = Simulation::default();
        sim.create_body(DVec2::ZERO, DVec2::ZERO, 1.0).unwrap();
        sim.create_body(DVec2::new(500.0, 0.0), DVec2::ZERO, 1.0)
            .unwrap();

        let snapshot = sim.tick(1.0).unwrap();
        assert_eq!(snapshot.bodies.len(), 2);
        assert_eq!(snapshot.trails.len(), 2);
        assert_eq!(snapshot.trails[0].len(), 1);
        assert_eq!(snapshot.trails[0][0], snapshot.bodies[0].position);
        assert_eq!(snapshot.live_count, 2);
    }

    #[test]
    fn remove_all_bodies_keeps_the_id_counter() {
        let (mut sim, first) = single_body_sim();
        sim.remove_all_bodies();
        assert_eq!(sim.live_count(), 0);
        assert_eq!(sim.snapshot().center_of_mass, None);

        let second = sim.create_body(DVec2::ZERO, DVec2::ZERO, 1.0).unwrap();
        assert!(second > first);
    }

    #[test]
    fn remove_bodies_drops_their_trails() {
        let mut sim = Simulation::default();
        let a = sim.create_body(DVec2::ZERO, DVec2::ZERO, 1.0).unwrap();
        let b = sim
            .create_body(DVec2::new(500.0, 0.0), DVec2::ZERO, 1.0)
            .unwrap();
        sim.tick(1.0).unwrap();

        sim.remove_bodies(&[a]);

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.live_count, 1);
        assert_eq!(snapshot.bodies[0].id, b);
        assert_eq!(snapshot.trails.len(), 1);
    }

    #[test]
    fn failed_tick_leaves_state_intact() {
        // Masses large enough that their pairwise force overflows to infinity
        let mut sim = Simulation::default();
        sim.create_body(DVec2::ZERO, DVec2::ZERO, 1e200).unwrap();
        let id = sim
            .create_body(DVec2::new(50.0, 0.0), DVec2::new(1.0, 0.0), 1e200)
            .unwrap();
        let before = sim.body(id).copied().unwrap();

        let err = sim.tick(1.0).unwrap_err();
        assert!(matches!(err, SimError::NumericalInstability { .. }));

        // Nothing moved and the clock did not advance
        let after = sim.body(id).unwrap();
        assert_eq!(after.position, before.position);
        assert_eq!(after.velocity, before.velocity);
        assert_eq!(sim.tick_count(), 0);
    }
}
