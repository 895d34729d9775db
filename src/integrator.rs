//! Explicit Euler time integration
//!
//! `v += (F / m) * dt`, then `x += v * dt` with the already-updated
//! velocity. Energy drifts over long runs; the presets are tuned against
//! this exact update order, so it is kept as-is.

use crate::body::Body;
use crate::forces::ForceMap;

/// Advance every body one step from its accumulated force
pub fn step(bodies: &mut [Body], forces: &ForceMap, dt: f64) {
    for body in bodies.iter_mut() {
        let acceleration = forces.get(body.id) / body.mass;
        body.velocity += acceleration * dt;
        body.position += body.velocity * dt;
    }
}
