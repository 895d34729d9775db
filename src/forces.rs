//! Pairwise Newtonian force accumulation

use crate::body::{Body, BodyId};
use glam::DVec2;
use std::collections::HashMap;

/// Net force on each body for one tick
#[derive(Debug, Default)]
pub struct ForceMap {
    forces: HashMap<BodyId, DVec2>,
}

impl ForceMap {
    /// Net force on `id`; zero for ids with no entry
    pub fn get(&self, id: BodyId) -> DVec2 {
        self.forces.get(&id).copied().unwrap_or(DVec2::ZERO)
    }

    /// Lowest body id carrying a non-finite force, if any
    pub fn non_finite_body(&self) -> Option<BodyId> {
        self.forces
            .iter()
            .filter(|(_, force)| !force.is_finite())
            .map(|(id, _)| *id)
            .min()
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, id: BodyId, force: DVec2) {
        self.forces.insert(id, force);
    }
}

/// Accumulate the net gravitational force on every body.
///
/// Each unordered pair contributes `F = G * m_i * m_j / d^2` along the line
/// joining the centers, applied once with opposite signs. The separation is
/// clamped below at the touching distance `r_i + r_j`, so nearly coincident
/// bodies attract strongly but never singularly.
pub fn compute_forces(bodies: &[Body], gravity: f64) -> ForceMap {
    let n = bodies.len();
    let mut net = vec![DVec2::ZERO; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let a = &bodies[i];
            let b = &bodies[j];
            let offset = b.position - a.position;
            let dist = offset.length().max(a.radius + b.radius);
            let magnitude = gravity * a.mass * b.mass / (dist * dist);
            // Exactly coincident centers have no direction to pull along;
            // the pair contributes nothing until it drifts apart or merges.
            let force = offset.normalize_or_zero() * magnitude;

            net[i] += force;
            net[j] -= force;
        }
    }

    ForceMap {
        forces: bodies.iter().zip(net).map(|(b, f)| (b.id, f)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: u32, x: f64, y: f64, mass: f64) -> Body {
        Body::new(BodyId(id), DVec2::new(x, y), DVec2::ZERO, mass, 2.0)
    }

    #[test]
    fn forces_are_anti_symmetric() {
        let bodies = [body(0, -50.0, 10.0, 2.0), body(1, 40.0, -20.0, 3.0)];
        let forces = compute_forces(&bodies, 100.0);

        let net = forces.get(BodyId(0)) + forces.get(BodyId(1));
        assert!(net.length() < 1e-12, "net force not zero: {net:?}");
    }

    #[test]
    fn force_is_collinear_with_the_separation() {
        let bodies = [body(0, 0.0, 0.0, 1.0), body(1, 30.0, 40.0, 1.0)];
        let forces = compute_forces(&bodies, 100.0);

        let offset = bodies[1].position - bodies[0].position;
        let on_first = forces.get(BodyId(0));
        assert!(on_first.perp_dot(offset).abs() < 1e-12);
        // Attraction pulls the first body toward the second
        assert!(on_first.dot(offset) > 0.0);
    }

    #[test]
    fn force_follows_inverse_square_law() {
        let near = [body(0, 0.0, 0.0, 1.0), body(1, 100.0, 0.0, 1.0)];
        let far = [body(0, 0.0, 0.0, 1.0), body(1, 200.0, 0.0, 1.0)];

        let near_mag = compute_forces(&near, 100.0).get(BodyId(0)).length();
        let far_mag = compute_forces(&far, 100.0).get(BodyId(0)).length();

        let ratio = near_mag / far_mag;
        assert!((ratio - 4.0).abs() < 1e-9, "expected ~4x, got {ratio}");
    }

    #[test]
    fn distance_clamp_caps_close_range_forces() {
        // Touching distance is 4 + 4 = 8, far larger than the separation
        let bodies = [body(0, 0.0, 0.0, 4.0), body(1, 1e-9, 0.0, 4.0)];
        let forces = compute_forces(&bodies, 100.0);

        let expected = 100.0 * 4.0 * 4.0 / (8.0 * 8.0);
        let magnitude = forces.get(BodyId(0)).length();
        assert!((magnitude - expected).abs() < 1e-9);
    }

    #[test]
    fn identical_positions_produce_finite_forces() {
        let bodies = [body(0, 5.0, 5.0, 10.0), body(1, 5.0, 5.0, 10.0)];
        let forces = compute_forces(&bodies, 100.0);

        assert!(forces.get(BodyId(0)).is_finite());
        assert!(forces.get(BodyId(1)).is_finite());
        assert!(forces.non_finite_body().is_none());
    }

    #[test]
    fn overflowing_magnitude_is_flagged_as_non_finite() {
        // The mass product exceeds f64::MAX, so the magnitude is infinite
        let bodies = [body(0, 0.0, 0.0, 1e200), body(1, 50.0, 0.0, 1e200)];
        let forces = compute_forces(&bodies, 100.0);
        assert_eq!(forces.non_finite_body(), Some(BodyId(0)));
    }

    #[test]
    fn no_bodies_means_no_forces() {
        let forces = compute_forces(&[], 100.0);
        assert!(forces.is_empty());
        assert_eq!(forces.get(BodyId(0)), DVec2::ZERO);
    }

    #[test]
    fn three_body_net_force_sums_pairwise_pulls() {
        // Middle body pulled equally from both sides
        let bodies = [
            body(0, -100.0, 0.0, 5.0),
            body(1, 0.0, 0.0, 1.0),
            body(2, 100.0, 0.0, 5.0),
        ];
        let forces = compute_forces(&bodies, 100.0);
        assert!(forces.get(BodyId(1)).length() < 1e-12);
        assert_eq!(forces.len(), 3);
    }
}
