//! Body value types and mass-derived appearance

use glam::DVec2;
use std::fmt;

/// Stable body identity, assigned monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A body in the simulation with mass, position, and velocity
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: BodyId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub mass: f64,
    pub radius: f64,
    pub color: [f32; 4],
}

impl Body {
    /// Build a body, deriving radius and color from its mass
    pub fn new(id: BodyId, position: DVec2, velocity: DVec2, mass: f64, radius_scale: f64) -> Self {
        // Disc area tracks mass, so radius grows with its square root
        let radius = radius_scale * mass.sqrt();
        Self {
            id,
            position,
            velocity,
            mass,
            radius,
            color: color_for_mass(mass),
        }
    }

    /// Linear momentum `m * v`
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    /// Kinetic energy `m * v^2 / 2`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// True when the centers sit closer than the touching distance
    pub fn overlaps(&self, other: &Body) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }
}

/// Display color per mass band. Heavier bodies run hotter, so the table
/// walks from dull red dwarfs up to blue-white giants.
const TEMPERATURE_BUCKETS: [(f64, [f32; 4]); 6] = [
    (20.0, [0.72, 0.32, 0.16, 1.0]),
    (80.0, [0.93, 0.46, 0.22, 1.0]),
    (300.0, [0.98, 0.78, 0.31, 1.0]),
    (1200.0, [0.99, 0.94, 0.77, 1.0]),
    (5000.0, [0.93, 0.95, 1.0, 1.0]),
    (f64::INFINITY, [0.62, 0.74, 1.0, 1.0]),
];

/// Look up the display color for a mass. Purely cosmetic.
pub fn color_for_mass(mass: f64) -> [f32; 4] {
    for &(upper, color) in TEMPERATURE_BUCKETS.iter() {
        if mass < upper {
            return color;
        }
    }
    TEMPERATURE_BUCKETS[TEMPERATURE_BUCKETS.len() - 1].1
}
