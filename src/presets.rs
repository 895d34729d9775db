//! Named initial-condition sets and YAML scenario files
//!
//! Presets are data, not logic: loading one is equivalent to a sequence of
//! `create_body` calls on an emptied registry. The built-in generators are
//! seeded, so the same name always produces the same world.

use crate::config::{self, SimConfig};
use crate::error::SimResult;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Initial conditions for one body
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodySpawn {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub mass: f64,
}

impl BodySpawn {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Self {
        Self { x, y, vx, vy, mass }
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.vx, self.vy)
    }
}

/// A named, read-only set of initial conditions
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: String,
    pub bodies: Vec<BodySpawn>,
}

/// On-disk scenario: a preset plus optional config overrides.
///
/// ```yaml
/// name: binary
/// config:
///   trail_limit: 240
/// bodies:
///   - x: -100.0
///     y: 0.0
///     vy: -30.0
///     mass: 100.0
///   - x: 100.0
///     y: 0.0
///     vy: 30.0
///     mass: 100.0
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub name: String,
    #[serde(default)]
    pub config: SimConfig,
    pub bodies: Vec<BodySpawn>,
}

impl ScenarioFile {
    /// Load a scenario from a YAML file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn into_preset(self) -> Preset {
        Preset {
            name: self.name,
            bodies: self.bodies,
        }
    }
}

/// Names of the built-in presets
pub const BUILTIN_NAMES: [&str; 4] = ["binary", "solar", "cloud", "merger"];

/// Look up a built-in preset by name
pub fn builtin(name: &str) -> Option<Preset> {
    match name {
        "binary" => Some(binary()),
        "solar" => Some(solar()),
        "cloud" => Some(cloud(24, 7)),
        "merger" => Some(merger()),
        _ => None,
    }
}

/// Two equal masses on a mutual circular orbit.
///
/// At the stock gravitational constant the pair closes an exact circle:
/// the attraction at separation 200 equals the centripetal force needed
/// for speed 30 around the shared center.
pub fn binary() -> Preset {
    Preset {
        name: "binary".into(),
        bodies: vec![
            BodySpawn::new(-100.0, 0.0, 0.0, -30.0, 100.0),
            BodySpawn::new(100.0, 0.0, 0.0, 30.0, 100.0),
        ],
    }
}

/// A heavy star with six planets on near-circular orbits
pub fn solar() -> Preset {
    let star_mass = 2000.0;
    let mut bodies = vec![BodySpawn::new(0.0, 0.0, 0.0, 0.0, star_mass)];

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for i in 0..6 {
        let distance = 220.0 + 90.0 * i as f64;
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        // Circular orbit speed: v = sqrt(G * M / r)
        let speed = (config::G * star_mass / distance).sqrt();
        bodies.push(BodySpawn::new(
            angle.cos() * distance,
            angle.sin() * distance,
            -angle.sin() * speed,
            angle.cos() * speed,
            4.0 + rng.gen::<f64>() * 20.0,
        ));
    }

    Preset {
        name: "solar".into(),
        bodies,
    }
}

/// A ring of small bodies orbiting a heavy center
pub fn cloud(count: usize, seed: u64) -> Preset {
    let central_mass = 5000.0;
    let mut bodies = vec![BodySpawn::new(0.0, 0.0, 0.0, 0.0, central_mass)];

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for _ in 0..count {
        let distance = 260.0 + rng.gen::<f64>() * 320.0;
        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        // Orbital speed with some spread
        let speed = (config::G * central_mass / distance).sqrt();
        let variation = 0.9 + rng.gen::<f64>() * 0.2;
        bodies.push(BodySpawn::new(
            angle.cos() * distance,
            angle.sin() * distance,
            -angle.sin() * speed * variation,
            angle.cos() * speed * variation,
            1.0 + rng.gen::<f64>() * 6.0,
        ));
    }

    Preset {
        name: "cloud".into(),
        bodies,
    }
}

/// Two overlapping bodies at rest that merge on the first tick
pub fn merger() -> Preset {
    Preset {
        name: "merger".into(),
        bodies: vec![
            BodySpawn::new(-10.0, 0.0, 0.0, 0.0, 50.0),
            BodySpawn::new(10.0, 0.0, 0.0, 0.0, 50.0),
        ],
    }
}
