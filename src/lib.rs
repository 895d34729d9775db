//! Headless gravitational N-body sandbox
//!
//! A small 2D physics core: pairwise Newtonian attraction, explicit Euler
//! integration, perfectly inelastic merge collisions, bounded motion trails,
//! and a per-tick snapshot interface for a host rendering layer. The core is
//! single-threaded and deterministic; hosts drive it by calling
//! [`Simulation::tick`] once per displayed frame.

pub mod body;
pub mod collisions;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod presets;
pub mod registry;
pub mod simulation;
pub mod trails;

pub use body::{Body, BodyId};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use presets::{BodySpawn, Preset, ScenarioFile};
pub use registry::BodyRegistry;
pub use simulation::{center_of_mass, Simulation, Snapshot};
