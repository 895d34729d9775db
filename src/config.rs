//! Simulation tuning constants

use serde::Deserialize;

/// Gravitational constant (scaled for visualization)
pub const G: f64 = 3600.0;

/// Body radius is `RADIUS_SCALE * sqrt(mass)`
pub const RADIUS_SCALE: f64 = 2.0;

/// Fixed base timestep: one tick advances 1/60 of a time unit at scale 1
pub const BASE_DT: f64 = 1.0 / 60.0;

/// Default bound on retained trail positions per body
pub const DEFAULT_TRAIL_LIMIT: usize = 120;

/// Tunable constants for a simulation instance.
///
/// The gravitational constant is an empirically chosen visualization value,
/// not an SI one. The stock presets are tuned against it: at `G = 3600` two
/// mass-100 bodies placed 200 units apart close a circular orbit at speed 30.
/// Changing it changes the character of every preset.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Gravitational constant (scaled for visualization)
    pub gravity: f64,
    /// Scale factor from `sqrt(mass)` to body radius
    pub radius_scale: f64,
    /// Base timestep per tick, multiplied by the caller's time scale
    pub base_dt: f64,
    /// Initial bound on retained trail positions per body
    pub trail_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: G,
            radius_scale: RADIUS_SCALE,
            base_dt: BASE_DT,
            trail_limit: DEFAULT_TRAIL_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_named_constants() {
        let config = SimConfig::default();
        assert_eq!(config.gravity, G);
        assert_eq!(config.radius_scale, RADIUS_SCALE);
        assert_eq!(config.base_dt, BASE_DT);
        assert_eq!(config.trail_limit, DEFAULT_TRAIL_LIMIT);
    }

    #[test]
    fn partial_yaml_fills_remaining_defaults() {
        let config: SimConfig = serde_yaml::from_str("gravity: 500.0").unwrap();
        assert_eq!(config.gravity, 500.0);
        assert_eq!(config.radius_scale, RADIUS_SCALE);
        assert_eq!(config.trail_limit, DEFAULT_TRAIL_LIMIT);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<SimConfig, _> = serde_yaml::from_str("gravties: 1.0");
        assert!(parsed.is_err());
    }
}
