//! Error types for the simulation core

use crate::body::BodyId;
use thiserror::Error;

/// Result alias for fallible simulation operations
pub type SimResult<T> = Result<T, SimError>;

/// Errors surfaced by the simulation core.
///
/// All errors are synchronous and leave the registry in the state it had
/// before the failing call mutated anything.
#[derive(Debug, Error)]
pub enum SimError {
    /// Body creation rejected because the mass is not positive
    #[error("invalid body: mass must be positive, got {mass}")]
    InvalidBody { mass: f64 },

    /// Body creation rejected because a coordinate is not finite
    #[error("invalid body: non-finite {location}")]
    NonFiniteValue { location: &'static str },

    /// A non-finite force was detected before integration
    #[error("numerical instability: non-finite force on body {id}")]
    NumericalInstability { id: BodyId },

    /// Scenario file could not be read
    #[error("scenario I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed
    #[error("scenario parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
