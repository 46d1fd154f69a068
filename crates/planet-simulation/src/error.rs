//! Errors raised by rejected world commands

use thiserror::Error;

/// Invalid configuration or command. The world is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Substep count must be at least one
    #[error("substep count must be positive, got {0}")]
    InvalidSubstepCount(u32),

    /// Body mass must be positive and finite
    #[error("body mass must be positive, got {0}")]
    InvalidMass(f64),

    /// Body radius must be positive and finite
    #[error("body radius must be positive, got {0}")]
    InvalidRadius(f64),

    /// Spawn position or velocity is not finite
    #[error("body state must be finite")]
    NonFiniteState,

    /// Bounds with zero or negative extent
    #[error("bounds must have positive width and height")]
    InvalidBounds,

    /// Out-of-range scalar parameter
    #[error("parameter {name} is out of range: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Integrator name not recognised
    #[error("unknown integrator scheme '{0}'")]
    UnknownScheme(String),

    /// Toggle name not recognised
    #[error("unknown toggle '{0}'")]
    UnknownToggle(String),

    /// Substep preset index out of range
    #[error("no substep preset at index {0}")]
    UnknownSubstepPreset(usize),
}

impl From<planet_physics::UnknownScheme> for SimulationError {
    fn from(err: planet_physics::UnknownScheme) -> Self {
        SimulationError::UnknownScheme(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planet_physics::IntegratorScheme;

    #[test]
    fn test_unknown_scheme_converts() {
        let err: SimulationError = "leapfrog"
            .parse::<IntegratorScheme>()
            .unwrap_err()
            .into();
        assert_eq!(err, SimulationError::UnknownScheme("leapfrog".into()));
        assert_eq!(err.to_string(), "unknown integrator scheme 'leapfrog'");
    }
}
