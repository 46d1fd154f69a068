//! Runtime configuration of a simulation world

use planet_physics::{
    IntegratorScheme, Rect, ELASTICITY, G, MIN_DISTANCE, SUBSTEPS, TRAIL_CAPACITY,
};
use serde::Deserialize;

use crate::error::SimulationError;

/// Boolean switches consulted every step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Toggles {
    pub gravity: bool,
    pub collision: bool,
    pub boundary_bounce: bool,
    pub paused: bool,
    /// Record position trails for renderers
    pub trails: bool,
    /// Emit velocity/acceleration indicator lines
    pub vectors: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            gravity: true,
            collision: true,
            boundary_bounce: false,
            paused: false,
            trails: true,
            vectors: true,
        }
    }
}

/// Physics and scheduling parameters owned by a `SimulationWorld`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// Gravitational constant
    pub g: f64,
    /// Gravity distance floor
    pub min_distance: f64,
    /// Substeps per external tick
    pub substeps: u32,
    pub bounds: Rect,
    /// Boundary bounce elasticity
    pub elasticity: f64,
    pub scheme: IntegratorScheme,
    pub toggles: Toggles,
    pub trail_capacity: usize,
    /// Seed for colour hints and scatter seeding; random when absent
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            g: G,
            min_distance: MIN_DISTANCE,
            substeps: SUBSTEPS,
            bounds: Rect::default(),
            elasticity: ELASTICITY,
            scheme: IntegratorScheme::default(),
            toggles: Toggles::default(),
            trail_capacity: TRAIL_CAPACITY,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.substeps == 0 {
            return Err(SimulationError::InvalidSubstepCount(self.substeps));
        }
        if !(self.g.is_finite() && self.g > 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "g",
                value: self.g,
            });
        }
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "min_distance",
                value: self.min_distance,
            });
        }
        if !(self.elasticity.is_finite() && self.elasticity >= 0.0) {
            return Err(SimulationError::InvalidParameter {
                name: "elasticity",
                value: self.elasticity,
            });
        }
        if !self.bounds.is_valid() {
            return Err(SimulationError::InvalidBounds);
        }
        Ok(())
    }
}
