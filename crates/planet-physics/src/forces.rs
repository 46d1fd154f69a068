//! Pairwise force models
//!
//! Each body accumulates its own acceleration from every other body, so the
//! models work on accelerations rather than forces and no pair symmetry is
//! exploited.

use glam::DVec2;

use crate::body::Body;
use crate::constants::{G, MIN_DISTANCE};
use crate::vector::Polar;

/// Source of pairwise acceleration
pub trait ForceModel {
    /// Add to `body.acceleration` the pull `other` exerts on `body`.
    /// Callers guarantee `body` and `other` are distinct bodies.
    fn accumulate(&self, body: &mut Body, other: &Body);
}

/// Acceleration `other` gives `body` under Newtonian gravity
/// a = G * m_other / d²
///
/// Returns zero when the bodies are closer than `min_distance`.
pub fn gravitational_acceleration(body: &Body, other: &Body, g: f64, min_distance: f64) -> DVec2 {
    let offset = other.position - body.position;
    let distance = offset.modulus();

    if distance <= min_distance {
        return DVec2::ZERO;
    }

    let modulus = g * other.mass() / (distance * distance);
    DVec2::from_polar(modulus, offset.argument())
}

/// Inverse-square gravity with a hard distance floor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,
    /// Separations at or below this skip the interaction
    pub min_distance: f64,
}

impl NewtonianGravity {
    pub fn new(g: f64, min_distance: f64) -> Self {
        Self { g, min_distance }
    }
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self::new(G, MIN_DISTANCE)
    }
}

impl ForceModel for NewtonianGravity {
    fn accumulate(&self, body: &mut Body, other: &Body) {
        body.acceleration += gravitational_acceleration(body, other, self.g, self.min_distance);
    }
}
