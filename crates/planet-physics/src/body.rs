//! Body types for the planet simulation

use std::collections::VecDeque;
use std::f64::consts::PI;

use glam::DVec2;

use crate::constants::{DEFAULT_RADIUS, TRAIL_CAPACITY};

/// Stable identity of a body within its world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

/// Mass of a disc body of the given radius (mass is area)
pub fn mass_from_radius(radius: f64) -> f64 {
    radius * radius * PI
}

/// Radius of a disc body of the given mass
pub fn radius_from_mass(mass: f64) -> f64 {
    (mass / PI).sqrt()
}

/// How a body's size is specified. The other quantity is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodySize {
    Radius(f64),
    Mass(f64),
}

impl BodySize {
    /// `(radius, mass)` pair, mutually consistent
    pub fn resolve(self) -> (f64, f64) {
        match self {
            BodySize::Radius(radius) => (radius, mass_from_radius(radius)),
            BodySize::Mass(mass) => (radius_from_mass(mass), mass),
        }
    }

    /// Both derived quantities are positive and finite
    pub fn is_valid(self) -> bool {
        let value = match self {
            BodySize::Radius(r) => r,
            BodySize::Mass(m) => m,
        };
        value.is_finite() && value > 0.0
    }
}

impl Default for BodySize {
    fn default() -> Self {
        BodySize::Radius(DEFAULT_RADIUS)
    }
}

/// Bounded history of past positions, oldest evicted first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: DVec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &DVec2> {
        self.points.iter()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }
}

/// One simulated mass
///
/// Mass and radius are kept consistent (`mass = π·radius²`), so they are only
/// reachable through accessors. Changing the mass re-derives the radius.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Centre of the disc
    pub position: DVec2,
    pub velocity: DVec2,
    /// Recomputed every substep
    pub acceleration: DVec2,
    radius: f64,
    mass: f64,
    /// Immovable anchor, never integrated
    pub is_fixed: bool,
    /// RGB hint for renderers
    pub color: [f32; 3],
    pub trail: Trail,
}

impl Body {
    pub fn new(id: BodyId, position: DVec2, size: BodySize) -> Self {
        let (radius, mass) = size.resolve();
        Self {
            id,
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            radius,
            mass,
            is_fixed: false,
            color: [1.0, 1.0, 1.0],
            trail: Trail::default(),
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        self.trail = Trail::with_capacity(capacity);
        self
    }

    pub fn fixed(mut self, is_fixed: bool) -> Self {
        self.is_fixed = is_fixed;
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass; the radius follows
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = radius_from_mass(mass);
    }

    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_resolves_consistently() {
        let (r, m) = BodySize::Radius(20.0).resolve();
        assert!((m - 400.0 * PI).abs() < 1e-9);
        assert!((radius_from_mass(m) - r).abs() < 1e-12);

        let (r, m) = BodySize::Mass(PI * 9.0).resolve();
        assert!((r - 3.0).abs() < 1e-12);
        assert!((m - PI * 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_size_rejects_non_positive() {
        assert!(!BodySize::Radius(0.0).is_valid());
        assert!(!BodySize::Mass(-1.0).is_valid());
        assert!(!BodySize::Mass(f64::NAN).is_valid());
        assert!(BodySize::Mass(1.0).is_valid());
    }

    #[test]
    fn test_set_mass_rederives_radius() {
        let mut body = Body::new(BodyId(0), DVec2::ZERO, BodySize::Radius(10.0));
        body.set_mass(mass_from_radius(30.0));
        assert!((body.radius() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_trail_evicts_oldest() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(DVec2::new(i as f64, 0.0));
        }
        assert_eq!(trail.len(), 3);
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_zero_capacity_trail_stays_empty() {
        let mut trail = Trail::with_capacity(0);
        trail.push(DVec2::ONE);
        assert!(trail.is_empty());
    }
}
