//! Planar vector helpers
//!
//! Positions, velocities and accelerations are `glam::DVec2`. Force laws are
//! written in polar form (modulus and argument), so `Polar` adds the
//! conversions on top of glam's rectangular API.

use glam::DVec2;
use serde::Deserialize;

/// 2D point/vector used for every planar quantity
pub type Vector2 = DVec2;

/// Polar/rectangular conversions for planar vectors
pub trait Polar {
    /// Build a vector from its modulus and argument (radians)
    fn from_polar(modulus: f64, argument: f64) -> Self;
    /// Euclidean length
    fn modulus(self) -> f64;
    /// Angle from the positive x axis in `(-π, π]`
    fn argument(self) -> f64;
}

impl Polar for DVec2 {
    fn from_polar(modulus: f64, argument: f64) -> Self {
        let (sin, cos) = argument.sin_cos();
        DVec2::new(modulus * cos, modulus * sin)
    }

    fn modulus(self) -> f64 {
        self.length()
    }

    fn argument(self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Axis-aligned rectangle, y pointing up
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::new(width, height))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// True when both extents are strictly positive and finite
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0 && self.min.is_finite() && self.max.is_finite()
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::from_size(crate::constants::BOUNDS_WIDTH, crate::constants::BOUNDS_HEIGHT)
    }
}
