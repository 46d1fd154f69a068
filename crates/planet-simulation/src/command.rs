//! Mutation requests issued by input handling
//!
//! Input glue never touches the body collection directly; it builds a
//! `Command` and hands it to `SimulationWorld::apply`.

use std::fmt;
use std::str::FromStr;

use glam::DVec2;
use planet_physics::{BodySize, IntegratorScheme, Rect};

use crate::error::SimulationError;
use crate::scenario::Scenario;

/// Named boolean switch of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Gravity,
    Collision,
    BoundaryBounce,
    Pause,
    Trails,
    Vectors,
}

impl Toggle {
    pub fn name(self) -> &'static str {
        match self {
            Toggle::Gravity => "gravity",
            Toggle::Collision => "collision",
            Toggle::BoundaryBounce => "boundaryBounce",
            Toggle::Pause => "pause",
            Toggle::Trails => "trails",
            Toggle::Vectors => "vectors",
        }
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Toggle {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "gravity" => Ok(Toggle::Gravity),
            "collision" => Ok(Toggle::Collision),
            "boundarybounce" | "edgebounce" | "bounce" => Ok(Toggle::BoundaryBounce),
            "pause" | "paused" => Ok(Toggle::Pause),
            "trails" | "trail" => Ok(Toggle::Trails),
            "vectors" | "vector" => Ok(Toggle::Vectors),
            _ => Err(SimulationError::UnknownToggle(s.to_string())),
        }
    }
}

/// Request to create a body
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnBody {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Default radius when absent
    pub size: Option<BodySize>,
    pub fixed: bool,
    /// Random light colour when absent
    pub color: Option<[f32; 3]>,
}

impl SpawnBody {
    pub fn at(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            size: None,
            fixed: false,
            color: None,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.size = Some(BodySize::Radius(radius));
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.size = Some(BodySize::Mass(mass));
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// Every mutation the world accepts from outside
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Spawn(SpawnBody),
    RemoveAll,
    SetToggle(Toggle, bool),
    FlipToggle(Toggle),
    SetSubsteps(u32),
    /// Index into `SUBSTEP_PRESETS`
    SubstepPreset(usize),
    SetScheme(IntegratorScheme),
    SetBounds(Rect),
    Seed(Scenario),
}
