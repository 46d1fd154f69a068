//! Read-only views handed to renderers and overlays

use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use planet_physics::{Body, IntegratorScheme};

/// Per-body data for a GPU vertex/instance buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub position: [f32; 2],
    pub radius: f32,
    pub color: [f32; 3],
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        Self {
            position: body.position.as_vec2().to_array(),
            radius: body.radius() as f32,
            color: body.color,
        }
    }
}

/// Which quantity an indicator line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Velocity,
    Acceleration,
}

/// Line segment drawn from a body's centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorLine {
    pub kind: VectorKind,
    pub start: DVec2,
    pub end: DVec2,
}

/// Drawn velocity lines are a quarter of the velocity
pub const VELOCITY_LINE_SCALE: f64 = 0.25;
/// Drawn acceleration lines are an eighth of the acceleration
pub const ACCELERATION_LINE_SCALE: f64 = 0.125;

/// Informational overlay counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub body_count: usize,
    pub substeps: u32,
    pub gravity: bool,
    pub collision: bool,
    pub boundary_bounce: bool,
    pub paused: bool,
    /// Indicator lines are drawn
    pub vectors: bool,
    pub scheme: IntegratorScheme,
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Active planets: {}", self.body_count)?;
        writeln!(f, "Euler steps: {}", self.substeps)?;
        writeln!(f, "Gravity: {}", on_off(self.gravity))?;
        writeln!(f, "Collision: {}", on_off(self.collision))?;
        writeln!(f, "Edge bounce: {}", on_off(self.boundary_bounce))?;
        write!(f, "Integrator: {}", self.scheme)?;
        if self.paused {
            write!(f, "\nPaused")?;
        }
        Ok(())
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Conserved-quantity summary of the live bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub total_mass: f64,
    pub momentum: DVec2,
    /// `None` without bodies
    pub center_of_mass: Option<DVec2>,
    pub kinetic_energy: f64,
}

impl Diagnostics {
    pub fn measure(bodies: &[Body]) -> Self {
        let total_mass: f64 = bodies.iter().map(Body::mass).sum();
        let momentum = bodies.iter().map(Body::momentum).sum();
        let kinetic_energy = bodies.iter().map(Body::kinetic_energy).sum();

        let center_of_mass = (total_mass > 0.0).then(|| {
            bodies
                .iter()
                .map(|b| b.position * b.mass())
                .sum::<DVec2>()
                / total_mass
        });

        Self {
            total_mass,
            momentum,
            center_of_mass,
            kinetic_energy,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    /// Live bodies in insertion order
    pub bodies: &'a [Body],
    pub overlay: Overlay,
    /// Simulated seconds elapsed
    pub time: f64,
}

impl Snapshot<'_> {
    pub fn instances(&self) -> Vec<BodyInstance> {
        self.bodies.iter().map(BodyInstance::from).collect()
    }

    /// Velocity and acceleration indicators for every body, empty when the
    /// vectors toggle is off
    pub fn vector_lines(&self) -> Vec<VectorLine> {
        if !self.overlay.vectors {
            return Vec::new();
        }

        self.bodies
            .iter()
            .flat_map(|body| {
                [
                    VectorLine {
                        kind: VectorKind::Velocity,
                        start: body.position,
                        end: body.position + body.velocity * VELOCITY_LINE_SCALE,
                    },
                    VectorLine {
                        kind: VectorKind::Acceleration,
                        start: body.position,
                        end: body.position + body.acceleration * ACCELERATION_LINE_SCALE,
                    },
                ]
            })
            .collect()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(self.bodies)
    }
}
