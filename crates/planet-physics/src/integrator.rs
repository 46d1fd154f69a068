//! Per-body time integration schemes
//!
//! Every scheme advances one body by `dt` using the acceleration accumulated
//! for the current substep, which is treated as constant over the step.
//! Fixed bodies must be filtered out by the caller.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::body::Body;

/// Numerical scheme used to advance free bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegratorScheme {
    /// Velocity Verlet (reference scheme)
    #[default]
    #[serde(alias = "velocity_verlet")]
    Verlet,
    /// Semi-implicit Euler: velocity first, then position
    #[serde(alias = "symplectic_euler")]
    SymplecticEuler,
    /// Explicit Euler: position from the old velocity
    #[serde(alias = "explicit_euler")]
    ExplicitEuler,
    /// Two-stage Runge-Kutta, for comparison
    Rk2,
}

impl IntegratorScheme {
    pub const ALL: [IntegratorScheme; 4] = [
        IntegratorScheme::Verlet,
        IntegratorScheme::SymplecticEuler,
        IntegratorScheme::ExplicitEuler,
        IntegratorScheme::Rk2,
    ];

    /// Advance `body` by `dt` in place
    pub fn advance(self, body: &mut Body, dt: f64) {
        match self {
            IntegratorScheme::Verlet => verlet(body, dt),
            IntegratorScheme::SymplecticEuler => symplectic_euler(body, dt),
            IntegratorScheme::ExplicitEuler => explicit_euler(body, dt),
            IntegratorScheme::Rk2 => rk2(body, dt),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IntegratorScheme::Verlet => "verlet",
            IntegratorScheme::SymplecticEuler => "symplecticEuler",
            IntegratorScheme::ExplicitEuler => "explicitEuler",
            IntegratorScheme::Rk2 => "rk2",
        }
    }
}

impl fmt::Display for IntegratorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name did not match any scheme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown integrator scheme '{0}'")]
pub struct UnknownScheme(pub String);

impl FromStr for IntegratorScheme {
    type Err = UnknownScheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "verlet" | "velocityverlet" => Ok(IntegratorScheme::Verlet),
            "symplecticeuler" | "semiimpliciteuler" => Ok(IntegratorScheme::SymplecticEuler),
            "expliciteuler" | "euler" => Ok(IntegratorScheme::ExplicitEuler),
            "rk2" | "rungekutta2" => Ok(IntegratorScheme::Rk2),
            _ => Err(UnknownScheme(s.to_string())),
        }
    }
}

/// x += v·dt + a·dt²/2, v += a·dt
pub fn verlet(body: &mut Body, dt: f64) {
    body.position += body.velocity * dt + body.acceleration * (dt * dt / 2.0);
    body.velocity += body.acceleration * dt;
}

/// v += a·dt, x += v·dt
pub fn symplectic_euler(body: &mut Body, dt: f64) {
    body.velocity += body.acceleration * dt;
    body.position += body.velocity * dt;
}

/// x += v·dt, v += a·dt
pub fn explicit_euler(body: &mut Body, dt: f64) {
    body.position += body.velocity * dt;
    body.velocity += body.acceleration * dt;
}

/// Second stage sits at 3/4 of the step; stages are weighted 1/3 and 2/3
pub fn rk2(body: &mut Body, dt: f64) {
    const STAGE: f64 = 0.75;
    const W1: f64 = 1.0 / 3.0;
    const W2: f64 = 2.0 / 3.0;

    let k1_x = body.velocity;
    let k1_v = body.acceleration;

    let k2_x = body.velocity + body.acceleration * (STAGE * dt);
    let k2_v = body.acceleration;

    body.position += (k1_x * W1 + k2_x * W2) * dt;
    body.velocity += (k1_v * W1 + k2_v * W2) * dt;
}
