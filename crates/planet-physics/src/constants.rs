//! Physical constants and defaults for the planet simulation
//!
//! Units are screen-scale: one length unit is one pixel and mass is the area
//! of a body's disc. The gravitational constant is scaled to match, so orbits
//! of a few hundred pixels complete in a handful of seconds.

/// Gravitational constant in pixel/area units
pub const G: f64 = 2.8e3;

/// Distance below which two bodies exert no gravity on each other.
/// Normally pre-empted by collision handling.
pub const MIN_DISTANCE: f64 = 10.0;

/// Radius of a body spawned without an explicit size
pub const DEFAULT_RADIUS: f64 = 20.0;

/// Number of positions kept in a body's trail
pub const TRAIL_CAPACITY: usize = 100;

/// Elasticity of boundary bounces (1.0 = no energy lost)
pub const ELASTICITY: f64 = 1.0;

/// Default number of substeps per external tick
pub const SUBSTEPS: u32 = 100;

/// Substep counts selectable from the number keys
pub const SUBSTEP_PRESETS: [u32; 6] = [1, 20, 50, 100, 500, 1000];

/// Default simulation area (pixels)
pub const BOUNDS_WIDTH: f64 = 800.0;
pub const BOUNDS_HEIGHT: f64 = 800.0;

/// Rate of the external clock driving the simulation (Hz)
pub const TICK_RATE: f64 = 60.0;
