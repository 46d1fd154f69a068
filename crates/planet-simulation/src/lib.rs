//! # Planet Simulation
//!
//! Owns the live set of bodies and advances it through time. Input handling
//! talks to the world through `Command`s; renderers read a `Snapshot`.

pub mod command;
pub mod error;
pub mod params;
pub mod scenario;
pub mod simulation;
pub mod snapshot;

pub use command::*;
pub use error::*;
pub use params::*;
pub use scenario::*;
pub use simulation::*;
pub use snapshot::*;
