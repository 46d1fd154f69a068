//! # Planet Physics
//!
//! Physics building blocks for a 2D N-body sandbox: circular bodies whose
//! mass is their area, pairwise inverse-square gravity, perfectly inelastic
//! merging, edge bouncing and a choice of per-body integrators.

pub mod body;
pub mod boundary;
pub mod collision;
pub mod constants;
pub mod forces;
pub mod integrator;
pub mod vector;

pub use body::*;
pub use collision::MergeOutcome;
pub use constants::*;
pub use forces::*;
pub use integrator::*;
pub use vector::*;
