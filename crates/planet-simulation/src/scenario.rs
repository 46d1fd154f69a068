//! Programmatic seeding routines

use glam::DVec2;
use planet_physics::{mass_from_radius, Rect};
use rand::Rng;

use crate::command::SpawnBody;
use crate::params::WorldConfig;

/// Orbit radius of the planet in `SunAndPlanet`
pub const ORBIT_RADIUS: f64 = 200.0;

/// Ready-made arrangements of bodies, added on top of what is live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Two default bodies above and below the centre, moving apart sideways
    TwoBody,
    /// Fixed sun at the centre with one planet on a circular orbit
    SunAndPlanet,
    /// Random bodies scattered inside the bounds
    Scatter { count: usize },
}

impl Scenario {
    pub fn spawns<R: Rng>(&self, config: &WorldConfig, rng: &mut R) -> Vec<SpawnBody> {
        let center = config.bounds.center();

        match *self {
            Scenario::TwoBody => vec![
                SpawnBody::at(center - DVec2::new(0.0, 100.0))
                    .with_velocity(DVec2::new(100.0, 0.0))
                    .with_radius(20.0),
                SpawnBody::at(center + DVec2::new(0.0, 100.0))
                    .with_velocity(DVec2::new(-100.0, 0.0))
                    .with_radius(20.0),
            ],
            Scenario::SunAndPlanet => {
                let sun_radius = 50.0;
                let speed = circular_orbit_speed(config.g, mass_from_radius(sun_radius), ORBIT_RADIUS);
                vec![
                    SpawnBody::at(center)
                        .with_radius(sun_radius)
                        .with_color([1.0, 1.0, 0.0])
                        .fixed(),
                    SpawnBody::at(center + DVec2::new(0.0, ORBIT_RADIUS))
                        .with_velocity(DVec2::new(-speed, 0.0))
                        .with_radius(8.0)
                        .with_color([0.0, 0.0, 1.0]),
                ]
            }
            Scenario::Scatter { count } => (0..count)
                .map(|_| scatter_one(&config.bounds, rng))
                .collect(),
        }
    }
}

/// Tangential speed of a circular orbit of radius `r` around mass `m`
pub fn circular_orbit_speed(g: f64, m: f64, r: f64) -> f64 {
    (g * m / r).sqrt()
}

fn scatter_one<R: Rng>(bounds: &Rect, rng: &mut R) -> SpawnBody {
    let radius: f64 = rng.random_range(4.0..12.0);
    let margin = radius.min(bounds.width() / 2.0).min(bounds.height() / 2.0);
    let x = rng.random_range(bounds.min.x + margin..=bounds.max.x - margin);
    let y = rng.random_range(bounds.min.y + margin..=bounds.max.y - margin);
    let velocity = DVec2::new(rng.random_range(-40.0..40.0), rng.random_range(-40.0..40.0));

    SpawnBody::at(DVec2::new(x, y))
        .with_velocity(velocity)
        .with_radius(radius)
}
