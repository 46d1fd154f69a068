//! Simulation world and its substep scheduler
//!
//! `SimulationWorld` owns the live bodies and the configuration. Each external
//! tick calls `step`, which splits the frame into `substeps` equal substeps of
//! force accumulation, merging, edge bouncing and integration.

use glam::DVec2;
use planet_physics::{
    boundary, collision, Body, BodyId, BodySize, ForceModel, IntegratorScheme, MergeOutcome,
    NewtonianGravity, Rect, SUBSTEP_PRESETS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::{Command, SpawnBody, Toggle};
use crate::error::SimulationError;
use crate::params::{Toggles, WorldConfig};
use crate::scenario::Scenario;
use crate::snapshot::{Diagnostics, Overlay, Snapshot};

/// Whether ticks advance the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// A self-contained N-body simulation
pub struct SimulationWorld {
    config: WorldConfig,
    bodies: Vec<Body>,
    force: Box<dyn ForceModel>,
    rng: StdRng,
    next_id: u64,
    time: f64,
    ticks: u64,

    // Scratch liveness mask for the pair pass, indexed like `bodies`
    alive: Vec<bool>,
}

impl SimulationWorld {
    pub fn new(config: WorldConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let force = Box::new(NewtonianGravity::new(config.g, config.min_distance));

        log::info!(
            "Simulation world created: G={}, {} substeps, {} integrator",
            config.g,
            config.substeps,
            config.scheme
        );

        Ok(Self {
            config,
            bodies: Vec::new(),
            force,
            rng,
            next_id: 0,
            time: 0.0,
            ticks: 0,
            alive: Vec::new(),
        })
    }

    /// Replace the pairwise force model
    pub fn with_force_model(mut self, force: Box<dyn ForceModel>) -> Self {
        self.force = force;
        self
    }

    // ------------------------------------------------------------------
    // Stepping
    // ------------------------------------------------------------------

    /// Advance the world by one external tick of `frame_dt` seconds.
    ///
    /// Does nothing while paused. Returns the number of merges that happened.
    pub fn step(&mut self, frame_dt: f64) -> usize {
        if self.config.toggles.paused {
            return 0;
        }
        if !(frame_dt.is_finite() && frame_dt >= 0.0) {
            log::warn!("Ignoring tick with invalid frame time {}", frame_dt);
            return 0;
        }

        let dt = frame_dt / self.config.substeps as f64;
        let mut merges = 0;
        for _ in 0..self.config.substeps {
            merges += self.substep(dt);
        }

        self.time += frame_dt;
        self.ticks += 1;

        // Presentation state is refreshed once per tick
        if self.config.toggles.trails {
            for body in &mut self.bodies {
                body.trail.push(body.position);
            }
        }

        merges
    }

    fn substep(&mut self, dt: f64) -> usize {
        for body in &mut self.bodies {
            body.acceleration = DVec2::ZERO;
        }

        let merges = self.interact();

        let toggles = self.config.toggles;
        for body in self.bodies.iter_mut().filter(|b| !b.is_fixed) {
            if toggles.boundary_bounce {
                boundary::apply(body, &self.config.bounds, self.config.elasticity);
            }
            self.config.scheme.advance(body, dt);
        }

        merges
    }

    /// Pairwise gravity and merging over every ordered pair of live bodies.
    ///
    /// A body consumed by a merge is marked dead at once and skipped by every
    /// later pair of the pass; dead bodies are dropped when the pass ends.
    fn interact(&mut self) -> usize {
        let Toggles {
            gravity,
            collision: merging,
            ..
        } = self.config.toggles;
        if !gravity && !merging {
            return 0;
        }

        let n = self.bodies.len();
        self.alive.clear();
        self.alive.resize(n, true);

        let mut merges = 0;
        for i in 0..n {
            for j in 0..n {
                if i == j || !self.alive[i] || !self.alive[j] {
                    continue;
                }

                let (body, other) = pair_mut(&mut self.bodies, i, j);

                if gravity {
                    self.force.accumulate(body, other);
                }

                if merging {
                    if let MergeOutcome::Merged { survivor, consumed } =
                        collision::resolve(body, other)
                    {
                        let consumed_index = if consumed == body.id { i } else { j };
                        self.alive[consumed_index] = false;
                        merges += 1;
                        log::debug!("Body {} absorbed body {}", survivor.0, consumed.0);
                    }
                }
            }
        }

        if merges > 0 {
            let mut alive = self.alive.iter();
            self.bodies.retain(|_| alive.next().copied().unwrap_or(false));
        }

        merges
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Apply an input command. Rejected commands leave the world unchanged.
    pub fn apply(&mut self, command: Command) -> Result<(), SimulationError> {
        let result = match command {
            Command::Spawn(spawn) => self.spawn(spawn).map(|_| ()),
            Command::RemoveAll => {
                self.remove_all();
                Ok(())
            }
            Command::SetToggle(toggle, value) => {
                self.set_toggle(toggle, value);
                Ok(())
            }
            Command::FlipToggle(toggle) => {
                self.flip_toggle(toggle);
                Ok(())
            }
            Command::SetSubsteps(n) => self.set_substeps(n),
            Command::SubstepPreset(index) => self.select_substep_preset(index),
            Command::SetScheme(scheme) => {
                self.set_scheme(scheme);
                Ok(())
            }
            Command::SetBounds(bounds) => self.set_bounds(bounds),
            Command::Seed(scenario) => self.seed(scenario).map(|_| ()),
        };

        if let Err(err) = &result {
            log::warn!("Rejected command: {}", err);
        }
        result
    }

    /// Append a new body
    pub fn spawn(&mut self, spawn: SpawnBody) -> Result<BodyId, SimulationError> {
        validate_spawn(&spawn)?;
        let size = spawn.size.unwrap_or_default();

        let id = BodyId(self.next_id);
        self.next_id += 1;

        let color = spawn.color.unwrap_or_else(|| random_color(&mut self.rng));
        // Fixed bodies are anchors and start at rest
        let velocity = if spawn.fixed {
            DVec2::ZERO
        } else {
            spawn.velocity
        };
        let body = Body::new(id, spawn.position, size)
            .with_velocity(velocity)
            .with_color(color)
            .with_trail_capacity(self.config.trail_capacity)
            .fixed(spawn.fixed);

        log::debug!(
            "Spawned body {} at ({:.1}, {:.1}), mass {:.1}{}",
            id.0,
            body.position.x,
            body.position.y,
            body.mass(),
            if body.is_fixed { " (fixed)" } else { "" }
        );

        self.bodies.push(body);
        Ok(id)
    }

    /// Add the bodies of a preset scenario
    pub fn seed(&mut self, scenario: Scenario) -> Result<Vec<BodyId>, SimulationError> {
        let spawns = scenario.spawns(&self.config, &mut self.rng);

        // A bad preset adds nothing
        spawns.iter().try_for_each(validate_spawn)?;

        let ids = spawns
            .into_iter()
            .map(|spawn| self.spawn(spawn))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Seeded {:?} ({} bodies)", scenario, ids.len());
        Ok(ids)
    }

    pub fn remove_all(&mut self) {
        log::info!("Cleared {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    pub fn set_toggle(&mut self, toggle: Toggle, value: bool) {
        let toggles = &mut self.config.toggles;
        match toggle {
            Toggle::Gravity => toggles.gravity = value,
            Toggle::Collision => toggles.collision = value,
            Toggle::BoundaryBounce => toggles.boundary_bounce = value,
            Toggle::Pause => toggles.paused = value,
            Toggle::Trails => {
                toggles.trails = value;
                if !value {
                    for body in &mut self.bodies {
                        body.trail.clear();
                    }
                }
            }
            Toggle::Vectors => toggles.vectors = value,
        }
        log::debug!("{} = {}", toggle, value);
    }

    /// Invert a toggle, returning its new value
    pub fn flip_toggle(&mut self, toggle: Toggle) -> bool {
        let value = !self.toggle(toggle);
        self.set_toggle(toggle, value);
        value
    }

    pub fn toggle(&self, toggle: Toggle) -> bool {
        let toggles = &self.config.toggles;
        match toggle {
            Toggle::Gravity => toggles.gravity,
            Toggle::Collision => toggles.collision,
            Toggle::BoundaryBounce => toggles.boundary_bounce,
            Toggle::Pause => toggles.paused,
            Toggle::Trails => toggles.trails,
            Toggle::Vectors => toggles.vectors,
        }
    }

    pub fn set_substeps(&mut self, substeps: u32) -> Result<(), SimulationError> {
        if substeps == 0 {
            return Err(SimulationError::InvalidSubstepCount(substeps));
        }
        self.config.substeps = substeps;
        log::info!("Substeps per tick: {}", substeps);
        Ok(())
    }

    pub fn select_substep_preset(&mut self, index: usize) -> Result<(), SimulationError> {
        let substeps = SUBSTEP_PRESETS
            .get(index)
            .copied()
            .ok_or(SimulationError::UnknownSubstepPreset(index))?;
        self.set_substeps(substeps)
    }

    pub fn set_scheme(&mut self, scheme: IntegratorScheme) {
        self.config.scheme = scheme;
        log::info!("Integrator: {}", scheme);
    }

    pub fn set_bounds(&mut self, bounds: Rect) -> Result<(), SimulationError> {
        if !bounds.is_valid() {
            return Err(SimulationError::InvalidBounds);
        }
        self.config.bounds = bounds;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read-only access
    // ------------------------------------------------------------------

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn toggles(&self) -> Toggles {
        self.config.toggles
    }

    pub fn state(&self) -> RunState {
        if self.config.toggles.paused {
            RunState::Paused
        } else {
            RunState::Running
        }
    }

    /// Simulated seconds elapsed
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Ticks that advanced the simulation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn overlay(&self) -> Overlay {
        let toggles = &self.config.toggles;
        Overlay {
            body_count: self.bodies.len(),
            substeps: self.config.substeps,
            gravity: toggles.gravity,
            collision: toggles.collision,
            boundary_bounce: toggles.boundary_bounce,
            paused: toggles.paused,
            vectors: toggles.vectors,
            scheme: self.config.scheme,
        }
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::measure(&self.bodies)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            bodies: &self.bodies,
            overlay: self.overlay(),
            time: self.time,
        }
    }
}

fn validate_spawn(spawn: &SpawnBody) -> Result<(), SimulationError> {
    let size = spawn.size.unwrap_or_default();
    if !size.is_valid() {
        return Err(match size {
            BodySize::Radius(r) => SimulationError::InvalidRadius(r),
            BodySize::Mass(m) => SimulationError::InvalidMass(m),
        });
    }
    if !(spawn.position.is_finite() && spawn.velocity.is_finite()) {
        return Err(SimulationError::NonFiniteState);
    }
    Ok(())
}

/// Light colour, every channel in [0.5, 1.0)
fn random_color<R: Rng>(rng: &mut R) -> [f32; 3] {
    [
        rng.random_range(0.5..1.0),
        rng.random_range(0.5..1.0),
        rng.random_range(0.5..1.0),
    ]
}

/// Mutable references to two distinct elements
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> SimulationWorld {
        SimulationWorld::new(WorldConfig {
            seed: Some(7),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_spawn_defaults() {
        let mut world = world();
        let id = world.spawn(SpawnBody::at(DVec2::new(100.0, 100.0))).unwrap();
        let body = world.body(id).unwrap();

        assert_eq!(body.radius(), 20.0);
        assert!(body.color.iter().all(|c| (0.5..1.0).contains(c)));
        assert_eq!(body.trail.capacity(), 100);
        assert!(!body.is_fixed);
    }

    #[test]
    fn test_invalid_spawn_leaves_world_unchanged() {
        let mut world = world();
        world.spawn(SpawnBody::at(DVec2::ZERO)).unwrap();

        let err = world.apply(Command::Spawn(SpawnBody::at(DVec2::ZERO).with_mass(0.0)));
        assert_eq!(err, Err(SimulationError::InvalidMass(0.0)));
        let err = world.apply(Command::Spawn(SpawnBody::at(DVec2::ZERO).with_radius(-2.0)));
        assert_eq!(err, Err(SimulationError::InvalidRadius(-2.0)));
        let err = world.apply(Command::Spawn(SpawnBody::at(DVec2::new(f64::NAN, 0.0))));
        assert_eq!(err, Err(SimulationError::NonFiniteState));

        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_ids_are_unique_after_clear() {
        let mut world = world();
        let first = world.spawn(SpawnBody::at(DVec2::ZERO)).unwrap();
        world.apply(Command::RemoveAll).unwrap();
        assert!(world.is_empty());
        let second = world.spawn(SpawnBody::at(DVec2::ZERO)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_substep_commands() {
        let mut world = world();

        assert_eq!(
            world.apply(Command::SetSubsteps(0)),
            Err(SimulationError::InvalidSubstepCount(0))
        );
        assert_eq!(world.config().substeps, 100);

        world.apply(Command::SubstepPreset(5)).unwrap();
        assert_eq!(world.config().substeps, 1000);
        assert_eq!(
            world.apply(Command::SubstepPreset(6)),
            Err(SimulationError::UnknownSubstepPreset(6))
        );
    }

    #[test]
    fn test_pause_freezes_time_and_bodies() {
        let mut world = world();
        let id = world
            .spawn(SpawnBody::at(DVec2::new(400.0, 400.0)).with_velocity(DVec2::new(60.0, 0.0)))
            .unwrap();

        world.apply(Command::FlipToggle(Toggle::Pause)).unwrap();
        assert_eq!(world.state(), RunState::Paused);
        world.step(1.0 / 60.0);

        assert_eq!(world.body(id).unwrap().position, DVec2::new(400.0, 400.0));
        assert_eq!(world.ticks(), 0);

        world.apply(Command::SetToggle(Toggle::Pause, false)).unwrap();
        world.step(1.0 / 60.0);
        assert!((world.body(id).unwrap().position.x - 401.0).abs() < 1e-9);
        assert_eq!(world.ticks(), 1);
    }

    #[test]
    fn test_trails_record_once_per_tick() {
        let mut world = world();
        let id = world
            .spawn(SpawnBody::at(DVec2::new(400.0, 400.0)).with_velocity(DVec2::new(10.0, 0.0)))
            .unwrap();

        for _ in 0..150 {
            world.step(1.0 / 60.0);
        }
        assert_eq!(world.body(id).unwrap().trail.len(), 100);

        world.set_toggle(Toggle::Trails, false);
        assert!(world.body(id).unwrap().trail.is_empty());
        world.step(1.0 / 60.0);
        assert!(world.body(id).unwrap().trail.is_empty());
    }

    #[test]
    fn test_merge_removes_consumed_body() {
        let mut world = world();
        let big = world
            .spawn(SpawnBody::at(DVec2::new(400.0, 400.0)).with_radius(30.0))
            .unwrap();
        world
            .spawn(SpawnBody::at(DVec2::new(420.0, 400.0)).with_radius(10.0))
            .unwrap();

        let merges = world.step(1.0 / 60.0);

        assert_eq!(merges, 1);
        assert_eq!(world.len(), 1);
        assert_eq!(world.bodies()[0].id, big);
    }

    #[test]
    fn test_overlay_follows_toggles() {
        let mut world = world();
        world.seed(Scenario::TwoBody).unwrap();
        world.flip_toggle(Toggle::Gravity);
        world.set_scheme(IntegratorScheme::Rk2);

        let overlay = world.overlay();
        assert_eq!(overlay.body_count, 2);
        assert!(!overlay.gravity);
        assert_eq!(overlay.scheme, IntegratorScheme::Rk2);
    }

    #[test]
    fn test_vectors_toggle_hides_indicator_lines() {
        let mut world = world();
        world
            .spawn(SpawnBody::at(DVec2::new(400.0, 400.0)).with_velocity(DVec2::new(8.0, 0.0)))
            .unwrap();
        assert!(world.toggles().vectors);
        assert_eq!(world.snapshot().vector_lines().len(), 2);

        world.apply(Command::FlipToggle(Toggle::Vectors)).unwrap();
        assert!(!world.overlay().vectors);
        assert!(world.snapshot().vector_lines().is_empty());
        assert_eq!(world.snapshot().instances().len(), 1);
    }

    #[test]
    fn test_fixed_spawn_starts_at_rest() {
        let mut world = world();
        let id = world
            .spawn(
                SpawnBody::at(DVec2::new(400.0, 400.0))
                    .with_velocity(DVec2::new(50.0, -20.0))
                    .fixed(),
            )
            .unwrap();

        let body = world.body(id).unwrap();
        assert!(body.is_fixed);
        assert_eq!(body.velocity, DVec2::ZERO);
        assert_eq!(world.diagnostics().momentum, DVec2::ZERO);
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        assert_eq!((*a, *b), (3, 1));
        let (a, b) = pair_mut(&mut items, 0, 1);
        assert_eq!((*a, *b), (1, 2));
    }
}
