//! Headless 2D Gravity Sandbox
//!
//! Drives a `SimulationWorld` from a fixed-rate clock, the way a window's
//! frame callback would, and logs the overlay instead of drawing it.

mod controls;

use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use planet_physics::{IntegratorScheme, TICK_RATE};
use planet_simulation::{Scenario, SimulationWorld, WorldConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    /// Start with no bodies
    Empty,
    /// Two bodies circling each other
    TwoBody,
    /// Fixed sun with an orbiting planet
    Sun,
    /// Random bodies inside the bounds
    Scatter,
}

#[derive(Parser, Debug)]
#[command(about = "Interactive 2D N-body gravity sandbox (headless driver)")]
struct Args {
    /// YAML world configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset bodies to start with
    #[arg(short, long, value_enum, default_value = "sun")]
    scenario: ScenarioArg,

    /// Body count for the scatter preset
    #[arg(long, default_value_t = 30)]
    count: usize,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Substeps per tick (overrides the config file)
    #[arg(long)]
    substeps: Option<u32>,

    /// Integrator scheme: verlet, symplecticEuler, explicitEuler or rk2
    #[arg(long)]
    integrator: Option<IntegratorScheme>,

    /// RNG seed for colours and scatter placement
    #[arg(long)]
    seed: Option<u64>,

    /// Inputs applied before the first tick, e.g. "b 5 click@200,300"
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Pace ticks to wall-clock time
    #[arg(long)]
    realtime: bool,
}

fn load_config(path: &Path) -> Result<WorldConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config: WorldConfig = serde_yaml::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn build_world(args: &Args) -> Result<SimulationWorld> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => WorldConfig::default(),
    };
    if let Some(substeps) = args.substeps {
        config.substeps = substeps;
    }
    if let Some(scheme) = args.integrator {
        config.scheme = scheme;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut world = SimulationWorld::new(config)?;

    let scenario = match args.scenario {
        ScenarioArg::Empty => None,
        ScenarioArg::TwoBody => Some(Scenario::TwoBody),
        ScenarioArg::Sun => Some(Scenario::SunAndPlanet),
        ScenarioArg::Scatter => Some(Scenario::Scatter { count: args.count }),
    };
    if let Some(scenario) = scenario {
        world.seed(scenario)?;
    }

    let rejected = controls::apply_script(&mut world, &args.keys)?;
    if rejected > 0 {
        log::warn!("{} scripted input(s) were rejected", rejected);
    }

    Ok(world)
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting gravity sandbox...");

    let mut world = build_world(&args)?;
    log::info!("✓ World ready with {} bodies", world.len());

    let tick = Duration::from_secs_f64(1.0 / TICK_RATE);
    let mut step_times: VecDeque<f32> = VecDeque::with_capacity(100);
    let mut merges = 0;

    for tick_index in 1..=args.ticks {
        let started = Instant::now();
        merges += world.step(tick.as_secs_f64());
        let elapsed = started.elapsed();

        step_times.push_back(elapsed.as_secs_f32() * 1000.0);
        if step_times.len() > 100 {
            step_times.pop_front();
        }

        if tick_index % TICK_RATE as u64 == 0 {
            let avg_step = step_times.iter().sum::<f32>() / step_times.len() as f32;
            let diagnostics = world.diagnostics();
            log::info!(
                "t={:.1}s step={:.2}ms merges={} |p|={:.1}\n{}",
                world.time(),
                avg_step,
                merges,
                diagnostics.momentum.length(),
                world.overlay()
            );
        }

        if args.realtime {
            if let Some(remaining) = tick.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }
    }

    let snapshot = world.snapshot();
    let diagnostics = snapshot.diagnostics();
    log::info!(
        "Finished after {} ticks: {} bodies, total mass {:.1}, kinetic energy {:.1}",
        world.ticks(),
        snapshot.bodies.len(),
        diagnostics.total_mass,
        diagnostics.kinetic_energy
    );
    if let Some(com) = diagnostics.center_of_mass {
        log::info!("Centre of mass ({:.1}, {:.1})", com.x, com.y);
    }
    for body in snapshot.bodies {
        log::debug!(
            "  body {} at ({:.1}, {:.1}) r={:.1} trail={}",
            body.id.0,
            body.position.x,
            body.position.y,
            body.radius(),
            body.trail.len()
        );
    }

    Ok(())
}
