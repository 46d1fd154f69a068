//! Input bindings: keys and mouse gestures mapped to world commands

use anyhow::{bail, Context, Result};
use glam::DVec2;
use planet_physics::IntegratorScheme;
use planet_simulation::{Command, Scenario, SimulationWorld, SpawnBody, Toggle};

/// One user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Key(Key),
    /// Right click: drop a resting body
    Click(DVec2),
    /// Left drag: launch a body from `start` with velocity `end - start`
    Drag { start: DVec2, end: DVec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    F1,
}

/// Command bound to `input`, if any. `scheme` is the active integrator,
/// needed to cycle to the next one.
pub fn command_for(input: Input, scheme: IntegratorScheme) -> Option<Command> {
    match input {
        Input::Click(position) => Some(Command::Spawn(SpawnBody::at(position))),
        Input::Drag { start, end } => Some(Command::Spawn(
            SpawnBody::at(start).with_velocity(end - start),
        )),
        Input::Key(Key::Space) => Some(Command::RemoveAll),
        Input::Key(Key::F1) => Some(Command::Seed(Scenario::TwoBody)),
        Input::Key(Key::Char(c)) => match c {
            'p' => Some(Command::FlipToggle(Toggle::Pause)),
            'g' => Some(Command::FlipToggle(Toggle::Gravity)),
            'c' => Some(Command::FlipToggle(Toggle::Collision)),
            'b' => Some(Command::FlipToggle(Toggle::BoundaryBounce)),
            't' => Some(Command::FlipToggle(Toggle::Trails)),
            'v' => Some(Command::FlipToggle(Toggle::Vectors)),
            'i' => Some(Command::SetScheme(next_scheme(scheme))),
            '1'..='6' => Some(Command::SubstepPreset(c as usize - '1' as usize)),
            _ => None,
        },
    }
}

fn next_scheme(scheme: IntegratorScheme) -> IntegratorScheme {
    let all = IntegratorScheme::ALL;
    let index = all.iter().position(|s| *s == scheme).unwrap_or(0);
    all[(index + 1) % all.len()]
}

/// Feed a parsed input script to `world`. Inputs the world rejects are
/// logged and skipped; returns how many were rejected.
pub fn apply_script(world: &mut SimulationWorld, script: &str) -> Result<usize> {
    let mut rejected = 0;
    for input in parse_script(script)? {
        let Some(command) = command_for(input, world.config().scheme) else {
            continue;
        };
        if let Err(err) = world.apply(command) {
            log::warn!("Input {:?} ignored: {}", input, err);
            rejected += 1;
        }
    }
    Ok(rejected)
}

/// Parse a whitespace separated input script.
///
/// Tokens are single keys (`g`, `5`), `space`, `f1`, `click@x,y` or
/// `drag@x1,y1,x2,y2`.
pub fn parse_script(script: &str) -> Result<Vec<Input>> {
    script.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<Input> {
    if let Some((gesture, args)) = token.split_once('@') {
        let numbers = args
            .split(',')
            .map(|n| n.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("bad coordinates in '{}'", token))?;

        return match (gesture, numbers.as_slice()) {
            ("click", &[x, y]) => Ok(Input::Click(DVec2::new(x, y))),
            ("drag", &[x1, y1, x2, y2]) => Ok(Input::Drag {
                start: DVec2::new(x1, y1),
                end: DVec2::new(x2, y2),
            }),
            _ => bail!("unknown gesture '{}'", token),
        };
    }

    match token.to_ascii_lowercase().as_str() {
        "space" => Ok(Input::Key(Key::Space)),
        "f1" => Ok(Input::Key(Key::F1)),
        key => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Input::Key(Key::Char(c))),
                _ => bail!("unknown key '{}'", token),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_select_presets() {
        let command = command_for(Input::Key(Key::Char('1')), IntegratorScheme::Verlet);
        assert_eq!(command, Some(Command::SubstepPreset(0)));
        let command = command_for(Input::Key(Key::Char('6')), IntegratorScheme::Verlet);
        assert_eq!(command, Some(Command::SubstepPreset(5)));
        assert_eq!(command_for(Input::Key(Key::Char('x')), IntegratorScheme::Verlet), None);
    }

    #[test]
    fn test_v_flips_vectors() {
        assert_eq!(
            command_for(Input::Key(Key::Char('v')), IntegratorScheme::Rk2),
            Some(Command::FlipToggle(Toggle::Vectors))
        );
    }

    #[test]
    fn test_apply_script_counts_rejected_inputs() {
        let mut world = SimulationWorld::new(planet_simulation::WorldConfig {
            seed: Some(11),
            ..Default::default()
        })
        .unwrap();

        let rejected = apply_script(&mut world, "click@nan,0 click@10,10 v").unwrap();
        assert_eq!(rejected, 1);
        assert_eq!(world.len(), 1);
        assert!(!world.toggles().vectors);

        assert!(apply_script(&mut world, "click@1").is_err());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_scheme_key_cycles() {
        let mut scheme = IntegratorScheme::Verlet;
        for _ in 0..IntegratorScheme::ALL.len() {
            match command_for(Input::Key(Key::Char('i')), scheme) {
                Some(Command::SetScheme(next)) => scheme = next,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(scheme, IntegratorScheme::Verlet);
    }

    #[test]
    fn test_drag_launches_with_offset_velocity() {
        let input = Input::Drag {
            start: DVec2::new(10.0, 10.0),
            end: DVec2::new(40.0, 0.0),
        };
        match command_for(input, IntegratorScheme::Verlet) {
            Some(Command::Spawn(spawn)) => {
                assert_eq!(spawn.position, DVec2::new(10.0, 10.0));
                assert_eq!(spawn.velocity, DVec2::new(30.0, -10.0));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_script() {
        let inputs = parse_script("b 5 space F1 click@100,200 drag@1,2,3,4").unwrap();
        assert_eq!(
            inputs,
            vec![
                Input::Key(Key::Char('b')),
                Input::Key(Key::Char('5')),
                Input::Key(Key::Space),
                Input::Key(Key::F1),
                Input::Click(DVec2::new(100.0, 200.0)),
                Input::Drag {
                    start: DVec2::new(1.0, 2.0),
                    end: DVec2::new(3.0, 4.0),
                },
            ]
        );

        assert!(parse_script("click@1").is_err());
        assert!(parse_script("enter").is_err());
        assert!(parse_script("drag@a,b,c,d").is_err());
    }
}
