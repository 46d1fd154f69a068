//! Overlap detection and perfectly inelastic merging
//!
//! Two overlapping bodies fuse into one. The survivor keeps its identity,
//! takes the combined mass (radius re-derived from it) and the
//! momentum-weighted velocity. The caller removes the consumed body.

use crate::body::{Body, BodyId};

/// Result of testing a pair for collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    NoCollision,
    Merged { survivor: BodyId, consumed: BodyId },
}

/// Discs intersect (touching does not count)
pub fn overlaps(a: &Body, b: &Body) -> bool {
    a.distance_to(b) < a.radius() + b.radius()
}

/// Whether `p1` survives a merge with `p2`: the heavier body wins and an
/// exact tie goes to `p1`.
pub fn first_survives(p1: &Body, p2: &Body) -> bool {
    p1.mass() >= p2.mass()
}

/// Fold `consumed` into `survivor`, conserving mass and momentum.
/// Fixed survivors keep their velocity.
pub fn absorb(survivor: &mut Body, consumed: &Body) {
    let total_mass = survivor.mass() + consumed.mass();

    if !survivor.is_fixed {
        survivor.velocity = (survivor.momentum() + consumed.momentum()) / total_mass;
    }
    survivor.set_mass(total_mass);
}

/// Merge `p1` and `p2` if they overlap
pub fn resolve(p1: &mut Body, p2: &mut Body) -> MergeOutcome {
    if !overlaps(p1, p2) {
        return MergeOutcome::NoCollision;
    }

    if first_survives(p1, p2) {
        absorb(p1, p2);
        MergeOutcome::Merged {
            survivor: p1.id,
            consumed: p2.id,
        }
    } else {
        absorb(p2, p1);
        MergeOutcome::Merged {
            survivor: p2.id,
            consumed: p1.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{radius_from_mass, BodySize};
    use glam::DVec2;

    fn body(id: u64, x: f64, mass: f64, vx: f64) -> Body {
        Body::new(BodyId(id), DVec2::new(x, 0.0), BodySize::Mass(mass))
            .with_velocity(DVec2::new(vx, 0.0))
    }

    #[test]
    fn test_separated_bodies_do_not_merge() {
        let mut a = Body::new(BodyId(0), DVec2::ZERO, BodySize::Radius(5.0));
        let mut b = Body::new(BodyId(1), DVec2::new(10.0, 0.0), BodySize::Radius(5.0));
        assert_eq!(resolve(&mut a, &mut b), MergeOutcome::NoCollision);
    }

    #[test]
    fn test_heavier_body_survives() {
        let mut light = body(0, 0.0, 100.0, 4.0);
        let mut heavy = body(1, 5.0, 300.0, 0.0);

        let outcome = resolve(&mut light, &mut heavy);

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                survivor: BodyId(1),
                consumed: BodyId(0)
            }
        );
        assert!((heavy.mass() - 400.0).abs() < 1e-9);
        assert!((heavy.radius() - radius_from_mass(400.0)).abs() < 1e-12);
        // (100 * 4 + 300 * 0) / 400
        assert!((heavy.velocity.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_goes_to_first_operand() {
        let mut a = body(7, 0.0, 50.0, 1.0);
        let mut b = body(3, 1.0, 50.0, -1.0);

        match resolve(&mut a, &mut b) {
            MergeOutcome::Merged { survivor, consumed } => {
                assert_eq!(survivor, BodyId(7));
                assert_eq!(consumed, BodyId(3));
            }
            MergeOutcome::NoCollision => panic!("expected merge"),
        }
        assert!(a.velocity.length() < 1e-12);
    }

    #[test]
    fn test_heavy_fixed_anchor_keeps_zero_velocity() {
        let mut anchor = body(0, 0.0, 1000.0, 0.0).fixed(true);
        let mut light = body(1, 2.0, 10.0, -3.0);

        let outcome = resolve(&mut light, &mut anchor);

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                survivor: BodyId(0),
                consumed: BodyId(1)
            }
        );
        assert_eq!(anchor.velocity, DVec2::ZERO);
        assert!((anchor.mass() - 1010.0).abs() < 1e-9);
    }

    #[test]
    fn test_light_fixed_body_is_consumed_with_momentum_conserved() {
        let mut heavy = body(1, 2.0, 1000.0, 3.0);
        let mut anchor = body(0, 0.0, 10.0, 0.0).fixed(true);
        let expected = heavy.momentum() + anchor.momentum();

        let outcome = resolve(&mut heavy, &mut anchor);

        assert_eq!(
            outcome,
            MergeOutcome::Merged {
                survivor: BodyId(1),
                consumed: BodyId(0)
            }
        );
        assert!(!heavy.is_fixed);
        assert!((heavy.momentum() - expected).length() < 1e-9);
    }
}
