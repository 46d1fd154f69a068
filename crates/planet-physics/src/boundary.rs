//! Bouncing off the edges of a rectangular area

use crate::body::Body;
use crate::vector::Rect;

/// Edge of the bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Bottom,
    Top,
}

/// Reflect `body` off the first edge of `bounds` its disc crosses.
///
/// Edges are checked left, right, bottom, top and only the first violation is
/// corrected; a body in a corner settles over the following calls. The normal
/// velocity component is flipped and scaled by `elasticity`, and the body is
/// moved back so it touches the edge from inside.
pub fn apply(body: &mut Body, bounds: &Rect, elasticity: f64) -> Option<Edge> {
    let radius = body.radius();
    let position = body.position;

    let edge = if position.x - radius < bounds.min.x {
        body.position.x = bounds.min.x + radius;
        Edge::Left
    } else if position.x + radius > bounds.max.x {
        body.position.x = bounds.max.x - radius;
        Edge::Right
    } else if position.y - radius < bounds.min.y {
        body.position.y = bounds.min.y + radius;
        Edge::Bottom
    } else if position.y + radius > bounds.max.y {
        body.position.y = bounds.max.y - radius;
        Edge::Top
    } else {
        return None;
    };

    match edge {
        Edge::Left | Edge::Right => body.velocity.x = -body.velocity.x * elasticity,
        Edge::Bottom | Edge::Top => body.velocity.y = -body.velocity.y * elasticity,
    }

    Some(edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, BodySize};
    use glam::DVec2;

    fn ball(x: f64, y: f64, vx: f64, vy: f64) -> Body {
        Body::new(BodyId(0), DVec2::new(x, y), BodySize::Radius(10.0))
            .with_velocity(DVec2::new(vx, vy))
    }

    #[test]
    fn test_inside_is_untouched() {
        let mut body = ball(400.0, 400.0, 5.0, 5.0);
        assert_eq!(apply(&mut body, &Rect::default(), 1.0), None);
        assert_eq!(body.velocity, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn test_left_edge_reflects_and_repositions() {
        let mut body = ball(4.0, 400.0, -30.0, 7.0);

        assert_eq!(apply(&mut body, &Rect::default(), 1.0), Some(Edge::Left));
        assert_eq!(body.position.x, 10.0);
        assert_eq!(body.velocity, DVec2::new(30.0, 7.0));
    }

    #[test]
    fn test_top_edge_with_partial_elasticity() {
        let mut body = ball(400.0, 795.0, 3.0, 20.0);

        assert_eq!(apply(&mut body, &Rect::default(), 0.5), Some(Edge::Top));
        assert_eq!(body.position.y, 790.0);
        assert_eq!(body.velocity, DVec2::new(3.0, -10.0));
    }

    #[test]
    fn test_corner_corrects_one_edge_per_call() {
        let mut body = ball(2.0, 2.0, -1.0, -1.0);
        let bounds = Rect::default();

        assert_eq!(apply(&mut body, &bounds, 1.0), Some(Edge::Left));
        assert_eq!(body.position.y, 2.0);
        assert_eq!(apply(&mut body, &bounds, 1.0), Some(Edge::Bottom));
        assert_eq!(body.position, DVec2::new(10.0, 10.0));
        assert_eq!(apply(&mut body, &bounds, 1.0), None);
    }
}
