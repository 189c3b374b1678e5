//! Axis-separated movement against the grid.

use glam::Vec2;
use last_stand_core::GridMap;

/// Outcome of moving a point through the grid one axis at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Slide {
    /// Position after resolution.
    pub(crate) position: Vec2,
    /// Whether the X component was refused.
    pub(crate) blocked_x: bool,
    /// Whether the Y component was refused.
    pub(crate) blocked_y: bool,
}

/// Applies `delta` along X and then along Y, dropping each component whose
/// destination is blocked. Fast movers can clip corners.
pub(crate) fn slide(map: &GridMap, position: Vec2, delta: Vec2) -> Slide {
    let mut next = position;

    let blocked_x = map.is_blocked_xy(position.x + delta.x, position.y);
    if !blocked_x {
        next.x += delta.x;
    }

    let blocked_y = map.is_blocked_xy(next.x, position.y + delta.y);
    if !blocked_y {
        next.y += delta.y;
    }

    Slide {
        position: next,
        blocked_x,
        blocked_y,
    }
}
