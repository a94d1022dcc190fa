//! Collision and bounds tests
//!
//! Everything in the arena is a circle, so overlap is a distance check
//! against the sum of radii.

use glam::Vec2;

/// True when two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Clamp a point into the [0, w] x [0, h] rectangle
#[inline]
pub fn clamp_to_arena(pos: Vec2, arena: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, arena)
}

/// True while a point is inside the arena grown by `margin` on every side
#[inline]
pub fn within_margin(pos: Vec2, arena: Vec2, margin: f32) -> bool {
    pos.x > -margin && pos.x < arena.x + margin && pos.y > -margin && pos.y < arena.y + margin
}
