//! Circle-circle collision and canvas bounds tests
//!
//! Everything here works on plain centers and radii so the predicates can be
//! property-tested without any game state.

use glam::Vec2;

use crate::consts::COLLISION_SLOP;

/// True when the gap between two circle rims is below [`COLLISION_SLOP`].
///
/// The comparison is strict: a gap of exactly 1 does not collide.
#[inline]
pub fn circles_collide(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) - (a_radius + b_radius) < COLLISION_SLOP
}

/// True once the circle's bounding extent crosses any canvas edge.
///
/// Fires as soon as the rim pokes past a bound, which removes projectiles a
/// few frames early but keeps the test cheap.
#[inline]
pub fn leaves_canvas(pos: Vec2, radius: f32, width: f32, height: f32) -> bool {
    pos.x - radius < 0.0
        || pos.x + radius > width
        || pos.y - radius < 0.0
        || pos.y + radius > height
}
