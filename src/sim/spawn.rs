//! Enemy spawner
//!
//! One enemy per spawn interval, materialized just outside a random canvas
//! edge (offset by its own radius) and aimed at the canvas center. The aim
//! is fixed for the enemy's lifetime; there is no homing.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::state::{Color, Enemy, GameState};
use crate::unit_toward;

/// Spawn one enemy at a random off-canvas edge point aimed at canvas center
pub fn spawn_enemy(state: &mut GameState) {
    let radius = state
        .rng
        .random_range(ENEMY_MIN_RADIUS..ENEMY_MAX_RADIUS);

    // Horizontal vs vertical edge, then which side, then position along it.
    let pos = if state.rng.random_bool(0.5) {
        let x = if state.rng.random_bool(0.5) {
            -radius
        } else {
            state.width + radius
        };
        let y = state.rng.random_range(0.0..state.height);
        Vec2::new(x, y)
    } else {
        let x = state.rng.random_range(0.0..state.width);
        let y = if state.rng.random_bool(0.5) {
            -radius
        } else {
            state.height + radius
        };
        Vec2::new(x, y)
    };

    let hue = state.rng.random_range(0.0..360.0f32).floor();
    let vel = unit_toward(pos, state.center());

    state
        .enemies
        .push(Enemy::new(pos, radius, Color::from_hue(hue), vel));
}
