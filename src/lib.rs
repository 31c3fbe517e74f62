//! Pop Shot - a single-screen canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `render`: Canvas 2D rendering (wasm only)
//! - `audio`: Procedural Web Audio sound effects (wasm only)
//! - `highscores`: Locally persisted best score
//! - `settings`: Player preferences

pub mod highscores;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; one tick is one display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player dot radius
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Per-tick velocity multiplier for projectiles
    pub const PROJECTILE_SPEED: f32 = 2.0;

    /// Enemy spawn radius range (half-open: exactly 30 never spawns)
    pub const ENEMY_MIN_RADIUS: f32 = 5.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Radius lost per projectile hit
    pub const ENEMY_HIT_SHRINK: f32 = 5.0;
    /// Ticks between enemy spawns (1000 ms at 60 Hz)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;

    /// Particle defaults
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    pub const PARTICLE_DURATION: f32 = 10.0;
    pub const PARTICLE_DECAY: f32 = 0.1;

    /// Circles collide when the gap between their rims is below this
    pub const COLLISION_SLOP: f32 = 1.0;

    /// Alpha of the per-frame black fill that produces motion trails
    pub const TRAIL_FADE_ALPHA: f64 = 0.1;
}

/// Unit vector from `from` toward `to`, via the angle between them
#[inline]
pub fn unit_toward(from: Vec2, to: Vec2) -> Vec2 {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_toward_axis_aligned() {
        let v = unit_toward(Vec2::new(-30.0, 300.0), Vec2::new(400.0, 300.0));
        assert!((v.x - 1.0).abs() < 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_unit_toward_is_unit_length() {
        let v = unit_toward(Vec2::new(10.0, 20.0), Vec2::new(-75.0, 3.0));
        assert!((v.length() - 1.0).abs() < 1e-5);
    }
}
