//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per display frame)
//! - Seeded RNG only, owned by the state
//! - Stable iteration order (mark-and-compact removal)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_collide, leaves_canvas};
pub use spawn::spawn_enemy;
pub use state::{
    Color, Enemy, GameEvent, GamePhase, GameState, Particle, Player, Projectile,
    speed_factor_for_radius,
};
pub use tick::{TickInput, tick};
