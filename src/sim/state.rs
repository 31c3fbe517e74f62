//! Game state and core simulation types
//!
//! The three entity collections, the score, and the RNG all live on
//! [`GameState`] so the whole run can be advanced and inspected headlessly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::unit_toward;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting on the start menu
    Menu,
    /// Active run
    Playing,
    /// Run ended on a player-enemy collision
    GameOver,
}

/// Fill color for a drawn circle, kept as HSL so enemy hues are one random draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Hue in degrees [0, 360)
    pub hue: f32,
    /// Saturation percent
    pub saturation: f32,
    /// Lightness percent
    pub lightness: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        hue: 0.0,
        saturation: 0.0,
        lightness: 100.0,
    };

    /// Enemy palette: random hue at fixed 50%/50% saturation and lightness
    pub fn from_hue(hue: f32) -> Self {
        Self {
            hue,
            saturation: 50.0,
            lightness: 50.0,
        }
    }

    /// CSS color string usable as a canvas fill style
    pub fn to_css(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// The player dot, pinned to canvas center for the whole run
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    pub fn new(center: Vec2) -> Self {
        Self {
            pos: center,
            radius: PLAYER_RADIUS,
            color: Color::WHITE,
        }
    }
}

/// A fired projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Unit direction fixed at fire time
    pub vel: Vec2,
    /// Cleared when off-canvas or on depleting an enemy; compacted at end of tick
    pub alive: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            radius: PROJECTILE_RADIUS,
            color: Color::WHITE,
            vel,
            alive: true,
        }
    }

    /// Integrate one tick of movement
    pub fn advance(&mut self) {
        self.pos += self.vel * PROJECTILE_SPEED;
    }
}

/// An enemy circle converging on the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Unit direction toward canvas center, fixed at spawn (no homing)
    pub vel: Vec2,
    /// Cleared when depleted; compacted at end of tick
    pub alive: bool,
}

impl Enemy {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            color,
            vel,
            alive: true,
        }
    }

    /// Movement multiplier for the current radius
    pub fn speed_factor(&self) -> f32 {
        speed_factor_for_radius(self.radius)
    }

    /// Integrate one tick of movement at the tiered speed
    pub fn advance(&mut self) {
        self.pos += self.vel * self.speed_factor();
    }
}

/// Movement multiplier tiered by radius: big enemies crawl, small ones sprint.
///
/// Radii of exactly 10, 20 or 30 fall through every tier and do not move.
/// That matches the shipped behavior and is asserted by tests; the spawn
/// range is half-open so only a shrink to exactly 10 or 20 could reach it.
pub fn speed_factor_for_radius(radius: f32) -> f32 {
    if radius < 30.0 && radius > 20.0 {
        0.1
    } else if radius < 20.0 && radius > 10.0 {
        0.5
    } else if radius < 10.0 && radius > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// A burst particle thrown off a hit enemy
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub vel: Vec2,
    /// Remaining lifetime, ticked down by [`PARTICLE_DECAY`] per frame
    pub duration: f32,
}

impl Particle {
    pub fn new(pos: Vec2, radius: f32, color: Color, vel: Vec2) -> Self {
        Self {
            pos,
            radius,
            color,
            vel,
            duration: PARTICLE_DURATION,
        }
    }

    /// Integrate one tick: raw velocity, no speed tiering, lifetime decays
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.duration -= PARTICLE_DECAY;
    }

    pub fn expired(&self) -> bool {
        self.duration <= 0.0
    }
}

/// Events raised by a tick, consumed by the shell for audio/HUD/persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A projectile was fired from the player
    ProjectileFired,
    /// A projectile hit an enemy (the enemy survived, shrunk)
    EnemyHit,
    /// A projectile depleted an enemy
    EnemyDestroyed,
    /// The run ended on a player-enemy collision
    RunEnded { score: u64 },
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Canvas dimensions the run was started with
    pub width: f32,
    pub height: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Score, +1 per projectile-enemy hit, monotone within a run
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the last enemy spawn
    pub spawn_ticks: u32,
    /// The player dot
    pub player: Player,
    /// Active projectiles
    pub projectiles: Vec<Projectile>,
    /// Active enemies
    pub enemies: Vec<Enemy>,
    /// Active burst particles
    pub particles: Vec<Particle>,
    /// Seeded RNG, sole source of randomness in the sim
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh state sitting on the menu
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self {
            seed,
            width,
            height,
            phase: GamePhase::Menu,
            score: 0,
            time_ticks: 0,
            spawn_ticks: 0,
            player: Player::new(Vec2::new(width / 2.0, height / 2.0)),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Canvas center, where enemies aim and the player sits
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Begin the run (start/retry button)
    pub fn start(&mut self) {
        self.phase = GamePhase::Playing;
    }

    /// Fire a projectile from the player toward `target`
    pub fn fire_projectile(&mut self, target: Vec2) {
        let vel = unit_toward(self.player.pos, target);
        self.projectiles
            .push(Projectile::new(self.player.pos, vel));
    }
}
