//! Per-frame simulation tick
//!
//! Advances the three entity collections, runs the collision pass, and
//! reports what happened as events for the shell to act on.
//!
//! Removal discipline: projectiles and enemies are flagged dead during the
//! scan and compacted once at the end of the tick (mark-and-compact, order
//! stable), so the pass never mutates a collection mid-iteration. Particles
//! are integrated first and compacted with `retain`, which drops every
//! expired particle in the tick it expires.

use glam::Vec2;
use rand::Rng;

use super::collision::{circles_collide, leaves_canvas};
use super::spawn::spawn_enemy;
use super::state::{GameEvent, GamePhase, GameState, Particle};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Fire a projectile from the player toward this canvas point (one-shot)
    pub fire_at: Option<Vec2>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    if let Some(target) = input.fire_at {
        state.fire_projectile(target);
        events.push(GameEvent::ProjectileFired);
    }

    // Particles: integrate, then compact.
    for particle in &mut state.particles {
        particle.advance();
    }
    state.particles.retain(|p| !p.expired());

    // Projectiles: integrate and flag the ones that left the canvas. A dead
    // projectile is still swept this frame but no longer collides.
    let (width, height) = (state.width, state.height);
    for projectile in &mut state.projectiles {
        projectile.advance();
        if leaves_canvas(projectile.pos, projectile.radius, width, height) {
            projectile.alive = false;
        }
    }

    // Enemies: integrate, test against the player first, then against every
    // live projectile.
    let mut run_ended = false;
    let mut burst: Vec<Particle> = Vec::new();
    for enemy in &mut state.enemies {
        enemy.advance();

        if !run_ended
            && circles_collide(
                state.player.pos,
                state.player.radius,
                enemy.pos,
                enemy.radius,
            )
        {
            // Terminal, but the pass still finishes: a hit landing in the
            // same frame still scores.
            state.phase = GamePhase::GameOver;
            run_ended = true;
        }

        for projectile in &mut state.projectiles {
            if !projectile.alive {
                continue;
            }
            if !circles_collide(projectile.pos, projectile.radius, enemy.pos, enemy.radius) {
                continue;
            }

            // Burst size scales with the enemy's size at the moment of the hit.
            for _ in 0..enemy.radius.floor() as u32 {
                let radius = state.rng.random::<f32>() * PARTICLE_MAX_RADIUS;
                let vel = Vec2::new(
                    (state.rng.random::<f32>() - 0.5) * (state.rng.random::<f32>() * 2.0),
                    (state.rng.random::<f32>() - 0.5) * (state.rng.random::<f32>() * 2.0),
                );
                burst.push(Particle::new(projectile.pos, radius, enemy.color, vel));
            }

            if enemy.radius > ENEMY_HIT_SHRINK {
                enemy.radius -= ENEMY_HIT_SHRINK;
                projectile.alive = false;
            }
            // A shrink can land at or below the floor; that still destroys.
            if enemy.radius <= ENEMY_HIT_SHRINK {
                enemy.alive = false;
                projectile.alive = false;
            }

            state.score += 1;
            events.push(if enemy.alive {
                GameEvent::EnemyHit
            } else {
                GameEvent::EnemyDestroyed
            });

            if !enemy.alive {
                break;
            }
        }
    }
    state.particles.extend(burst);

    // Spawner: fixed 1000 ms cadence folded into the tick counter.
    state.spawn_ticks += 1;
    if state.spawn_ticks >= SPAWN_INTERVAL_TICKS {
        state.spawn_ticks = 0;
        spawn_enemy(state);
    }

    state.projectiles.retain(|p| p.alive);
    state.enemies.retain(|e| e.alive);

    // Reported last so the final score includes same-frame hits.
    if run_ended {
        events.push(GameEvent::RunEnded { score: state.score });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Color, Enemy, Projectile};

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 800.0, 600.0);
        state.start();
        state
    }

    /// An enemy that holds still: zero aim vector, any radius tier.
    fn parked_enemy(x: f32, y: f32, radius: f32) -> Enemy {
        Enemy::new(
            Vec2::new(x, y),
            radius,
            Color::from_hue(180.0),
            Vec2::ZERO,
        )
    }

    #[test]
    fn test_fire_input_creates_projectile() {
        let mut state = playing_state();
        let input = TickInput {
            fire_at: Some(Vec2::new(800.0, 300.0)),
        };
        let events = tick(&mut state, &input);

        assert_eq!(state.projectiles.len(), 1);
        assert!(events.contains(&GameEvent::ProjectileFired));
        // Fired this tick, so it has already advanced once.
        assert!((state.projectiles[0].pos.x - 402.0).abs() < 1e-4);
    }

    #[test]
    fn test_fire_ignored_outside_playing() {
        let mut state = GameState::new(1, 800.0, 600.0);
        let input = TickInput {
            fire_at: Some(Vec2::new(0.0, 0.0)),
        };
        let events = tick(&mut state, &input);
        assert!(state.projectiles.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn test_hit_shrinks_enemy_and_consumes_projectile() {
        let mut state = playing_state();
        state.enemies.push(parked_enemy(200.0, 300.0, 12.0));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(193.0, 300.0), Vec2::new(1.0, 0.0)));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].radius, 7.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(events, vec![GameEvent::EnemyHit]);
        // Burst size is the radius at the moment of the hit.
        assert_eq!(state.particles.len(), 12);
    }

    #[test]
    fn test_shrink_through_floor_destroys_enemy() {
        // Radius 8 shrinks to 3, which is at or below the floor of 5.
        let mut state = playing_state();
        state.enemies.push(parked_enemy(200.0, 300.0, 8.0));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(193.0, 300.0), Vec2::new(1.0, 0.0)));

        let events = tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(events, vec![GameEvent::EnemyDestroyed]);
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_small_enemy_destroyed_outright() {
        let mut state = playing_state();
        state.enemies.push(parked_enemy(200.0, 300.0, 4.0));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(195.0, 300.0), Vec2::new(1.0, 0.0)));

        let events = tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(events, vec![GameEvent::EnemyDestroyed]);
        assert_eq!(state.particles.len(), 4);
    }

    #[test]
    fn test_particles_carry_enemy_color() {
        let mut state = playing_state();
        let mut enemy = parked_enemy(200.0, 300.0, 10.0);
        enemy.color = Color::from_hue(42.0);
        state.enemies.push(enemy);
        state
            .projectiles
            .push(Projectile::new(Vec2::new(193.0, 300.0), Vec2::new(1.0, 0.0)));

        tick(&mut state, &TickInput::default());

        assert!(!state.particles.is_empty());
        for p in &state.particles {
            assert_eq!(p.color.hue, 42.0);
            assert!(p.radius < PARTICLE_MAX_RADIUS);
            assert_eq!(p.duration, PARTICLE_DURATION);
        }
    }

    #[test]
    fn test_player_collision_ends_run() {
        let mut state = playing_state();
        // Right on top of the player.
        state.enemies.push(parked_enemy(405.0, 300.0, 10.0));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::RunEnded { score: 0 }]);

        // Terminal: further ticks are no-ops.
        let ticks_before = state.time_ticks;
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, ticks_before);
    }

    #[test]
    fn test_same_frame_hit_still_scores_on_run_end() {
        let mut state = playing_state();
        // One enemy ends the run, another eats a projectile in the same pass.
        state.enemies.push(parked_enemy(405.0, 300.0, 10.0));
        state.enemies.push(parked_enemy(200.0, 100.0, 4.0));
        state
            .projectiles
            .push(Projectile::new(Vec2::new(195.0, 100.0), Vec2::new(1.0, 0.0)));

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
        // The final score reported includes the same-frame hit.
        assert_eq!(
            events,
            vec![
                GameEvent::EnemyDestroyed,
                GameEvent::RunEnded { score: 1 }
            ]
        );
    }

    #[test]
    fn test_offscreen_projectile_removed() {
        let mut state = playing_state();
        state
            .projectiles
            .push(Projectile::new(Vec2::new(7.0, 300.0), Vec2::new(-1.0, 0.0)));

        tick(&mut state, &TickInput::default());
        // Advanced to x=5, rim touches the edge, still inside.
        assert_eq!(state.projectiles.len(), 1);

        tick(&mut state, &TickInput::default());
        // x=3, rim crosses the edge.
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = playing_state();
        for _ in 0..SPAWN_INTERVAL_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);

        for _ in 0..SPAWN_INTERVAL_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_all_expired_particles_leave_in_one_tick() {
        // Adjacent expiring particles used to shadow each other under
        // index-based removal; retain drops them all at once.
        let mut state = playing_state();
        for _ in 0..3 {
            let mut p = Particle::new(
                Vec2::new(100.0, 100.0),
                1.0,
                Color::from_hue(10.0),
                Vec2::ZERO,
            );
            p.duration = 0.05;
            state.particles.push(p);
        }

        tick(&mut state, &TickInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_score_is_monotone() {
        let mut state = playing_state();
        let mut last = 0;
        for i in 0..300 {
            // Keep feeding targets so hits keep happening.
            if i % 10 == 0 {
                state.enemies.push(parked_enemy(200.0, 300.0, 6.0));
                state
                    .projectiles
                    .push(Projectile::new(Vec2::new(193.0, 300.0), Vec2::new(1.0, 0.0)));
            }
            tick(&mut state, &TickInput::default());
            assert!(state.score >= last);
            last = state.score;
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(last > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and inputs stay identical.
        let mut a = GameState::new(99999, 800.0, 600.0);
        let mut b = GameState::new(99999, 800.0, 600.0);
        a.start();
        b.start();

        for i in 0..240u32 {
            let input = if i % 30 == 0 {
                TickInput {
                    fire_at: Some(Vec2::new((i * 13 % 800) as f32, (i * 7 % 600) as f32)),
                }
            } else {
                TickInput::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.projectiles.len(), b.projectiles.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.radius, eb.radius);
        }
    }

    #[test]
    fn test_edge_spawn_scenario_moves_slowly() {
        // Big enemy just outside the left edge, aimed at center: 0.1x tier.
        let mut state = playing_state();
        state.enemies.push(Enemy::new(
            Vec2::new(-30.0, 300.0),
            29.5,
            Color::from_hue(0.0),
            crate::unit_toward(Vec2::new(-30.0, 300.0), Vec2::new(400.0, 300.0)),
        ));

        tick(&mut state, &TickInput::default());

        let e = &state.enemies[0];
        assert!((e.pos.x - (-29.9)).abs() < 1e-3);
        assert!((e.pos.y - 300.0).abs() < 1e-3);
    }
}
