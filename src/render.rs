//! Canvas 2D renderer
//!
//! Draws the whole scene as filled circles over a low-alpha black fill, which
//! is what produces the motion-trail look. No game logic lives here.

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::TRAIL_FADE_ALPHA;
use crate::sim::{Color, GameState};

/// Renderer over a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self {
            ctx,
            width: width as f64,
            height: height as f64,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
    }

    /// Paint one frame: fade pass, then every entity back-to-front
    pub fn render(&self, state: &GameState, trails: bool) -> Result<(), JsValue> {
        self.clear(trails);

        self.fill_circle(state.player.pos, state.player.radius, &state.player.color)?;
        for particle in &state.particles {
            self.fill_circle(particle.pos, particle.radius, &particle.color)?;
        }
        for projectile in &state.projectiles {
            self.fill_circle(projectile.pos, projectile.radius, &projectile.color)?;
        }
        for enemy in &state.enemies {
            self.fill_circle(enemy.pos, enemy.radius, &enemy.color)?;
        }

        Ok(())
    }

    /// Low-alpha black fill when trails are on, opaque otherwise
    fn clear(&self, trails: bool) {
        if trails {
            self.ctx
                .set_fill_style_str(&format!("rgba(0, 0, 0, {})", TRAIL_FADE_ALPHA));
        } else {
            self.ctx.set_fill_style_str("rgb(0, 0, 0)");
        }
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&self, pos: Vec2, radius: f32, color: &Color) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.arc(
            pos.x as f64,
            pos.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}
