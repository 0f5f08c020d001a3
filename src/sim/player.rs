//! The player's aircraft
//!
//! Heat gates the fire rate: every shot adds a fixed amount, and heat bleeds
//! off continuously with elapsed time. Heat always stays within `0..=max_heat`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TickContext};
use super::projectile::PlayerBullet;
use super::rect::Rect;
use crate::config::{GameConfig, PlayerConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub lives: u8,
    pub heat: f32,
    pub alive: bool,
}

impl Player {
    /// Fresh player at the configured spawn point
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rect: Rect::from_center(config.player.spawn, config.sprites.player),
            lives: config.player.lives,
            heat: 0.0,
            alive: true,
        }
    }

    /// Top-center of the sprite, where shots leave from
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.top())
    }

    /// Apply a movement command, then keep the sprite on screen
    pub fn move_by(&mut self, dx: i8, dy: i8, speed: f32, screen: &Rect) {
        self.rect
            .translate(Vec2::new(dx as f32 * speed, dy as f32 * speed));
        self.rect.clamp_within(screen);
    }

    /// True if one more shot would not push heat past the maximum
    pub fn can_fire(&self, tuning: &PlayerConfig) -> bool {
        self.heat <= tuning.max_heat - tuning.heat_per_shot
    }

    /// Fire one forward bullet if the heat gate allows it
    pub fn try_fire(&mut self, id: u32, config: &GameConfig) -> Option<PlayerBullet> {
        if !self.alive || !self.can_fire(&config.player) {
            return None;
        }
        self.heat = (self.heat + config.player.heat_per_shot).min(config.player.max_heat);
        Some(PlayerBullet::new(
            id,
            self.nose(),
            config.sprites.player_bullet,
            config.player_bullet_speed,
        ))
    }

    /// Passive heat decay for `dt` seconds
    pub fn cool_down(&mut self, dt: f32, tuning: &PlayerConfig) {
        self.heat -= tuning.cooldown_rate * dt * tuning.decay_scale;
        self.heat = self.heat.clamp(0.0, tuning.max_heat);
    }

    /// Lose a life; returns true when none remain
    pub fn take_hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}

impl Entity for Player {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.cool_down(ctx.dt, &ctx.config.player);
        self.rect.clamp_within(&ctx.screen());
    }
}
