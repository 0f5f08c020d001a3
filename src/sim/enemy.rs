//! Enemy aircraft: ordinary fighters and the heavy bomber
//!
//! Both share one struct tagged by `EnemyKind`, so the collision pass can
//! treat them uniformly through `Hittable`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TickContext};
use super::projectile::EnemyBullet;
use super::rect::Rect;
use crate::config::GameConfig;
use crate::{aim_direction, direction_from_degrees};

/// Trajectory of a standard enemy, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Straight down
    Straight,
    /// Down and sideways; `sign` is -1 (left) or +1 (right)
    Diagonal { sign: f32 },
    /// Down with a sinusoidal horizontal sway
    Curve { angle_deg: f32, step_deg: f32 },
}

impl Movement {
    /// Pick one of the three patterns uniformly
    pub fn random(rng: &mut impl Rng, config: &GameConfig) -> Self {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        match rng.random_range(0..3) {
            0 => Movement::Straight,
            1 => Movement::Diagonal { sign },
            _ => Movement::Curve {
                angle_deg: 0.0,
                step_deg: sign * config.enemy.curve_angle_step_deg,
            },
        }
    }

    /// Per-tick velocity for this pattern
    pub fn velocity(&self, config: &GameConfig) -> Vec2 {
        let tuning = &config.enemy;
        match self {
            Movement::Straight => Vec2::new(0.0, tuning.straight_speed),
            Movement::Diagonal { sign } => {
                Vec2::new(sign * tuning.diagonal_speed, tuning.diagonal_speed)
            }
            Movement::Curve { .. } => Vec2::new(0.0, tuning.curve_speed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// One-hit fighter that aims at the player
    Standard { movement: Movement },
    /// Slow heavy plane with a health pool and radial fire
    Bomber { health: u8 },
}

/// Anything the player's bullets can damage
pub trait Hittable {
    /// Register one bullet hit; returns true if this hit destroyed the target
    fn apply_hit(&mut self) -> bool;

    /// Points awarded when destroyed
    fn score_value(&self) -> u32;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub kind: EnemyKind,
    pub cooldown_ms: u64,
    pub last_shot_ms: u64,
    pub score: u32,
    pub alive: bool,
}

impl Enemy {
    /// Standard enemy at `top_left` following `movement`
    pub fn standard(
        id: u32,
        top_left: Vec2,
        movement: Movement,
        cooldown_ms: u64,
        config: &GameConfig,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            pos: top_left,
            size: config.sprites.enemy,
            vel: movement.velocity(config),
            kind: EnemyKind::Standard { movement },
            cooldown_ms,
            last_shot_ms: now_ms,
            score: config.enemy.score,
            alive: true,
        }
    }

    /// Bomber centered horizontally on `center_x`, bottom edge at `bottom`
    pub fn bomber(id: u32, center_x: f32, bottom: f32, config: &GameConfig, now_ms: u64) -> Self {
        let size = config.sprites.bomber;
        Self {
            id,
            pos: Vec2::new(center_x - size.x / 2.0, bottom - size.y),
            size,
            vel: Vec2::new(0.0, config.bomber.speed),
            kind: EnemyKind::Bomber {
                health: config.bomber.health,
            },
            cooldown_ms: config.bomber.cooldown_ms,
            last_shot_ms: now_ms,
            score: config.bomber.score,
            alive: true,
        }
    }

    /// Random standard enemy just above the top edge
    pub fn spawn_standard(id: u32, rng: &mut impl Rng, config: &GameConfig, now_ms: u64) -> Self {
        let size = config.sprites.enemy;
        let max_x = (config.screen_width - size.x).max(0.0);
        let x = rng.random_range(0.0..=max_x);
        let movement = Movement::random(rng, config);
        let cooldown =
            rng.random_range(config.enemy.cooldown_min_ms..=config.enemy.cooldown_max_ms);
        Self::standard(id, Vec2::new(x, -size.y), movement, cooldown, config, now_ms)
    }

    /// Random bomber entering from the top edge
    pub fn spawn_bomber(id: u32, rng: &mut impl Rng, config: &GameConfig, now_ms: u64) -> Self {
        let half = config.sprites.bomber.x / 2.0;
        let center_x = if config.screen_width > 2.0 * half {
            rng.random_range(half..=config.screen_width - half)
        } else {
            config.screen_width / 2.0
        };
        Self::bomber(id, center_x, 0.0, config, now_ms)
    }

    pub fn is_bomber(&self) -> bool {
        matches!(self.kind, EnemyKind::Bomber { .. })
    }

    /// Remaining bomber health; standard enemies report 1
    pub fn health(&self) -> u8 {
        match self.kind {
            EnemyKind::Bomber { health } => health,
            EnemyKind::Standard { .. } => 1,
        }
    }

    fn advance(&mut self, config: &GameConfig) {
        self.pos += self.vel;
        if let EnemyKind::Standard {
            movement: Movement::Curve {
                ref mut angle_deg,
                step_deg,
            },
        } = self.kind
        {
            *angle_deg += step_deg;
            self.pos.x += angle_deg.to_radians().sin() * config.enemy.curve_amplitude;
        }
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) > self.cooldown_ms
    }

    fn try_fire(&mut self, ctx: &mut TickContext<'_>) {
        if !self.cooldown_elapsed(ctx.now_ms) {
            return;
        }
        let origin = self.center();
        let size = ctx.config.sprites.enemy_bullet;
        let speed = ctx.config.enemy_bullet_speed;

        match self.kind {
            EnemyKind::Standard { .. } => {
                let Some(target) = ctx.target else { return };
                self.last_shot_ms = ctx.now_ms;
                let dir = aim_direction(origin, target);
                ctx.enemy_shots.push(EnemyBullet::new(0, origin, dir, size, speed));
            }
            EnemyKind::Bomber { .. } => {
                self.last_shot_ms = ctx.now_ms;
                let count = ctx.config.bomber.ring_size.max(1);
                let step = 360.0 / count as f32;
                for i in 0..count {
                    let dir = direction_from_degrees(i as f32 * step);
                    ctx.enemy_shots.push(EnemyBullet::new(0, origin, dir, size, speed));
                }
            }
        }
    }
}

impl Hittable for Enemy {
    fn apply_hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        match self.kind {
            EnemyKind::Standard { .. } => {
                self.alive = false;
                true
            }
            EnemyKind::Bomber { ref mut health } => {
                *health = health.saturating_sub(1);
                if *health == 0 {
                    self.alive = false;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn score_value(&self) -> u32 {
        self.score
    }
}

impl Entity for Enemy {
    fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.advance(ctx.config);
        if self.rect().top() > ctx.config.screen_height {
            self.alive = false;
            return;
        }
        self.try_fire(ctx);
    }
}
