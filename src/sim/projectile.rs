//! Player and enemy bullets
//!
//! Straight-line movers that remove themselves once fully off screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TickContext};
use super::rect::Rect;

/// Forward shot fired from the player's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub id: u32,
    pub rect: Rect,
    /// Pixels per tick, always upward
    pub speed: f32,
    pub alive: bool,
}

impl PlayerBullet {
    /// Bullet whose bottom edge sits at `nose` (horizontally centered on it)
    pub fn new(id: u32, nose: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            rect: Rect::new(nose.x - size.x / 2.0, nose.y - size.y, size.x, size.y),
            speed,
            alive: true,
        }
    }
}

impl Entity for PlayerBullet {
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
        self.rect.y -= self.speed;
        if !self.rect.overlaps(&ctx.screen()) {
            self.alive = false;
        }
    }
}

/// Directional shot from an enemy or bomber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    /// Unit direction
    pub direction: Vec2,
    pub speed: f32,
    pub alive: bool,
}

impl EnemyBullet {
    pub fn new(id: u32, center: Vec2, direction: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos: center,
            size,
            direction,
            speed,
            alive: true,
        }
    }
}

impl Entity for EnemyBullet {
    fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        self.pos += self.direction * self.speed;
        if !self.rect().overlaps(&ctx.screen()) {
            self.alive = false;
        }
    }
}
