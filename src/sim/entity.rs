//! Common entity behavior
//!
//! Every simulated object has bounds, a liveness flag and a per-tick update.
//! Updates never touch the registry directly; anything they spawn is queued
//! on the `TickContext` and collected by the controller afterwards.

use glam::Vec2;

use super::projectile::EnemyBullet;
use super::rect::Rect;
use crate::config::GameConfig;

/// Read-only tick data plus an outbox for spawned enemy shots
pub struct TickContext<'a> {
    pub config: &'a GameConfig,
    /// Simulation clock in milliseconds
    pub now_ms: u64,
    /// Seconds since the previous tick
    pub dt: f32,
    /// Center of the live player, if any
    pub target: Option<Vec2>,
    pub enemy_shots: Vec<EnemyBullet>,
}

impl<'a> TickContext<'a> {
    pub fn new(config: &'a GameConfig, now_ms: u64, dt: f32, target: Option<Vec2>) -> Self {
        Self {
            config,
            now_ms,
            dt,
            target,
            enemy_shots: Vec::new(),
        }
    }

    pub fn screen(&self) -> Rect {
        self.config.screen_rect()
    }
}

pub trait Entity {
    fn rect(&self) -> Rect;

    fn is_alive(&self) -> bool;

    fn kill(&mut self);

    /// Advance one simulation tick
    fn update(&mut self, ctx: &mut TickContext<'_>);

    fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Radius used by the circular overlap test
    fn collision_radius(&self) -> f32 {
        self.rect().bounding_radius()
    }
}
