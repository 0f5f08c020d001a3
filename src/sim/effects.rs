//! Explosion effect
//!
//! Purely cosmetic: steps through its animation frames on the sim clock and
//! removes itself after the last one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, TickContext};
use super::rect::Rect;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    /// Frame index for the renderer
    pub frame: u32,
    pub frame_count: u32,
    pub frame_ms: u64,
    pub last_frame_ms: u64,
    pub alive: bool,
}

impl Explosion {
    pub fn new(id: u32, center: Vec2, size: Vec2, frame_count: u32, frame_ms: u64, now_ms: u64) -> Self {
        Self {
            id,
            rect: Rect::from_center(center, size),
            frame: 0,
            frame_count,
            frame_ms,
            last_frame_ms: now_ms,
            alive: true,
        }
    }
}

impl Entity for Explosion {
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
        if ctx.now_ms.saturating_sub(self.last_frame_ms) > self.frame_ms {
            self.last_frame_ms = ctx.now_ms;
            self.frame += 1;
            if self.frame >= self.frame_count {
                self.alive = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_explosion_runs_out_of_frames() {
        let config = GameConfig::default();
        let mut boom = Explosion::new(1, Vec2::new(50.0, 50.0), Vec2::splat(75.0), 3, 40, 0);

        let mut now = 0;
        let mut ticks = 0;
        while boom.alive {
            now += 17;
            ticks += 1;
            let mut ctx = TickContext::new(&config, now, 0.017, None);
            boom.update(&mut ctx);
            assert!(ticks < 100);
        }
        assert_eq!(boom.frame, 3);
        // 3 frame steps, each needs > 40 ms of clock (three 17 ms ticks)
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_explosion_holds_frame_between_steps() {
        let config = GameConfig::default();
        let mut boom = Explosion::new(1, Vec2::ZERO, Vec2::splat(75.0), 9, 40, 1000);
        let mut ctx = TickContext::new(&config, 1040, 0.04, None);
        boom.update(&mut ctx);
        assert_eq!(boom.frame, 0);
        let mut ctx = TickContext::new(&config, 1041, 0.001, None);
        boom.update(&mut ctx);
        assert_eq!(boom.frame, 1);
    }
}
