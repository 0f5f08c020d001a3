//! Mustang - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game controller)
//! - `input`: Keyboard, terminal and serial joystick command sources
//! - `config`: Data-driven game tuning
//! - `audio`: Sound cue collaborator
//! - `hud`: Produced HUD values for the rendering collaborator
//! - `runner`: Fixed-cadence session loop

pub mod audio;
pub mod config;
pub mod error;
pub mod hud;
pub mod input;
pub mod runner;
pub mod sim;

pub use config::GameConfig;
pub use error::{ConfigError, LineError, SerialError};

use glam::Vec2;

/// Default tuning values (mirrored by `GameConfig::default`)
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Target simulation rate (one tick per rendered frame)
    pub const TARGET_FPS: u32 = 60;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 50.0;
    pub const PLAYER_LIVES: u8 = 3;
    pub const MAX_HEAT: f32 = 100.0;
    pub const HEAT_PER_SHOT: f32 = 13.0;
    pub const HEAT_COOLDOWN_RATE: f32 = 2.5;
    /// Scale applied to the heat decay on top of `rate * dt`
    pub const HEAT_DECAY_SCALE: f32 = 10.0;

    /// Projectile speeds (pixels per tick)
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;

    /// Enemy defaults
    pub const ENEMY_COOLDOWN_MIN_MS: u64 = 1500;
    pub const ENEMY_COOLDOWN_MAX_MS: u64 = 3500;
    pub const STRAIGHT_SPEED: f32 = 3.0;
    pub const DIAGONAL_SPEED: f32 = 2.0;
    pub const CURVE_SPEED: f32 = 2.0;
    pub const CURVE_ANGLE_STEP_DEG: f32 = 2.0;
    pub const CURVE_AMPLITUDE: f32 = 3.0;

    /// Bomber defaults
    pub const BOMBER_SPEED: f32 = 1.0;
    pub const BOMBER_HEALTH: u8 = 5;
    pub const BOMBER_COOLDOWN_MS: u64 = 1200;
    pub const BOMBER_RING_SIZE: u32 = 12;

    /// Spawn intervals (seconds)
    pub const ENEMY_SPAWN_INTERVAL: f32 = 1.1;
    pub const BOMBER_SPAWN_INTERVAL: f32 = 60.0;

    /// Scoring
    pub const ENEMY_SCORE: u32 = 10;
    pub const BOMBER_SCORE: u32 = 50;

    /// Explosion animation
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_MS: u64 = 40;

    /// Serial joystick thresholds (raw ADC values)
    pub const JOY_LOW: i32 = 400;
    pub const JOY_HIGH: i32 = 600;
}

/// Unit vector from `from` toward `to`, straight down when the points coincide
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    if delta.length_squared() == 0.0 {
        Vec2::Y
    } else {
        delta.normalize()
    }
}

/// Unit vector at `degrees` clockwise from +X in screen space (y grows downward)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aim_direction_is_unit_length() {
        let dir = aim_direction(Vec2::new(10.0, 10.0), Vec2::new(40.0, 50.0));
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!((dir.x - 0.6).abs() < 1e-5);
        assert!((dir.y - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_aim_direction_defaults_down_when_coincident() {
        let p = Vec2::new(123.0, 45.0);
        assert_eq!(aim_direction(p, p), Vec2::Y);
    }

    #[test]
    fn test_direction_from_degrees_quarter_turns() {
        let right = direction_from_degrees(0.0);
        let down = direction_from_degrees(90.0);
        assert!((right - Vec2::X).length() < 1e-5);
        assert!((down - Vec2::Y).length() < 1e-5);
    }
}
