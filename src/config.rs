//! Game configuration
//!
//! Built once at startup and moved into the controller; entities and the
//! serial input source borrow it. Loaded from JSON; missing fields take
//! defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Rect;

/// Player tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Pixels moved per tick per unit of command
    pub speed: f32,
    pub lives: u8,
    pub max_heat: f32,
    pub heat_per_shot: f32,
    /// Heat shed per second before `decay_scale` is applied
    pub cooldown_rate: f32,
    pub decay_scale: f32,
    /// Spawn point (sprite center)
    pub spawn: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: PLAYER_SPEED,
            lives: PLAYER_LIVES,
            max_heat: MAX_HEAT,
            heat_per_shot: HEAT_PER_SHOT,
            cooldown_rate: HEAT_COOLDOWN_RATE,
            decay_scale: HEAT_DECAY_SCALE,
            spawn: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 60.0),
        }
    }
}

/// Standard enemy tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub cooldown_min_ms: u64,
    pub cooldown_max_ms: u64,
    pub straight_speed: f32,
    /// Both horizontal (sign picked at spawn) and vertical speed
    pub diagonal_speed: f32,
    pub curve_speed: f32,
    pub curve_angle_step_deg: f32,
    pub curve_amplitude: f32,
    pub score: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            cooldown_min_ms: ENEMY_COOLDOWN_MIN_MS,
            cooldown_max_ms: ENEMY_COOLDOWN_MAX_MS,
            straight_speed: STRAIGHT_SPEED,
            diagonal_speed: DIAGONAL_SPEED,
            curve_speed: CURVE_SPEED,
            curve_angle_step_deg: CURVE_ANGLE_STEP_DEG,
            curve_amplitude: CURVE_AMPLITUDE,
            score: ENEMY_SCORE,
        }
    }
}

/// Bomber tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BomberConfig {
    pub speed: f32,
    pub health: u8,
    pub cooldown_ms: u64,
    pub ring_size: u32,
    pub score: u32,
}

impl Default for BomberConfig {
    fn default() -> Self {
        Self {
            speed: BOMBER_SPEED,
            health: BOMBER_HEALTH,
            cooldown_ms: BOMBER_COOLDOWN_MS,
            ring_size: BOMBER_RING_SIZE,
            score: BOMBER_SCORE,
        }
    }
}

/// Spawn timer intervals in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub enemy_interval: f32,
    pub bomber_interval: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enemy_interval: ENEMY_SPAWN_INTERVAL,
            bomber_interval: BOMBER_SPAWN_INTERVAL,
        }
    }
}

/// Sprite extents supplied by the asset collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub player: Vec2,
    pub enemy: Vec2,
    pub bomber: Vec2,
    pub player_bullet: Vec2,
    pub enemy_bullet: Vec2,
    pub explosion: Vec2,
    pub explosion_frames: u32,
    pub explosion_frame_ms: u64,
    pub play_button: Vec2,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            player: Vec2::new(64.0, 64.0),
            enemy: Vec2::new(64.0, 64.0),
            bomber: Vec2::new(128.0, 96.0),
            player_bullet: Vec2::new(8.0, 20.0),
            enemy_bullet: Vec2::new(10.0, 10.0),
            explosion: Vec2::new(75.0, 75.0),
            explosion_frames: EXPLOSION_FRAMES,
            explosion_frame_ms: EXPLOSION_FRAME_MS,
            play_button: Vec2::new(200.0, 80.0),
        }
    }
}

/// Serial joystick mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Axis readings below this map to -1
    pub joy_low: i32,
    /// Axis readings above this map to +1
    pub joy_high: i32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            joy_low: JOY_LOW,
            joy_high: JOY_HIGH,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bomber: BomberConfig,
    pub spawn: SpawnConfig,
    pub sprites: SpriteConfig,
    pub serial: SerialConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            bomber: BomberConfig::default(),
            spawn: SpawnConfig::default(),
            sprites: SpriteConfig::default(),
            serial: SerialConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check the constraints the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.player.max_heat <= 0.0 {
            return Err(ConfigError::Invalid("player.max_heat must be positive".into()));
        }
        if self.player.heat_per_shot < 0.0 || self.player.heat_per_shot > self.player.max_heat {
            return Err(ConfigError::Invalid(format!(
                "player.heat_per_shot must be within 0..={}",
                self.player.max_heat
            )));
        }
        if self.player.lives == 0 {
            return Err(ConfigError::Invalid("player.lives must be at least 1".into()));
        }
        if self.spawn.enemy_interval <= 0.0 || self.spawn.bomber_interval <= 0.0 {
            return Err(ConfigError::Invalid("spawn intervals must be positive".into()));
        }
        if self.enemy.cooldown_min_ms > self.enemy.cooldown_max_ms {
            return Err(ConfigError::Invalid(format!(
                "enemy cooldown range is inverted: {}..={}",
                self.enemy.cooldown_min_ms, self.enemy.cooldown_max_ms
            )));
        }
        if self.serial.joy_low > self.serial.joy_high {
            return Err(ConfigError::Invalid("serial.joy_low exceeds serial.joy_high".into()));
        }
        if self.sprites.explosion_frames == 0 {
            return Err(ConfigError::Invalid("sprites.explosion_frames must be at least 1".into()));
        }
        Ok(())
    }

    /// The whole screen as a rectangle anchored at the origin
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen_width, self.screen_height)
    }

    /// Start control on the intro screen
    pub fn play_button_rect(&self) -> Rect {
        Rect::from_center(
            Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0 + 170.0),
            self.sprites.play_button,
        )
    }
}
