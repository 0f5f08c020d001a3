//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Sim clock advanced only by the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order, which is entity ID order)
//! - No rendering, audio or device dependencies

pub mod collision;
pub mod effects;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod registry;
pub mod state;
pub mod tick;

pub use collision::{EnemyHit, circles_overlap, resolve_bullet_hits, resolve_player_contacts};
pub use effects::Explosion;
pub use enemy::{Enemy, EnemyKind, Hittable, Movement};
pub use entity::{Entity, TickContext};
pub use player::Player;
pub use projectile::{EnemyBullet, PlayerBullet};
pub use rect::Rect;
pub use registry::EntityRegistry;
pub use state::{GameController, GameEvent, GamePhase};
pub use tick::{TickInput, tick};
