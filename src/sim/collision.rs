//! Collision detection and resolution
//!
//! Two independent passes per tick:
//! - player bullets against enemies (axis-aligned box test)
//! - enemies and enemy bullets against the player (circle test)
//!
//! Both passes only flip liveness flags; the caller purges and scores.

use glam::Vec2;

use super::enemy::Hittable;
use super::entity::Entity;
use super::registry::EntityRegistry;

/// Outcome of bullets striking one enemy in a tick
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyHit {
    pub enemy_id: u32,
    /// Center of the first bullet that struck
    pub point: Vec2,
    /// Bullets consumed by this enemy
    pub bullets: u32,
    pub destroyed: bool,
    pub bomber: bool,
    /// Points earned (zero unless destroyed)
    pub score: u32,
}

/// Circle overlap using each entity's collision radius
pub fn circles_overlap(a: &impl Entity, b: &impl Entity) -> bool {
    let reach = a.collision_radius() + b.collision_radius();
    a.center().distance_squared(b.center()) <= reach * reach
}

/// Resolve player bullets against enemies
///
/// Every overlapping bullet is consumed. Each consumed bullet counts as one
/// hit, so a bomber can lose several health points in a single tick. A bullet
/// is consumed by the first enemy (in spawn order) it overlaps.
pub fn resolve_bullet_hits(registry: &mut EntityRegistry) -> Vec<EnemyHit> {
    let mut hits = Vec::new();

    for enemy in registry.enemies.iter_mut().filter(|e| e.is_alive()) {
        let enemy_rect = enemy.rect();
        let mut first_point = None;
        let mut consumed = 0;
        let mut destroyed = false;

        for bullet in registry.player_bullets.iter_mut().filter(|b| b.is_alive()) {
            if !bullet.rect.overlaps(&enemy_rect) {
                continue;
            }
            bullet.kill();
            consumed += 1;
            if first_point.is_none() {
                first_point = Some(bullet.rect.center());
            }
            if !destroyed && enemy.apply_hit() {
                destroyed = true;
            }
        }

        if let Some(point) = first_point {
            hits.push(EnemyHit {
                enemy_id: enemy.id,
                point,
                bullets: consumed,
                destroyed,
                bomber: enemy.is_bomber(),
                score: if destroyed { enemy.score_value() } else { 0 },
            });
        }
    }

    hits
}

/// Resolve enemies and enemy bullets touching the player
///
/// Every contacting enemy and bullet is removed. Returns true if there was at
/// least one contact; the player takes a single hit regardless of the count.
pub fn resolve_player_contacts(registry: &mut EntityRegistry) -> bool {
    let Some(player) = registry.player().cloned() else {
        return false;
    };
    let mut contact = false;

    for enemy in registry.enemies.iter_mut().filter(|e| e.is_alive()) {
        if circles_overlap(&player, &*enemy) {
            enemy.kill();
            contact = true;
        }
    }
    for bullet in registry.enemy_bullets.iter_mut().filter(|b| b.is_alive()) {
        if circles_overlap(&player, &*bullet) {
            bullet.kill();
            contact = true;
        }
    }

    contact
}
