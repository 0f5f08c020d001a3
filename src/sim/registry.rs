//! Entity registry
//!
//! Owns every live entity, partitioned into the logical sets used by the
//! update and collision passes. Entities are stored in spawn order, which is
//! also id order, so iteration is deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::Explosion;
use super::enemy::Enemy;
use super::entity::{Entity, TickContext};
use super::player::Player;
use super::projectile::{EnemyBullet, PlayerBullet};
use crate::config::GameConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// The player slot; enemies aim at whatever occupies it
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub explosions: Vec<Explosion>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Drop every entity from every set
    pub fn clear(&mut self) {
        self.player = None;
        self.enemies.clear();
        self.player_bullets.clear();
        self.enemy_bullets.clear();
        self.explosions.clear();
    }

    pub fn spawn_player(&mut self, config: &GameConfig) {
        self.player = Some(Player::new(config));
    }

    /// Live player, if any
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref().filter(|p| p.is_alive())
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut().filter(|p| p.is_alive())
    }

    /// Resolve the aim target for enemy fire
    pub fn player_target(&self) -> Option<Vec2> {
        self.player().map(|p| p.center())
    }

    pub fn remove_player(&mut self) {
        self.player = None;
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_player_bullet(&mut self, bullet: PlayerBullet) {
        self.player_bullets.push(bullet);
    }

    /// Take ownership of bullets fired during an update, assigning IDs
    pub fn adopt_enemy_shots(&mut self, shots: Vec<EnemyBullet>) {
        for mut shot in shots {
            shot.id = self.next_entity_id();
            self.enemy_bullets.push(shot);
        }
    }

    pub fn spawn_explosion(&mut self, center: Vec2, config: &GameConfig, now_ms: u64) {
        let id = self.next_entity_id();
        let sprites = &config.sprites;
        self.explosions.push(Explosion::new(
            id,
            center,
            sprites.explosion,
            sprites.explosion_frames,
            sprites.explosion_frame_ms,
            now_ms,
        ));
    }

    pub fn bomber_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.is_alive() && e.is_bomber())
    }

    /// Advance bullets, enemies and explosions by one tick
    ///
    /// Shots fired by enemies join the enemy bullets before those move, so a
    /// new shot travels on the tick it is fired.
    pub fn update_all(&mut self, ctx: &mut TickContext<'_>) {
        for bullet in &mut self.player_bullets {
            bullet.update(ctx);
        }
        for enemy in &mut self.enemies {
            enemy.update(ctx);
        }
        let shots = std::mem::take(&mut ctx.enemy_shots);
        self.adopt_enemy_shots(shots);
        for bullet in &mut self.enemy_bullets {
            bullet.update(ctx);
        }
        for explosion in &mut self.explosions {
            explosion.update(ctx);
        }
        self.purge_dead();
    }

    /// Remove dead entities from every set
    pub fn purge_dead(&mut self) {
        self.enemies.retain(|e| e.is_alive());
        self.player_bullets.retain(|e| e.is_alive());
        self.enemy_bullets.retain(|e| e.is_alive());
        self.explosions.retain(|e| e.is_alive());
        if self.player.as_ref().is_some_and(|p| !p.is_alive()) {
            self.player = None;
        }
    }

    /// Total live entities across all sets
    pub fn len(&self) -> usize {
        self.player.iter().count()
            + self.enemies.len()
            + self.player_bullets.len()
            + self.enemy_bullets.len()
            + self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut registry = EntityRegistry::new();
        let a = registry.next_entity_id();
        let b = registry.next_entity_id();
        assert!(b > a);
        assert_ne!(a, 0);
    }

    #[test]
    fn test_dead_entities_are_purged() {
        let config = GameConfig::default();
        let mut registry = EntityRegistry::new();
        registry.spawn_player(&config);
        let id = registry.next_entity_id();
        registry.add_enemy(Enemy::bomber(id, 400.0, 100.0, &config, 0));
        assert!(registry.bomber_alive());

        registry.enemies[0].alive = false;
        registry.player.as_mut().unwrap().alive = false;
        assert!(!registry.bomber_alive());
        assert!(registry.player_target().is_none());

        registry.purge_dead();
        assert!(registry.enemies.is_empty());
        assert!(registry.player.is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_adopted_shots_get_ids() {
        let mut registry = EntityRegistry::new();
        let shots = vec![
            EnemyBullet::new(0, Vec2::ZERO, Vec2::Y, Vec2::splat(10.0), 6.0),
            EnemyBullet::new(0, Vec2::ZERO, Vec2::X, Vec2::splat(10.0), 6.0),
        ];
        registry.adopt_enemy_shots(shots);
        assert_eq!(registry.enemy_bullets.len(), 2);
        assert_ne!(registry.enemy_bullets[0].id, registry.enemy_bullets[1].id);
    }

    #[test]
    fn test_new_enemy_shot_moves_on_its_first_tick() {
        let config = GameConfig::default();
        let mut registry = EntityRegistry::new();
        let id = registry.next_entity_id();
        registry.add_enemy(Enemy::standard(
            id,
            Vec2::new(100.0, 100.0),
            crate::sim::Movement::Straight,
            0,
            &config,
            0,
        ));

        // Player straight below the enemy's center after its 3 px step
        let mut ctx = TickContext::new(&config, 10, 1.0 / 60.0, Some(Vec2::new(132.0, 400.0)));
        registry.update_all(&mut ctx);

        assert!(ctx.enemy_shots.is_empty());
        assert_eq!(registry.enemy_bullets.len(), 1);
        let shot = &registry.enemy_bullets[0];
        assert_ne!(shot.id, 0);
        assert!((shot.pos - Vec2::new(132.0, 141.0)).length() < 1e-4);
    }

    #[test]
    fn test_clear_empties_every_set() {
        let config = GameConfig::default();
        let mut registry = EntityRegistry::new();
        registry.spawn_player(&config);
        registry.spawn_explosion(Vec2::new(10.0, 10.0), &config, 0);
        registry.clear();
        assert!(registry.is_empty());
    }
}
