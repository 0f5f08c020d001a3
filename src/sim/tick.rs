//! Per-tick simulation
//!
//! One tick per rendered frame. `dt` is the measured wall-clock time since the
//! previous tick; it drives the sim clock and the player's heat decay. Every
//! other timer compares the sim clock against a stored timestamp.

use glam::Vec2;

use super::collision::{resolve_bullet_hits, resolve_player_contacts};
use super::enemy::Enemy;
use super::entity::{Entity, TickContext};
use super::state::{GameController, GameEvent, GamePhase};
use crate::audio::Cue;
use crate::input::{InputSource, Telemetry};

/// Discrete UI events delivered by the render/event collaborator this tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window closed or quit requested
    pub quit: bool,
    /// Primary pointer press position, if any
    pub pointer_down: Option<Vec2>,
    /// Confirm key (Enter)
    pub confirm: bool,
}

impl TickInput {
    /// A click at `pos`
    pub fn click(pos: Vec2) -> Self {
        Self {
            pointer_down: Some(pos),
            ..Default::default()
        }
    }
}

/// Advance the game by one tick
pub fn tick(game: &mut GameController, ui: &TickInput, input: &mut dyn InputSource, dt: f32) {
    if ui.quit {
        game.request_quit();
        return;
    }

    match game.phase {
        GamePhase::Intro => {
            // Commands are only consumed while playing
            input.discard_pending();
            let button = game.config.play_button_rect();
            if ui.pointer_down.is_some_and(|pos| button.contains_point(pos)) {
                game.start_game();
            }
        }
        GamePhase::Playing => play_tick(game, input, dt),
        GamePhase::GameOver => {
            input.discard_pending();
            if ui.confirm || ui.pointer_down.is_some() {
                game.return_to_intro();
            }
        }
    }
}

fn play_tick(game: &mut GameController, input: &mut dyn InputSource, dt: f32) {
    let dt = dt.max(0.0);
    game.clock += dt as f64;
    game.time_ticks += 1;
    let now_ms = game.now_ms();

    // 1. Player command
    let command = input.poll_command();
    let screen = game.config.screen_rect();
    let bullet_id = game.registry.next_entity_id();
    let mut fired = false;
    if let Some(player) = game.registry.player.as_mut().filter(|p| p.is_alive()) {
        player.move_by(command.dx, command.dy, game.config.player.speed, &screen);
        if command.shoot {
            if let Some(bullet) = player.try_fire(bullet_id, &game.config) {
                game.registry.player_bullets.push(bullet);
                fired = true;
            }
        }
    }
    if fired {
        game.emit(GameEvent::Play(Cue::Gun));
    }

    // 2-3. Heat decay, then every other entity
    let target = game.registry.player_target();
    let mut ctx = TickContext::new(&game.config, now_ms, dt, target);
    if let Some(player) = game.registry.player.as_mut() {
        player.update(&mut ctx);
    }
    game.registry.update_all(&mut ctx);

    // 4. Spawn timers
    spawn_enemies(game, dt, now_ms);

    // 5. Collisions
    resolve_collisions(game, now_ms);

    // 6. Telemetry
    if game.phase == GamePhase::Playing {
        if let Some(player) = game.player() {
            input.send_telemetry(Telemetry::new(player.heat, player.lives));
        }
    }
}

fn spawn_enemies(game: &mut GameController, dt: f32, now_ms: u64) {
    game.enemy_spawn_accumulator += dt;
    if game.enemy_spawn_accumulator >= game.config.spawn.enemy_interval {
        game.enemy_spawn_accumulator -= game.config.spawn.enemy_interval;
        let id = game.registry.next_entity_id();
        let enemy = Enemy::spawn_standard(id, &mut game.rng, &game.config, now_ms);
        game.registry.add_enemy(enemy);
    }

    game.bomber_spawn_accumulator += dt;
    if game.bomber_spawn_accumulator >= game.config.spawn.bomber_interval {
        game.bomber_spawn_accumulator -= game.config.spawn.bomber_interval;
        if game.registry.bomber_alive() {
            log::debug!("Bomber timer elapsed while one is still alive");
        } else {
            let id = game.registry.next_entity_id();
            let bomber = Enemy::spawn_bomber(id, &mut game.rng, &game.config, now_ms);
            log::info!("Bomber {} inbound at x={:.0}", id, bomber.center().x);
            game.registry.add_enemy(bomber);
        }
    }
}

fn resolve_collisions(game: &mut GameController, now_ms: u64) {
    for hit in resolve_bullet_hits(&mut game.registry) {
        game.registry.spawn_explosion(hit.point, &game.config, now_ms);
        if hit.destroyed {
            game.score += hit.score;
            let cue = if hit.bomber {
                Cue::BigExplosion
            } else {
                Cue::Explosion
            };
            game.emit(GameEvent::Play(cue));
            game.emit(GameEvent::EnemyDestroyed {
                id: hit.enemy_id,
                bomber: hit.bomber,
                score: hit.score,
            });
        }
    }
    game.registry.purge_dead();

    let contact = resolve_player_contacts(&mut game.registry);
    game.registry.purge_dead();
    if contact {
        game.player_hit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{Command, KeyboardSource};
    use crate::sim::enemy::Movement;
    use crate::sim::projectile::EnemyBullet;

    const DT: f32 = 1.0 / 60.0;

    /// Replays a fixed command every poll and records telemetry
    #[derive(Default)]
    struct Scripted {
        command: Command,
        telemetry: Vec<Telemetry>,
    }

    impl InputSource for Scripted {
        fn poll_command(&mut self) -> Command {
            self.command
        }

        fn send_telemetry(&mut self, telemetry: Telemetry) {
            self.telemetry.push(telemetry);
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn playing_game() -> GameController {
        let mut game = GameController::new(GameConfig::default(), 12345);
        let start = game.config.play_button_rect().center();
        tick(&mut game, &TickInput::click(start), &mut KeyboardSource::new(), DT);
        assert_eq!(game.phase, GamePhase::Playing);
        game.drain_events();
        game
    }

    #[test]
    fn test_click_outside_button_stays_in_intro() {
        let mut game = GameController::new(GameConfig::default(), 1);
        tick(&mut game, &TickInput::click(Vec2::new(5.0, 5.0)), &mut KeyboardSource::new(), DT);
        assert_eq!(game.phase, GamePhase::Intro);
        tick(&mut game, &TickInput::default(), &mut KeyboardSource::new(), DT);
        assert_eq!(game.phase, GamePhase::Intro);
    }

    #[test]
    fn test_game_over_returns_to_intro_on_confirm() {
        let mut game = playing_game();
        game.end_game();
        let mut keys = KeyboardSource::new();
        tick(&mut game, &TickInput::default(), &mut keys, DT);
        assert_eq!(game.phase, GamePhase::GameOver);
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut game, &confirm, &mut keys, DT);
        assert_eq!(game.phase, GamePhase::Intro);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut game = playing_game();
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut game, &quit, &mut KeyboardSource::new(), DT);
        assert!(game.should_quit());
    }

    #[test]
    fn test_shoot_command_fires_and_heats() {
        let mut game = playing_game();
        let mut input = Scripted {
            command: Command::new(0, 0, true),
            ..Default::default()
        };
        tick(&mut game, &TickInput::default(), &mut input, DT);

        assert_eq!(game.registry.player_bullets.len(), 1);
        let heat = game.player().unwrap().heat;
        // 13 added, then 2.5 * dt * 10 shed
        assert!((heat - (13.0 - 2.5 * DT * 10.0)).abs() < 1e-3);
        assert!(game.drain_events().contains(&GameEvent::Play(Cue::Gun)));
        assert_eq!(input.telemetry.len(), 1);
        assert_eq!(input.telemetry[0].lives, 3);
    }

    #[test]
    fn test_movement_command_moves_player() {
        let mut game = playing_game();
        let before = game.player().unwrap().rect.center();
        let mut input = Scripted {
            command: Command::new(-1, -1, false),
            ..Default::default()
        };
        tick(&mut game, &TickInput::default(), &mut input, DT);
        let after = game.player().unwrap().rect.center();
        assert_eq!(after, before + Vec2::new(-50.0, -50.0));
    }

    #[test]
    fn test_enemy_spawns_every_interval() {
        let mut game = playing_game();
        let mut keys = KeyboardSource::new();
        // 1.1 s at 10 Hz -> one spawn on the 11th tick
        for _ in 0..10 {
            tick(&mut game, &TickInput::default(), &mut keys, 0.1);
        }
        assert_eq!(game.registry.enemies.len(), 0);
        tick(&mut game, &TickInput::default(), &mut keys, 0.1001);
        assert_eq!(game.registry.enemies.len(), 1);
        assert!(!game.registry.enemies[0].is_bomber());
    }

    #[test]
    fn test_bomber_never_doubles_up() {
        let mut config = GameConfig::default();
        config.spawn.bomber_interval = 0.5;
        config.spawn.enemy_interval = 1000.0;
        config.player.lives = 255;
        let mut game = GameController::new(config, 3);
        game.start_game();
        let mut keys = KeyboardSource::new();

        for _ in 0..200 {
            tick(&mut game, &TickInput::default(), &mut keys, 0.25);
            let bombers = game.registry.enemies.iter().filter(|e| e.is_bomber()).count();
            assert!(bombers <= 1);
        }
    }

    #[test]
    fn test_enemy_destroyed_awards_points() {
        let mut game = playing_game();
        let id = game.registry.next_entity_id();
        let enemy = Enemy::standard(id, Vec2::new(100.0, 100.0), Movement::Straight, 99_999, &game.config, 0);
        game.registry.add_enemy(enemy);
        let id = game.registry.next_entity_id();
        let mut bullet = crate::sim::PlayerBullet::new(id, Vec2::ZERO, Vec2::new(8.0, 20.0), 10.0);
        // After this tick's update: enemy top at 103, bullet moved up by 10
        bullet.rect.set_center(Vec2::new(130.0, 150.0));
        game.registry.add_player_bullet(bullet);

        tick(&mut game, &TickInput::default(), &mut KeyboardSource::new(), DT);
        assert_eq!(game.score, 10);
        assert!(game.registry.enemies.is_empty());
        assert!(game.registry.player_bullets.is_empty());
        assert_eq!(game.registry.explosions.len(), 1);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Play(Cue::Explosion)));
    }

    #[test]
    fn test_simultaneous_bullets_cost_one_life() {
        let mut game = playing_game();
        game.registry.player_mut().unwrap().lives = 1;
        let center = game.registry.player_target().unwrap();
        for dx in [-8.0, 0.0, 8.0] {
            let id = game.registry.next_entity_id();
            // Stationary so the overlap survives this tick's update
            game.registry.enemy_bullets.push(EnemyBullet::new(
                id,
                center + Vec2::new(dx, 0.0),
                Vec2::Y,
                Vec2::splat(10.0),
                0.0,
            ));
        }
        let mut input = Scripted::default();
        tick(&mut game, &TickInput::default(), &mut input, DT);

        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(game.registry.enemy_bullets.is_empty());
        assert!(game.player().is_none());
        assert!(input.telemetry.is_empty(), "no telemetry once the player is gone");
    }

    #[test]
    fn test_contact_with_three_lives_costs_exactly_one() {
        let mut game = playing_game();
        let center = game.registry.player_target().unwrap();
        for _ in 0..3 {
            let id = game.registry.next_entity_id();
            game.registry.enemy_bullets.push(EnemyBullet::new(id, center, Vec2::Y, Vec2::splat(10.0), 0.0));
        }
        tick(&mut game, &TickInput::default(), &mut KeyboardSource::new(), DT);
        assert_eq!(game.player().unwrap().lives, 2);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut game = GameController::new(GameConfig::default(), seed);
            game.start_game();
            let mut input = Scripted {
                command: Command::new(1, 0, true),
                ..Default::default()
            };
            for _ in 0..600 {
                tick(&mut game, &TickInput::default(), &mut input, DT);
            }
            (
                game.score,
                game.phase,
                game.registry.enemies.iter().map(|e| e.pos).collect::<Vec<_>>(),
            )
        };
        assert_eq!(run(42), run(42));
    }
}
