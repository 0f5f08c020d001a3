//! Game controller state and phase transitions
//!
//! The controller exclusively owns the entity registry, the score, the spawn
//! accumulators and the run's RNG. Only `tick` mutates it during play.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::player::Player;
use super::registry::EntityRegistry;
use crate::audio::Cue;
use crate::config::GameConfig;

/// Current phase of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start control
    Intro,
    /// Active gameplay
    Playing,
    /// Player is out of lives, waiting for confirm
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Intro => "intro",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "game_over",
        }
    }
}

/// Side effects for collaborators, drained once per tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Play(Cue),
    Stop(Cue),
    PhaseChanged(GamePhase),
    EnemyDestroyed { id: u32, bomber: bool, score: u32 },
    PlayerHit { lives_left: u8 },
}

#[derive(Debug, Clone)]
pub struct GameController {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub registry: EntityRegistry,
    /// Simulation clock (seconds since the current game started)
    pub clock: f64,
    /// Ticks simulated in the current game
    pub time_ticks: u64,
    /// Seconds since the last enemy spawn
    pub enemy_spawn_accumulator: f32,
    /// Seconds since the last bomber spawn attempt
    pub bomber_spawn_accumulator: f32,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    quit: bool,
}

impl GameController {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            phase: GamePhase::Intro,
            score: 0,
            registry: EntityRegistry::new(),
            clock: 0.0,
            time_ticks: 0,
            enemy_spawn_accumulator: 0.0,
            bomber_spawn_accumulator: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            quit: false,
        }
    }

    /// Simulation clock in whole milliseconds
    pub fn now_ms(&self) -> u64 {
        (self.clock * 1000.0) as u64
    }

    /// Live player, if any
    pub fn player(&self) -> Option<&Player> {
        self.registry.player()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.phase = phase;
            self.emit(GameEvent::PhaseChanged(phase));
        }
    }

    /// Intro -> Playing: reset all game data and spawn the player
    pub fn start_game(&mut self) {
        self.score = 0;
        self.clock = 0.0;
        self.time_ticks = 0;
        self.enemy_spawn_accumulator = 0.0;
        self.bomber_spawn_accumulator = 0.0;
        self.registry.clear();
        self.registry.spawn_player(&self.config);
        self.emit(GameEvent::Play(Cue::Engine));
        self.set_phase(GamePhase::Playing);
    }

    /// Playing -> GameOver
    pub fn end_game(&mut self) {
        self.emit(GameEvent::Stop(Cue::Engine));
        self.registry.remove_player();
        log::info!("Game over with score {}", self.score);
        self.set_phase(GamePhase::GameOver);
    }

    /// GameOver -> Intro
    pub fn return_to_intro(&mut self) {
        self.set_phase(GamePhase::Intro);
    }

    /// Apply one hit to the player; ends the game on the last life
    pub fn player_hit(&mut self) {
        let now_ms = self.now_ms();
        let Some(player) = self.registry.player_mut() else {
            return;
        };
        let out_of_lives = player.take_hit();
        let lives_left = player.lives;
        let center = player.center();

        self.emit(GameEvent::Play(Cue::Explosion));
        self.emit(GameEvent::PlayerHit { lives_left });
        self.registry.spawn_explosion(center, &self.config, now_ms);

        if out_of_lives {
            self.end_game();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_intro_with_empty_registry() {
        let game = GameController::new(GameConfig::default(), 1);
        assert_eq!(game.phase, GamePhase::Intro);
        assert!(game.registry.is_empty());
        assert!(game.player().is_none());
    }

    #[test]
    fn test_start_game_resets_data() {
        let mut game = GameController::new(GameConfig::default(), 1);
        game.score = 120;
        game.enemy_spawn_accumulator = 0.9;
        game.start_game();

        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.score, 0);
        assert_eq!(game.enemy_spawn_accumulator, 0.0);
        assert!(game.player().is_some());
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Play(Cue::Engine)));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut game = GameController::new(GameConfig::default(), 1);
        game.start_game();
        game.registry.player_mut().unwrap().lives = 1;
        game.drain_events();

        game.player_hit();
        assert_eq!(game.phase, GamePhase::GameOver);
        assert!(game.player().is_none());
        assert_eq!(game.registry.explosions.len(), 1);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Stop(Cue::Engine)));
        assert!(events.contains(&GameEvent::PlayerHit { lives_left: 0 }));
    }

    #[test]
    fn test_hit_without_player_is_ignored() {
        let mut game = GameController::new(GameConfig::default(), 1);
        game.player_hit();
        assert_eq!(game.phase, GamePhase::Intro);
        assert!(game.drain_events().is_empty());
    }
}
