//! Session loop
//!
//! Drives a `GameController` one tick per frame, forwards sound cues to the
//! audio collaborator and reports a summary when the session ends.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::audio::{AudioSink, Cue};
use crate::consts::TARGET_FPS;
use crate::input::InputSource;
use crate::sim::{GameController, GameEvent, GamePhase, TickInput, tick};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pacing {
    /// Sleep to hold the target frame rate and measure wall-clock `dt`
    RealTime,
    /// Run as fast as possible with a constant `dt` (seconds)
    Fixed(f32),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub pacing: Pacing,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Press the start control whenever the intro screen is showing
    pub autostart: bool,
    pub exit_on_game_over: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            pacing: Pacing::RealTime,
            max_ticks: None,
            autostart: true,
            exit_on_game_over: true,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub input: String,
    pub ticks: u64,
    pub final_score: u32,
    pub final_lives: u8,
    pub final_phase: GamePhase,
    pub shots_fired: u32,
    pub enemies_destroyed: u32,
    pub bombers_destroyed: u32,
    pub elapsed_secs: f64,
}

/// Seconds to simulate for this frame
fn frame_dt(pacing: Pacing, first: bool, frame: Duration, since_last: Duration) -> f32 {
    match pacing {
        Pacing::Fixed(dt) => dt,
        Pacing::RealTime if first => frame.as_secs_f32(),
        Pacing::RealTime => since_last.as_secs_f32(),
    }
}

/// Run until quit, tick limit or (optionally) game over.
///
/// `ui` supplies the frame's discrete UI events and may also feed the input
/// source. The input source is closed on every exit path.
pub fn run_session<I, F>(
    game: &mut GameController,
    input: &mut I,
    audio: &mut dyn AudioSink,
    options: &SessionOptions,
    mut ui: F,
) -> RunSummary
where
    I: InputSource,
    F: FnMut(&GameController, &mut I) -> TickInput,
{
    let frame = Duration::from_secs_f64(1.0 / TARGET_FPS as f64);
    let started = Instant::now();
    let mut last_tick = started;
    let mut ticks = 0u64;
    let mut looping: HashSet<Cue> = HashSet::new();
    let mut summary = RunSummary {
        seed: game.seed,
        input: input.name().to_string(),
        ticks: 0,
        final_score: 0,
        final_lives: 0,
        final_phase: game.phase,
        shots_fired: 0,
        enemies_destroyed: 0,
        bombers_destroyed: 0,
        elapsed_secs: 0.0,
    };

    log::info!("Session started (seed {}, input {})", game.seed, input.name());

    loop {
        let frame_start = Instant::now();

        let mut events = ui(game, input);
        if options.autostart && game.phase == GamePhase::Intro && events.pointer_down.is_none() {
            events.pointer_down = Some(game.config.play_button_rect().center());
        }

        let dt = frame_dt(
            options.pacing,
            ticks == 0,
            frame,
            frame_start.duration_since(last_tick),
        );
        last_tick = frame_start;

        tick(game, &events, input, dt);
        ticks += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::Play(cue) => {
                    if cue.is_looping() {
                        looping.insert(cue);
                    }
                    if cue == Cue::Gun {
                        summary.shots_fired += 1;
                    }
                    audio.play(cue);
                }
                GameEvent::Stop(cue) => {
                    looping.remove(&cue);
                    audio.stop(cue);
                }
                GameEvent::EnemyDestroyed { bomber: true, .. } => summary.bombers_destroyed += 1,
                GameEvent::EnemyDestroyed { .. } => summary.enemies_destroyed += 1,
                GameEvent::PhaseChanged(_) | GameEvent::PlayerHit { .. } => {}
            }
        }

        if game.should_quit() {
            log::info!("Quit requested");
            break;
        }
        if options.max_ticks.is_some_and(|max| ticks >= max) {
            log::info!("Tick limit reached");
            break;
        }
        if options.exit_on_game_over && game.phase == GamePhase::GameOver {
            break;
        }

        if options.pacing == Pacing::RealTime {
            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                std::thread::sleep(frame - elapsed);
            }
        }
    }

    for cue in looping {
        audio.stop(cue);
    }
    input.close();

    summary.ticks = ticks;
    summary.final_score = game.score;
    summary.final_lives = game.player().map(|p| p.lives).unwrap_or(0);
    summary.final_phase = game.phase;
    summary.elapsed_secs = started.elapsed().as_secs_f64();
    log::info!(
        "Session ended after {} ticks with score {}",
        summary.ticks,
        summary.final_score
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::{Command, Key, KeyboardSource, Telemetry};

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<Cue>,
        stopped: Vec<Cue>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: Cue) {
            self.played.push(cue);
        }

        fn stop(&mut self, cue: Cue) {
            self.stopped.push(cue);
        }
    }

    #[derive(Default)]
    struct Trigger {
        closed: bool,
    }

    impl InputSource for Trigger {
        fn poll_command(&mut self) -> Command {
            Command::new(0, 0, true)
        }

        fn send_telemetry(&mut self, _telemetry: Telemetry) {}

        fn close(&mut self) {
            self.closed = true;
        }

        fn name(&self) -> &'static str {
            "trigger"
        }
    }

    fn fixed(max_ticks: u64) -> SessionOptions {
        SessionOptions {
            pacing: Pacing::Fixed(1.0 / 60.0),
            max_ticks: Some(max_ticks),
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_limit_stops_and_closes_input() {
        let mut game = GameController::new(GameConfig::default(), 7);
        let mut input = Trigger::default();
        let mut audio = RecordingAudio::default();

        let summary = run_session(&mut game, &mut input, &mut audio, &fixed(30), |_, _| {
            TickInput::default()
        });

        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.input, "trigger");
        assert!(input.closed);
        assert!(summary.shots_fired >= 1);
        assert_eq!(audio.played.first(), Some(&Cue::Engine));
        assert_eq!(audio.stopped, vec![Cue::Engine], "engine stopped on teardown");
    }

    #[test]
    fn test_quit_event_ends_session() {
        let mut game = GameController::new(GameConfig::default(), 7);
        let mut keys = KeyboardSource::new();
        let mut audio = RecordingAudio::default();
        let mut frames = 0;

        let summary = run_session(&mut game, &mut keys, &mut audio, &fixed(1_000), |_, _| {
            frames += 1;
            TickInput {
                quit: frames == 5,
                ..Default::default()
            }
        });
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.final_phase, GamePhase::Playing);
    }

    #[test]
    fn test_exit_on_game_over() {
        let mut config = GameConfig::default();
        config.player.lives = 1;
        let mut game = GameController::new(config, 7);
        game.start_game();
        game.player_hit();
        assert_eq!(game.phase, GamePhase::GameOver);

        let options = SessionOptions {
            autostart: false,
            ..fixed(100)
        };
        let summary = run_session(
            &mut game,
            &mut KeyboardSource::new(),
            &mut RecordingAudio::default(),
            &options,
            |_, _| TickInput::default(),
        );
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.final_phase, GamePhase::GameOver);
        assert_eq!(summary.final_lives, 0);
    }

    #[test]
    fn test_real_time_uses_full_measured_gap() {
        let frame = Duration::from_millis(16);
        assert_eq!(frame_dt(Pacing::RealTime, true, frame, Duration::ZERO), frame.as_secs_f32());
        // A long stall is passed through so heat decays by the real elapsed time
        let stall = frame_dt(Pacing::RealTime, false, frame, Duration::from_millis(1500));
        assert!((stall - 1.5).abs() < 1e-6);
        assert_eq!(frame_dt(Pacing::Fixed(0.02), false, frame, Duration::from_secs(3)), 0.02);
    }

    #[test]
    fn test_ui_can_feed_keyboard_source() {
        let mut game = GameController::new(GameConfig::default(), 7);
        let mut keys = KeyboardSource::new();
        let mut audio = RecordingAudio::default();
        let summary = run_session(&mut game, &mut keys, &mut audio, &fixed(5), |_, keys| {
            keys.press(Key::Fire);
            TickInput::default()
        });
        assert!(summary.shots_fired >= 1);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut game = GameController::new(GameConfig::default(), 99);
        let summary = run_session(
            &mut game,
            &mut KeyboardSource::new(),
            &mut RecordingAudio::default(),
            &fixed(3),
            |_, _| TickInput::default(),
        );
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seed"], 99);
        assert_eq!(json["final_phase"], "Playing");
        assert_eq!(json["final_lives"], 3);
    }
}
