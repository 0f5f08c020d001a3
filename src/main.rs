//! Mustang entry point
//!
//! Loads configuration, connects the joystick (falling back to the keyboard)
//! and runs a session, printing a JSON summary when it ends. Esc, `q` or
//! Ctrl-C quits; arrows or WASD steer and space fires.

use std::io::stdout;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::tty::IsTty;
use crossterm::{ExecutableCommand, terminal};

use mustang::GameConfig;
use mustang::audio::LogAudio;
use mustang::input::{InputSource, SerialSource, TerminalControls};
use mustang::runner::{Pacing, SessionOptions, run_session};
use mustang::sim::GameController;

#[derive(Parser, Debug)]
#[command(name = "mustang")]
#[command(about = "Arcade shooter session with keyboard or serial joystick control")]
struct Args {
    /// JSON tuning file (defaults are used if missing or invalid)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial joystick device, e.g. /dev/ttyACM0
    #[arg(short, long)]
    serial: Option<PathBuf>,

    /// RNG seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Step with a constant 1/60 s instead of real time
    #[arg(long)]
    fixed_step: bool,

    /// Keep running after game over (until quit or tick limit)
    #[arg(long)]
    keep_going: bool,

    /// Silence sound cue logging
    #[arg(long)]
    mute: bool,
}

fn load_config(path: Option<&PathBuf>) -> GameConfig {
    let Some(path) = path else {
        return GameConfig::default();
    };
    match GameConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default config, {} unusable: {e}", path.display());
            GameConfig::default()
        }
    }
}

fn connect_joystick(path: Option<&PathBuf>, config: &GameConfig) -> Option<Box<dyn InputSource>> {
    let path = path?;
    match SerialSource::open(path, &config.serial) {
        Ok(source) => Some(Box::new(source)),
        Err(e) => {
            log::warn!("Joystick unavailable ({e}), using keyboard");
            None
        }
    }
}

/// Raw mode (and release reporting, where supported) until dropped
struct RawTerminal {
    reports_release: bool,
}

impl RawTerminal {
    fn enable() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        let reports_release = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && stdout()
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        Ok(Self { reports_release })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if self.reports_release {
            let _ = stdout().execute(PopKeyboardEnhancementFlags);
        }
        let _ = terminal::disable_raw_mode();
    }
}

fn open_terminal() -> Option<RawTerminal> {
    if !std::io::stdin().is_tty() {
        log::warn!("stdin is not a terminal, keyboard disabled");
        return None;
    }
    match RawTerminal::enable() {
        Ok(raw) => Some(raw),
        Err(e) => {
            log::warn!("Keyboard disabled, raw mode unavailable: {e}");
            None
        }
    }
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Mustang starting...");

    let args = Args::parse();
    let config = load_config(args.config.as_ref());
    let joystick = connect_joystick(args.serial.as_ref(), &config);
    let seed = args.seed.unwrap_or_else(random_seed);

    let mut audio = LogAudio::new();
    audio.set_muted(args.mute);

    let options = SessionOptions {
        pacing: if args.fixed_step {
            Pacing::Fixed(1.0 / mustang::consts::TARGET_FPS as f32)
        } else {
            Pacing::RealTime
        },
        max_ticks: args.max_ticks,
        autostart: true,
        exit_on_game_over: !args.keep_going,
    };

    let raw = open_terminal();
    let mut controls = match &raw {
        Some(raw) => TerminalControls::spawn(joystick, raw.reports_release),
        None => TerminalControls::detached(joystick),
    };

    let mut game = GameController::new(config, seed);
    let summary = run_session(&mut game, &mut controls, &mut audio, &options, |_, controls| {
        controls.take_ui()
    });
    drop(raw);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding summary: {e}");
            std::process::exit(1);
        }
    }
}
