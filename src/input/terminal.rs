//! Terminal key controls
//!
//! A reader thread forwards crossterm events over a channel and the game loop
//! drains it once per frame, so the loop never blocks on the terminal. Held
//! movement/fire keys feed a `KeyboardSource`; Esc, `q` and Ctrl-C become a
//! quit request and Enter a confirm.
//!
//! Terminals that report key releases drop a key as soon as it is let go.
//! Everything else only repeats presses, so there a key counts as held until
//! `HOLD_FRAMES` frames pass without seeing it.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::{Command, InputSource, Key, KeyboardSource, Telemetry};
use crate::sim::TickInput;

/// Frames a key stays held after its last press or repeat
const HOLD_FRAMES: u64 = 8;

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        _ => None,
    }
}

pub struct TerminalControls {
    events: Receiver<Event>,
    /// Steers instead of the keys when connected
    joystick: Option<Box<dyn InputSource>>,
    keys: KeyboardSource,
    last_seen: HashMap<Key, u64>,
    reports_release: bool,
    frame: u64,
    pending: TickInput,
}

impl TerminalControls {
    pub fn new(
        events: Receiver<Event>,
        joystick: Option<Box<dyn InputSource>>,
        reports_release: bool,
    ) -> Self {
        Self {
            events,
            joystick,
            keys: KeyboardSource::new(),
            last_seen: HashMap::new(),
            reports_release,
            frame: 0,
            pending: TickInput::default(),
        }
    }

    /// Start the event reader thread. Raw mode should already be enabled.
    pub fn spawn(joystick: Option<Box<dyn InputSource>>, reports_release: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break; // controls dropped
                        }
                    }
                    Err(e) => {
                        log::debug!("terminal read failed: {e}");
                        break;
                    }
                }
            }
        });
        Self::new(rx, joystick, reports_release)
    }

    /// Controls without a terminal; only the joystick (if any) steers
    pub fn detached(joystick: Option<Box<dyn InputSource>>) -> Self {
        let (_tx, rx) = mpsc::channel::<Event>();
        Self::new(rx, joystick, false)
    }

    fn handle_event(&mut self, event: &Event) {
        let Event::Key(key) = event else {
            return;
        };
        match key.kind {
            KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => self.pending.quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.pending.quit = true
                }
                KeyCode::Enter => self.pending.confirm = true,
                code => {
                    if let Some(held) = key_for(code) {
                        self.last_seen.insert(held, self.frame);
                    }
                }
            },
            KeyEventKind::Repeat => {
                if let Some(held) = key_for(key.code) {
                    self.last_seen.insert(held, self.frame);
                }
            }
            KeyEventKind::Release => {
                if let Some(held) = key_for(key.code) {
                    self.last_seen.remove(&held);
                }
            }
        }
    }

    fn refresh_held(&mut self) {
        let frame = self.frame;
        if !self.reports_release {
            self.last_seen
                .retain(|_, seen| frame.saturating_sub(*seen) < HOLD_FRAMES);
        }
        self.keys.release_all();
        for key in self.last_seen.keys() {
            self.keys.press(*key);
        }
    }

    /// Drain queued terminal events and return this frame's UI input
    pub fn take_ui(&mut self) -> TickInput {
        self.frame += 1;
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(&event);
        }
        self.refresh_held();
        std::mem::take(&mut self.pending)
    }
}

impl InputSource for TerminalControls {
    fn poll_command(&mut self) -> Command {
        match self.joystick.as_mut() {
            Some(joystick) => joystick.poll_command(),
            None => self.keys.poll_command(),
        }
    }

    fn discard_pending(&mut self) {
        if let Some(joystick) = self.joystick.as_mut() {
            joystick.discard_pending();
        }
    }

    fn send_telemetry(&mut self, telemetry: Telemetry) {
        if let Some(joystick) = self.joystick.as_mut() {
            joystick.send_telemetry(telemetry);
        }
    }

    fn close(&mut self) {
        if let Some(joystick) = self.joystick.as_mut() {
            joystick.close();
        }
        self.last_seen.clear();
        self.keys.release_all();
    }

    fn name(&self) -> &'static str {
        self.joystick.as_ref().map_or("keyboard", |j| j.name())
    }
}
