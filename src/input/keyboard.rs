//! Keyboard command source
//!
//! The event collaborator reports presses and releases; polling reads the
//! instantaneous held state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Command, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardSource {
    held: HashSet<Key>,
}

impl KeyboardSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl InputSource for KeyboardSource {
    fn poll_command(&mut self) -> Command {
        // Right/Down are checked last and win when opposite keys are both held
        let mut dx = 0;
        let mut dy = 0;
        if self.is_held(Key::Left) {
            dx = -1;
        }
        if self.is_held(Key::Right) {
            dx = 1;
        }
        if self.is_held(Key::Up) {
            dy = -1;
        }
        if self.is_held(Key::Down) {
            dy = 1;
        }
        Command {
            dx,
            dy,
            shoot: self.is_held(Key::Fire),
        }
    }

    fn name(&self) -> &'static str {
        "keyboard"
    }
}
