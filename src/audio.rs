//! Sound cues
//!
//! The simulation never plays audio itself. It emits cues as `GameEvent`s and
//! the front end forwards them to whatever `AudioSink` it owns.

use serde::{Deserialize, Serialize};

/// Named sound cues supplied by the asset collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Looping engine drone while a game is running
    Engine,
    /// Player shot
    Gun,
    /// Enemy destroyed or player hit
    Explosion,
    /// Bomber destroyed
    BigExplosion,
}

impl Cue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Engine => "engine",
            Cue::Gun => "gun",
            Cue::Explosion => "explosion",
            Cue::BigExplosion => "big_explosion",
        }
    }

    /// Whether the cue is played on loop until stopped
    pub fn is_looping(&self) -> bool {
        matches!(self, Cue::Engine)
    }
}

/// Playback collaborator
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
    fn stop(&mut self, cue: Cue);
}

/// Sink that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        if !self.muted {
            log::debug!("play {}", cue.as_str());
        }
    }

    fn stop(&mut self, cue: Cue) {
        if !self.muted {
            log::debug!("stop {}", cue.as_str());
        }
    }
}
