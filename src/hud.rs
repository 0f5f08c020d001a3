//! HUD values handed to the rendering collaborator
//!
//! The core never formats pixels; it produces the strings and numbers the
//! renderer draws for the current phase.

use serde::{Deserialize, Serialize};

use crate::sim::{GameController, GamePhase};

pub const GAME_OVER_TITLE: &str = "Killed in Action";
pub const RESTART_HINT: &str = "Press Enter or click to return";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u32,
    /// Zero when no player is on screen
    pub lives: u8,
    /// Heat truncated to an integer, as shown on the gauge
    pub heat: u32,
    pub max_heat: u32,
}

impl Hud {
    pub fn from_controller(game: &GameController) -> Self {
        let (lives, heat) = game
            .player()
            .map(|p| (p.lives, p.heat.max(0.0) as u32))
            .unwrap_or((0, 0));
        Self {
            phase: game.phase,
            score: game.score,
            lives,
            heat,
            max_heat: game.config.player.max_heat as u32,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    /// Heat as a fraction of the maximum, for the gauge
    pub fn heat_fraction(&self) -> f32 {
        if self.max_heat == 0 {
            return 0.0;
        }
        (self.heat as f32 / self.max_heat as f32).clamp(0.0, 1.0)
    }

    /// Title, final score and restart hint; empty outside game over
    pub fn game_over_lines(&self) -> Vec<String> {
        if self.phase != GamePhase::GameOver {
            return Vec::new();
        }
        vec![
            GAME_OVER_TITLE.to_string(),
            format!("Final Score: {}", self.score),
            RESTART_HINT.to_string(),
        ]
    }
}
