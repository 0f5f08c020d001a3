//! Player command sources
//!
//! Each tick the controller asks the active source for one movement/fire
//! command. Sources that are also a telemetry channel receive the player's
//! heat and lives back after the tick.

pub mod keyboard;
pub mod serial;
pub mod terminal;

pub use keyboard::{Key, KeyboardSource};
pub use serial::{SerialSource, parse_line};
pub use terminal::TerminalControls;

use serde::{Deserialize, Serialize};

/// One tick of player intent; `dx`/`dy` are each -1, 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub dx: i8,
    pub dy: i8,
    pub shoot: bool,
}

impl Command {
    pub const IDLE: Command = Command {
        dx: 0,
        dy: 0,
        shoot: false,
    };

    pub fn new(dx: i8, dy: i8, shoot: bool) -> Self {
        Self {
            dx: dx.signum(),
            dy: dy.signum(),
            shoot,
        }
    }
}

/// Outbound status line for the joystick's indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Heat truncated to an integer
    pub heat: u32,
    pub lives: u8,
}

impl Telemetry {
    pub fn new(heat: f32, lives: u8) -> Self {
        Self {
            heat: heat.max(0.0) as u32,
            lives,
        }
    }

    /// Wire form: `H:<heat>,L:<lives>\n`
    pub fn to_line(&self) -> String {
        format!("H:{},L:{}\n", self.heat, self.lives)
    }
}

pub trait InputSource {
    /// Produce this tick's command; never blocks
    fn poll_command(&mut self) -> Command;

    /// Throw away input buffered while nothing was polling
    fn discard_pending(&mut self) {}

    /// Report player status back to the device, if it listens
    fn send_telemetry(&mut self, _telemetry: Telemetry) {}

    /// Release the underlying device; polling afterwards yields idle commands
    fn close(&mut self) {}

    /// Short name for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_line_truncates_heat() {
        let line = Telemetry::new(38.9, 2).to_line();
        assert_eq!(line, "H:38,L:2\n");
    }

    #[test]
    fn test_command_new_normalizes_axes() {
        assert_eq!(Command::new(5, -3, true), Command { dx: 1, dy: -1, shoot: true });
        assert_eq!(Command::default(), Command::IDLE);
    }
}
