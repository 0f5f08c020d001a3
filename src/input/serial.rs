//! Serial joystick command source
//!
//! Inbound: one `joyX,joyY,joyBtn,shootBtn` line per poll (four decimal
//! integers). Outbound: `H:<heat>,L:<lives>` telemetry once per tick.
//!
//! A background thread does the blocking reads and hands complete lines over a
//! bounded channel, so polling never waits on the device. When the channel is
//! full the reader blocks and the OS tty buffer holds the rest. Malformed
//! lines are logged and dropped; they behave exactly like an idle tick.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::{Command, InputSource, Telemetry};
use crate::config::SerialConfig;
use crate::error::{LineError, SerialError};

/// Map a raw axis reading to -1, 0 or 1
fn axis(value: i32, config: &SerialConfig) -> i8 {
    if value < config.joy_low {
        -1
    } else if value > config.joy_high {
        1
    } else {
        0
    }
}

/// Parse one inbound line (without requiring the trailing newline)
pub fn parse_line(line: &str, config: &SerialConfig) -> Result<Command, LineError> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() != 4 {
        return Err(LineError::FieldCount(parts.len()));
    }

    let mut values = [0i32; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse()
            .map_err(|_| LineError::BadInteger(part.to_string()))?;
    }
    let [joy_x, joy_y, _joy_btn, shoot_btn] = values;

    Ok(Command {
        dx: axis(joy_x, config),
        dy: axis(joy_y, config),
        shoot: shoot_btn == 0,
    })
}

/// Lines buffered between the reader thread and the game loop
const LINE_BACKLOG: usize = 16;

fn decode_line(bytes: &[u8], config: &SerialConfig) -> Result<Command, LineError> {
    let line = std::str::from_utf8(bytes).map_err(|_| LineError::Decode)?;
    parse_line(line, config)
}

pub struct SerialSource {
    lines: Receiver<Vec<u8>>,
    writer: Option<Box<dyn Write + Send>>,
    config: SerialConfig,
    discarded: u64,
    disconnected: bool,
}

impl SerialSource {
    /// Source fed by an existing line channel
    pub fn new(
        lines: Receiver<Vec<u8>>,
        writer: Option<Box<dyn Write + Send>>,
        config: &SerialConfig,
    ) -> Self {
        Self {
            lines,
            writer,
            config: config.clone(),
            discarded: 0,
            disconnected: false,
        }
    }

    /// Spawn a reader thread over `reader` and build a source on its output
    pub fn spawn<R>(reader: R, writer: Option<Box<dyn Write + Send>>, config: &SerialConfig) -> Self
    where
        R: Read + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<Vec<u8>>(LINE_BACKLOG);
        thread::spawn(move || {
            let mut reader = BufReader::new(reader);
            loop {
                let mut buf = Vec::new();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        while matches!(buf.last(), Some(b'\n' | b'\r')) {
                            buf.pop();
                        }
                        if tx.send(buf).is_err() {
                            break; // source dropped
                        }
                    }
                    Err(e) => {
                        log::debug!("serial read failed: {e}");
                        break;
                    }
                }
            }
        });
        Self::new(rx, writer, config)
    }

    /// Open a serial device node for reading and writing
    pub fn open(path: &Path, config: &SerialConfig) -> Result<Self, SerialError> {
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|source| SerialError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        let writer = device.try_clone()?;
        log::info!("Connected to joystick at {}", path.display());
        Ok(Self::spawn(device, Some(Box::new(writer)), config))
    }

    /// Lines dropped as malformed so far
    pub fn discarded(&self) -> u64 {
        self.discarded
    }
}

impl InputSource for SerialSource {
    fn poll_command(&mut self) -> Command {
        match self.lines.try_recv() {
            Ok(bytes) => match decode_line(&bytes, &self.config) {
                Ok(command) => command,
                Err(e) => {
                    self.discarded += 1;
                    log::debug!("discarding serial line: {e}");
                    Command::IDLE
                }
            },
            Err(TryRecvError::Empty) => Command::IDLE,
            Err(TryRecvError::Disconnected) => {
                if !self.disconnected {
                    self.disconnected = true;
                    log::warn!("Joystick disconnected");
                }
                Command::IDLE
            }
        }
    }

    fn discard_pending(&mut self) {
        let mut dropped = 0;
        while self.lines.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            log::trace!("dropped {dropped} stale serial lines");
        }
    }

    fn send_telemetry(&mut self, telemetry: Telemetry) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = writer
            .write_all(telemetry.to_line().as_bytes())
            .and_then(|_| writer.flush())
        {
            log::debug!("telemetry write failed: {e}");
        }
    }

    /// Drop the telemetry writer and the line channel. The reader thread
    /// exits on its next line, releasing the device.
    fn close(&mut self) {
        let (_, closed) = mpsc::channel();
        self.lines = closed;
        self.disconnected = true;
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
            log::info!("Serial link closed");
        }
    }

    fn name(&self) -> &'static str {
        "serial"
    }
}

impl Drop for SerialSource {
    fn drop(&mut self) {
        InputSource::close(self);
    }
}
