//! Line commands read from stdin on a helper thread and polled without
//! blocking.

use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use log::{debug, warn};
use pacer_core::input::{InputEvent, InputProvider};

pub const HELP: &str = "commands: <enter>/p play-pause, r restart, +/- speed, ]/[ group size, \
g <n> seek, t theme, h highlight pattern, m micro-pauses, q quit";

pub struct StdinCommands {
    lines: Receiver<String>,
    closed: bool,
}

impl StdinCommands {
    pub fn spawn() -> io::Result<Self> {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-commands".into())
            .spawn(move || {
                for line in reader.lines() {
                    let Ok(line) = line else {
                        break;
                    };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                debug!("input: command stream closed");
            })?;

        Ok(Self {
            lines: rx,
            closed: false,
        })
    }

    /// Whether the command stream has ended and every line was consumed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl InputProvider for StdinCommands {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        loop {
            match self.lines.try_recv() {
                Ok(line) => match parse_command(&line) {
                    Some(event) => return Ok(Some(event)),
                    None => warn!("input: unknown command {:?}; {}", line.trim(), HELP),
                },
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    return Ok(None);
                }
            }
        }
    }
}

pub fn parse_command(line: &str) -> Option<InputEvent> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");

    let event = match command {
        "" | "p" | "space" => InputEvent::TogglePlay,
        "r" => InputEvent::Restart,
        "+" | "=" => InputEvent::Faster,
        "-" | "_" => InputEvent::Slower,
        "]" => InputEvent::GroupUp,
        "[" => InputEvent::GroupDown,
        "t" => InputEvent::CycleTheme,
        "h" => InputEvent::CyclePattern,
        "m" => InputEvent::ToggleMicroPause,
        "q" => InputEvent::Quit,
        "g" => InputEvent::SeekTo(parts.next()?.parse().ok()?),
        _ => return None,
    };

    if parts.next().is_some() {
        return None;
    }
    Some(event)
}
