//! Terminal fullscreen toggle
//!
//! Uses the xterm window manipulation sequence `CSI 10 ; 2 t`, which most
//! xterm-compatible emulators honor. Emulators that do not simply ignore it.

use super::CapabilityError;
use crossterm::tty::IsTty;
use crossterm::{Command, execute};
use std::fmt;
use std::io::{self, Write};

#[cfg(test)]
use mockall::automock;

/// Toggles the terminal window between windowed and fullscreen.
struct ToggleWindowFullscreen;

impl Command for ToggleWindowFullscreen {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[10;2t")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "the console host has no fullscreen toggle",
        ))
    }
}

#[cfg_attr(test, automock)]
pub trait FullscreenProvider: Send {
    /// Flips fullscreen presentation; returns whether it is now on.
    fn toggle(&mut self) -> Result<bool, CapabilityError>;
}

/// Fullscreen through escape sequences written to the given terminal.
#[derive(Debug)]
pub struct TerminalFullscreen<W> {
    out: W,
    active: bool,
}

impl TerminalFullscreen<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + IsTty + Send> TerminalFullscreen<W> {
    pub fn new(out: W) -> Self {
        Self { out, active: false }
    }
}

impl<W: Write + IsTty + Send> FullscreenProvider for TerminalFullscreen<W> {
    fn toggle(&mut self) -> Result<bool, CapabilityError> {
        if !self.out.is_tty() {
            return Err(CapabilityError::Unsupported(
                "output is not a terminal".to_string(),
            ));
        }
        execute!(self.out, ToggleWindowFullscreen)
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        self.active = !self.active;
        Ok(self.active)
    }
}
