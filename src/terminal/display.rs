use super::{DEFAULT_WIDTH, Display};
use crate::{
    Error, Result,
    render::{Screen, Style},
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

const EMPHASIZED: Color = Color::AnsiValue(40);
const MUTED: Color = Color::AnsiValue(250);

/// Raw mode and the alternate screen for as long as the guard lives.
///
/// Dropping the guard restores the terminal, so every exit path out of the
/// scope that owns it leaves the shell usable.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // Raw mode is already on; undo it if the screen switch fails.
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "Failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "Failed to restore terminal mode");
        }
    }
}

/// Stdout as a [`Display`].
pub struct Terminal {
    out: Mutex<Stdout>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(io::stdout()),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Terminal {
    fn width(&self) -> u16 {
        match terminal::size() {
            Ok((width, _)) if width > 0 => width,
            Ok(_) => DEFAULT_WIDTH,
            Err(e) => {
                tracing::debug!(error = %e, "Terminal size unavailable");
                DEFAULT_WIDTH
            }
        }
    }

    fn draw(&self, screen: &Screen) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| Error::Terminal("stdout lock poisoned".to_string()))?;

        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

        for line in screen.lines() {
            match line.style {
                Style::Plain => queue!(out, Print(&line.text))?,
                Style::Emphasized => queue!(
                    out,
                    SetForegroundColor(EMPHASIZED),
                    Print(&line.text),
                    ResetColor
                )?,
                Style::Muted => {
                    queue!(out, SetForegroundColor(MUTED), Print(&line.text), ResetColor)?
                }
                Style::Selected => queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(&line.text),
                    SetAttribute(Attribute::Reset)
                )?,
            }
            // Raw mode does not translate '\n'.
            queue!(out, Print("\r\n"))?;
        }

        out.flush()?;
        Ok(())
    }
}
