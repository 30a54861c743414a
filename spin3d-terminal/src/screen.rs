//! Raw mode and alternate screen lifecycle
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};

/// Holds the terminal in the alternate screen (and optionally raw mode)
/// and puts it back on [`TerminalGuard::restore`] or on drop, including
/// during a panic
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
    restored: bool,
}

impl<W: Write> TerminalGuard<W> {
    /// Enable raw mode, then switch `out` to the alternate screen
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Self::open(out, true)
    }

    /// Switch `out` to the alternate screen without touching raw mode
    pub fn alternate_screen(out: W) -> io::Result<Self> {
        Self::open(out, false)
    }

    fn open(out: W, raw_mode: bool) -> io::Result<Self> {
        // Built before entering the screen so a failure below still restores
        let mut guard = Self {
            out,
            raw_mode,
            restored: false,
        };
        execute!(guard.out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }

    /// Leave the alternate screen and raw mode. Every step is attempted;
    /// the first failure is returned. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let raw = if self.raw_mode {
            terminal::disable_raw_mode()
        } else {
            Ok(())
        };
        let screen = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
        raw.and(screen)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {e}");
        }
    }
}
