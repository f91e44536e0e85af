//! Raw-mode session handling on top of crossterm.
//!
//! The editor reads keys byte by byte, so the terminal is switched to raw
//! mode before the first read and back to cooked mode on every exit path.
//! `RawSession` restores it on drop, which covers early returns, `?`
//! propagation and panic unwinding. The screen itself (no alternate buffer,
//! cursor left visible) is never touched here.

use anyhow::{Context, Result, bail};
use crossterm::{
    execute,
    terminal::{SetTitle, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use std::io::{stdin, stdout};

pub mod prompt;
pub use prompt::{CookedModeGuard, prompt_line};

/// The few terminal switches the editor needs.
pub trait TerminalBackend {
    fn enable_raw(&mut self) -> Result<()>;
    fn restore(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    raw: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Raw mode needs a terminal on stdin; fail early with a readable error otherwise.
    pub fn ensure_tty() -> Result<()> {
        if !stdin().is_tty() {
            bail!("stdin is not a terminal");
        }
        Ok(())
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enable_raw(&mut self) -> Result<()> {
        if self.raw {
            return Ok(());
        }
        enable_raw_mode().context("failed to enable raw mode")?;
        self.raw = true;
        tracing::debug!(target: "runtime", "raw_mode_on");
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        disable_raw_mode().context("failed to restore terminal mode")?;
        self.raw = false;
        tracing::debug!(target: "runtime", "raw_mode_off");
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Raw mode held for as long as the value lives.
pub struct RawSession<'a, B: TerminalBackend> {
    backend: &'a mut B,
    armed: bool,
}

impl<'a, B: TerminalBackend> RawSession<'a, B> {
    pub fn begin(backend: &'a mut B) -> Result<Self> {
        backend.enable_raw()?;
        Ok(Self {
            backend,
            armed: true,
        })
    }

    /// Restore now and report the error that `Drop` would have to swallow.
    pub fn end(mut self) -> Result<()> {
        self.armed = false;
        self.backend.restore()
    }
}

impl<B: TerminalBackend> Drop for RawSession<'_, B> {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.backend.restore();
        }
    }
}
