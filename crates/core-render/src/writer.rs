//! Terminal writer abstraction.
//!
//! A frame is first assembled as an ordered list of primitive commands and
//! then emitted in one go, so the terminal never sees a half-built frame and
//! tests can inspect the commands without decoding escape sequences.
//!
//! Invariants:
//! * Commands preserve ordering; nothing is flushed mid-frame.
//! * Positions are absolute with a (0,0) origin; crossterm converts them to
//!   the terminal's 1-based `ESC[row;colH`.
//! * The writer owns no global state; it is a short-lived object per frame.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Erase the whole screen (`ESC[2J`).
    ClearAll,
    MoveTo(u16, u16),
    Print(String),
    /// Document content is bytes and is written through untouched.
    PrintBytes(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn print_bytes(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.cmds.push(Command::PrintBytes(bytes.to_vec()));
        }
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::ClearAll => {
                    queue!(out, Clear(ClearType::All))?;
                }
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
                Command::PrintBytes(b) => {
                    out.write_all(&b)?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prints_are_skipped() {
        let mut w = Writer::new();
        w.print("");
        w.print_bytes(b"");
        assert!(w.commands().is_empty());
    }

    #[test]
    fn emits_expected_sequences() {
        let mut w = Writer::new();
        w.clear_all();
        w.move_to(0, 0);
        w.print("ab");
        w.print_bytes(b"cd");
        w.move_to(4, 2);
        let mut out = Vec::new();
        w.flush_to(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[1;1Habcd\x1b[3;5H".to_vec());
    }
}
