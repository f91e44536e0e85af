//! Full-frame renderer.
//!
//! Every draw repaints the whole screen: clear, the two header rows, one row
//! per document line prefixed by its right-aligned 1-based number, the status
//! message (if any), and finally the hardware cursor placed over the logical
//! cursor. Output is a pure function of `EditorState`, so drawing twice with
//! no state change yields identical bytes.
//!
//! Rows end in `\r\n` because raw mode turns off output post-processing and a
//! bare `\n` would not return the carriage.
//!
//! The number gutter is as wide as the digit count of the line count; it
//! widens when the document grows past 9, 99, ... lines and the cursor column
//! shifts with it.

use anyhow::{Context, Result};
use core_state::EditorState;
use core_text::Document;
use std::io::Write;

pub mod writer;

pub use writer::{Command, Writer};

pub const HEADER_TITLE: &str = "FastBox Text Editor (Ctrl+S save, Ctrl+O open, ESC exit)";
pub const HEADER_RULE: &str = "-----------------------------------------------------------";
/// Rows occupied by the header above the first document line.
pub const HEADER_ROWS: u16 = 2;
/// Width of the `". "` separator between number and content.
pub const SEPARATOR_WIDTH: usize = 2;

const ROW_END: &str = "\r\n";

/// Number of decimal digits in `line_count` (at least 1).
pub fn gutter_width(line_count: usize) -> usize {
    let mut n = line_count.max(1);
    let mut digits = 0;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}

fn saturate(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}

/// 0-based (column, row) of the hardware cursor for the document's logical cursor.
pub fn cursor_screen_position(doc: &Document) -> (u16, u16) {
    let cursor = doc.cursor();
    let col = gutter_width(doc.line_count()) + SEPARATOR_WIDTH + cursor.byte;
    let row = usize::from(HEADER_ROWS) + cursor.line;
    (saturate(col), saturate(row))
}

/// First row below the document; prompts are drawn there.
pub fn prompt_row(state: &EditorState) -> u16 {
    saturate(usize::from(HEADER_ROWS) + state.document.line_count())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Assemble the frame without emitting it.
    pub fn compose(&self, state: &EditorState) -> Writer {
        let doc = &state.document;
        let width = gutter_width(doc.line_count());
        let mut w = Writer::new();
        w.clear_all();
        w.move_to(0, 0);
        w.print(format!("{HEADER_TITLE}{ROW_END}"));
        w.print(format!("{HEADER_RULE}{ROW_END}"));
        for (idx, line) in doc.lines().iter().enumerate() {
            w.print(format!("{:>width$}. ", idx + 1));
            w.print_bytes(line);
            w.print(ROW_END);
        }
        if let Some(status) = &state.status {
            w.print(status.to_string());
        }
        let (col, row) = cursor_screen_position(doc);
        w.move_to(col, row);
        w
    }

    /// Draw the frame and flush `out` before returning.
    pub fn draw<W: Write>(&self, state: &EditorState, out: &mut W) -> Result<()> {
        let frame = self.compose(state);
        frame.flush_to(out).context("failed to write frame")?;
        tracing::trace!(
            target: "render",
            lines = state.document.line_count(),
            line = state.document.cursor().line,
            byte = state.document.cursor().byte,
            "frame"
        );
        Ok(())
    }

    /// The exact bytes `draw` would emit.
    pub fn frame_bytes(&self, state: &EditorState) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.draw(state, &mut out)?;
        Ok(out)
    }
}
