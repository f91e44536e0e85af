//! Line prompt drawn below the document.
//!
//! File names are typed with the terminal's own line editing and echo, so
//! raw mode is suspended for the duration of the read and re-entered
//! afterwards (even if the read fails).

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode, is_raw_mode_enabled},
};
use std::io::{BufRead, Write};

/// Suspends raw mode while alive; restores it on drop if it was on.
pub struct CookedModeGuard {
    restore: bool,
}

impl CookedModeGuard {
    pub fn enter() -> Result<Self> {
        let restore = is_raw_mode_enabled()?;
        if restore {
            disable_raw_mode()?;
        }
        Ok(Self { restore })
    }
}

impl Drop for CookedModeGuard {
    fn drop(&mut self) {
        if self.restore {
            let _ = enable_raw_mode();
        }
    }
}

/// Draw `<label> (empty = cancel): ` at `row` and read one line.
///
/// Returns `None` on an empty answer or end of input.
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    row: u16,
) -> Result<Option<String>> {
    queue!(
        out,
        MoveTo(0, row),
        Clear(ClearType::CurrentLine),
        Print(format!("{label} (empty = cancel): "))
    )?;
    out.flush()?;

    let mut line = String::new();
    let read = {
        let _cooked = CookedModeGuard::enter()?;
        input.read_line(&mut line)
    };
    let n = read.context("failed to read prompt answer")?;
    if n == 0 {
        return Ok(None);
    }
    let answer = line.trim_end_matches(['\r', '\n']);
    if answer.is_empty() {
        return Ok(None);
    }
    Ok(Some(answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_trimmed_answer() {
        let mut input = Cursor::new(b"notes.txt\r\n".to_vec());
        let mut out = Vec::new();
        let answer = prompt_line(&mut input, &mut out, "Save as", 4).unwrap();
        assert_eq!(answer.as_deref(), Some("notes.txt"));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.starts_with("\x1b[5;1H\x1b[2K"));
        assert!(shown.ends_with("Save as (empty = cancel): "));
    }

    #[test]
    fn empty_answer_and_eof_cancel() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"\n".to_vec());
        assert_eq!(prompt_line(&mut input, &mut out, "Open file", 3).unwrap(), None);
        let mut input = Cursor::new(Vec::new());
        assert_eq!(prompt_line(&mut input, &mut out, "Open file", 3).unwrap(), None);
    }
}
