//! Line-vector document buffer.
//!
//! A `Document` is an ordered list of byte lines plus the cursor. Every
//! mutation goes through a primitive here that updates lines and cursor
//! together, so two invariants always hold:
//! - there is at least one line;
//! - `cursor.line < line_count()` and `cursor.byte <= line_len(cursor.line)`.
//!
//! Offsets are byte offsets. Lines are stored as raw bytes so that content
//! loaded from disk (which may contain multi-byte UTF-8) never makes a byte
//! offset land on an invalid `str` boundary.

/// A position inside a document expressed as (line index, byte offset within that line).
/// `byte == line_len` means "after the last byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.byte = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.byte > max_len {
            self.byte = max_len;
        }
    }
}

/// Cursor motion requested by an arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

pub type Line = Vec<u8>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
    cursor: Position,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A single empty line with the cursor at the origin.
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            cursor: Position::origin(),
        }
    }

    /// Build from existing lines. An empty iterator yields `[""]`.
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line>,
    {
        let mut doc = Self::new();
        doc.replace_lines(lines);
        doc
    }

    /// Build from lines and place the cursor, clamped into range.
    pub fn with_cursor<I, L>(lines: I, cursor: Position) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line>,
    {
        let mut doc = Self::from_lines(lines);
        doc.set_cursor(cursor);
        doc
    }

    /// Replace all content; cursor returns to the origin.
    pub fn replace_lines<I, L>(&mut self, lines: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Line>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        self.cursor = Position::origin();
    }

    /// Back to a single empty line.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.lines.push(Vec::new());
        self.cursor = Position::origin();
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, idx: usize) -> Option<&[u8]> {
        self.lines.get(idx).map(Vec::as_slice)
    }

    /// Byte length of a line; 0 for out of range indices.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, Vec::len)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: Position) {
        let mut pos = pos;
        pos.clamp_to(self.lines.len(), |l| self.line_len(l));
        self.cursor = pos;
    }

    /// True when the document is exactly `[""]`.
    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Insert one byte at the cursor and advance past it.
    pub fn insert_char(&mut self, c: u8) {
        let Position { line, byte } = self.cursor;
        self.lines[line].insert(byte, c);
        self.cursor.byte += 1;
    }

    /// Move everything after the cursor to a new line below; cursor goes to its start.
    pub fn split_line(&mut self) {
        let Position { line, byte } = self.cursor;
        let tail = self.lines[line].split_off(byte);
        self.lines.insert(line + 1, tail);
        self.cursor = Position::new(line + 1, 0);
    }

    /// Backspace. Joins with the previous line at column 0; no-op at the origin.
    pub fn delete_backward(&mut self) {
        let Position { line, byte } = self.cursor;
        if byte > 0 {
            self.lines[line].remove(byte - 1);
            self.cursor.byte -= 1;
            return;
        }
        if line == 0 {
            return;
        }
        let current = self.lines.remove(line);
        let prev = &mut self.lines[line - 1];
        let join_at = prev.len();
        prev.extend_from_slice(&current);
        self.cursor = Position::new(line - 1, join_at);
    }

    /// Arrow-key motion. Up/Down clamp the offset to the target line; Left/Right
    /// wrap across line ends. At document edges the motion is a no-op.
    pub fn move_cursor(&mut self, dir: Direction) {
        let Position { line, byte } = self.cursor;
        match dir {
            Direction::Up => {
                if line > 0 {
                    self.cursor.line = line - 1;
                    self.cursor.byte = byte.min(self.line_len(line - 1));
                }
            }
            Direction::Down => {
                if line + 1 < self.lines.len() {
                    self.cursor.line = line + 1;
                    self.cursor.byte = byte.min(self.line_len(line + 1));
                }
            }
            Direction::Left => {
                if byte > 0 {
                    self.cursor.byte = byte - 1;
                } else if line > 0 {
                    self.cursor = Position::new(line - 1, self.line_len(line - 1));
                }
            }
            Direction::Right => {
                if byte < self.line_len(line) {
                    self.cursor.byte = byte + 1;
                } else if line + 1 < self.lines.len() {
                    self.cursor = Position::new(line + 1, 0);
                }
            }
        }
    }

    /// Check both structural invariants. Used by tests and debug assertions.
    pub fn invariants_hold(&self) -> bool {
        !self.lines.is_empty()
            && self.cursor.line < self.lines.len()
            && self.cursor.byte <= self.lines[self.cursor.line].len()
    }
}
