use std::borrow::Cow;

use xi_rope::{LinesMetric, Rope};

use super::Position;

/// Line-addressable read access to the markup being edited, plus the cursor.
///
/// This is the only view of the document the correlator and the render state
/// machine ever get; they never parse it into a tree.
pub trait TextView {
    /// The line at `row` without its terminator, or `None` past the end.
    fn line_at(&self, row: usize) -> Option<Cow<'_, str>>;

    fn line_count(&self) -> usize;

    /// Full snapshot of the text, as submitted to the rendering engine.
    fn text(&self) -> Cow<'_, str>;

    fn cursor(&self) -> Position;

    fn set_cursor(&mut self, position: Position);
}

/// Rope-backed text with a single cursor.
#[derive(Clone)]
pub struct TextBuffer {
    rope: Rope,
    cursor: Position,
}

impl TextBuffer {
    /// Create a buffer from raw bytes, rejecting invalid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from(text))
    }

    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from(text);
        self.cursor = self.clamp(self.cursor);
    }

    /// Insert `text` at `at`; the position is clamped into the document first.
    pub fn insert(&mut self, at: Position, text: &str) {
        let offset = self.offset_of(at);
        self.rope.edit(offset..offset, text);
        self.cursor = self.clamp(self.cursor);
    }

    /// Byte offset of a position, clamped to the nearest existing character.
    pub fn offset_of(&self, position: Position) -> usize {
        let position = self.clamp(position);
        let line_start = self.rope.offset_of_line(position.row);
        let line = self.line_at(position.row).unwrap_or_default();
        let in_line = line
            .char_indices()
            .nth(position.column)
            .map_or(line.len(), |(idx, _)| idx);
        line_start + in_line
    }

    /// Pull a position back inside the document.
    pub fn clamp(&self, position: Position) -> Position {
        let row = position.row.min(self.line_count() - 1);
        let width = self
            .line_at(row)
            .map_or(0, |line| line.chars().count());
        Position {
            row,
            column: position.column.min(width),
        }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
            cursor: Position::default(),
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::from("")
    }
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("len", &self.rope.len())
            .field("lines", &self.line_count())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl TextView for TextBuffer {
    fn line_at(&self, row: usize) -> Option<Cow<'_, str>> {
        if row >= self.line_count() {
            return None;
        }
        let start = self.rope.offset_of_line(row);
        let end = if row + 1 < self.line_count() {
            self.rope.offset_of_line(row + 1)
        } else {
            self.rope.len()
        };
        let line = self.rope.slice_to_cow(start..end);
        Some(match line {
            Cow::Borrowed(s) => Cow::Borrowed(trim_terminator(s)),
            Cow::Owned(s) => Cow::Owned(trim_terminator(&s).to_string()),
        })
    }

    fn line_count(&self) -> usize {
        self.rope.measure::<LinesMetric>() + 1
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.rope.to_string())
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = self.clamp(position);
    }
}

fn trim_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
