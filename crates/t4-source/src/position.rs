use serde::Serialize;

/// A zero-based line and column within template text.
///
/// Columns count UTF-8 bytes from the start of the line, matching the byte
/// offsets used by [`Span`](crate::Span).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    line: u32,
    column: u32,
}

impl Position {
    #[must_use]
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl From<Position> for (u32, u32) {
    fn from(position: Position) -> Self {
        (position.line, position.column)
    }
}

/// Pre-computed line start offsets for converting between byte offsets and
/// [`Position`]s.
///
/// Lookups are O(log n) in the number of lines via binary search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    length: u32,
}

impl LineIndex {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut pos = 0u32;

        for c in text.chars() {
            pos += u32::try_from(c.len_utf8()).unwrap_or(0);
            if c == '\n' {
                line_starts.push(pos);
            }
        }

        Self {
            line_starts,
            length: pos,
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Start offset of a zero-based line.
    #[must_use]
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Convert a byte offset to a [`Position`]. Offsets past the end clamp to the
    /// end of the text.
    #[must_use]
    pub fn position(&self, offset: u32) -> Position {
        let offset = offset.min(self.length);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        };

        let column = offset - self.line_starts[line];
        Position::new(u32::try_from(line).unwrap_or(0), column)
    }

    /// Convert a [`Position`] back to a byte offset, if the line exists.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<u32> {
        let line_start = self.line_start(position.line())?;
        let line_end = self
            .line_start(position.line() + 1)
            .unwrap_or(self.length);

        Some((line_start + position.column()).min(line_end))
    }
}
