//! Host-side text buffers.
//!
//! [`TextDocument`] is the editor's copy of an open template: its text, the
//! host version number and a pre-computed [`LineIndex`]. Edits arrive as
//! [`TextEdit`]s against byte spans, and [`TrackingSpan`]s follow a region of
//! text across those edits.

use t4_source::LineIndex;
use t4_source::Position;
use t4_source::Span;

/// A precondition failure while applying an edit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("edit range {start}..{end} is outside the document (length {length})")]
    OutOfBounds { start: u32, end: u32, length: u32 },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },
}

/// Replace the text covered by `span` with `new_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    span: Span,
    new_text: String,
}

impl TextEdit {
    #[must_use]
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }

    #[must_use]
    pub fn insert(offset: u32, text: impl Into<String>) -> Self {
        Self::new(Span::empty(offset), text)
    }

    #[must_use]
    pub fn delete(span: Span) -> Self {
        Self::new(span, String::new())
    }

    #[must_use]
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self::new(span, text)
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn new_text(&self) -> &str {
        &self.new_text
    }

    fn inserted_len(&self) -> u32 {
        u32::try_from(self.new_text.len()).unwrap_or(u32::MAX)
    }

    fn apply_to(&self, text: &mut String) -> Result<(), DocumentError> {
        let length = u32::try_from(text.len()).unwrap_or(u32::MAX);
        let (start, end) = (self.span.start(), self.span.end());
        if end > length {
            return Err(DocumentError::OutOfBounds { start, end, length });
        }
        for offset in [start, end] {
            if !text.is_char_boundary(offset as usize) {
                return Err(DocumentError::NotCharBoundary { offset });
            }
        }
        text.replace_range(
            self.span.start_usize()..self.span.end_usize(),
            &self.new_text,
        );
        Ok(())
    }
}

/// In-memory representation of an open template.
#[derive(Clone, Debug)]
pub struct TextDocument {
    text: String,
    /// The version number reported by the host
    version: i32,
    line_index: LineIndex,
}

impl TextDocument {
    #[must_use]
    pub fn new(text: String, version: i32) -> Self {
        let line_index = LineIndex::from_text(&text);
        Self {
            text,
            version,
            line_index,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> Option<u32> {
        self.line_index.offset(position)
    }

    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        self.line_index.position(offset)
    }

    /// Apply `edits` in order, each against the text left by the previous one.
    ///
    /// Either every edit applies or the document is left untouched.
    pub fn apply_edits(&mut self, edits: &[TextEdit], version: i32) -> Result<(), DocumentError> {
        let mut text = self.text.clone();
        for edit in edits {
            edit.apply_to(&mut text)?;
        }
        self.set_text(text, version);
        Ok(())
    }

    /// Replace the whole text.
    pub fn set_text(&mut self, text: String, version: i32) {
        self.line_index = LineIndex::from_text(&text);
        self.text = text;
        self.version = version;
    }
}

/// A span that follows its text through edits.
///
/// Text inserted exactly at the start pushes the span right; text inserted
/// exactly at the end is not absorbed. An edit overlapping the span clamps
/// the affected endpoint to the edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackingSpan {
    span: Span,
}

impl TrackingSpan {
    #[must_use]
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn map_through(&mut self, edit: &TextEdit) {
        let start = map_start(self.span.start(), edit);
        let end = map_end(self.span.end(), edit).max(start);
        self.span = Span::new(start, end - start);
    }

    pub fn map_through_all(&mut self, edits: &[TextEdit]) {
        for edit in edits {
            self.map_through(edit);
        }
    }
}

fn shift(offset: u32, edit: &TextEdit) -> u32 {
    let removed = edit.span.length();
    (offset - removed).saturating_add(edit.inserted_len())
}

fn map_start(offset: u32, edit: &TextEdit) -> u32 {
    let (start, end) = (edit.span.start(), edit.span.end());
    if offset < start {
        offset
    } else if offset >= end {
        shift(offset, edit)
    } else {
        start
    }
}

fn map_end(offset: u32, edit: &TextEdit) -> u32 {
    let (start, end) = (edit.span.start(), edit.span.end());
    if offset <= start {
        offset
    } else if offset >= end {
        shift(offset, edit)
    } else {
        start.saturating_add(edit.inserted_len())
    }
}
