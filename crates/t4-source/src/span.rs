use serde::Serialize;

/// A half-open byte range into template text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    start: u32,
    length: u32,
}

impl Span {
    #[must_use]
    pub fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    #[must_use]
    pub fn from_parts(start: usize, length: usize) -> Self {
        let start_u32 = u32::try_from(start).unwrap_or(u32::MAX);
        let length_u32 = u32::try_from(length).unwrap_or(u32::MAX.saturating_sub(start_u32));
        Span::new(start_u32, length_u32)
    }

    /// Construct a span from byte offset bounds.
    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self::from_parts(start, end.saturating_sub(start))
    }

    /// A zero-length span at `offset`.
    #[must_use]
    pub fn empty(offset: u32) -> Self {
        Self::new(offset, 0)
    }

    #[must_use]
    pub fn start(self) -> u32 {
        self.start
    }

    #[must_use]
    pub fn start_usize(self) -> usize {
        self.start as usize
    }

    #[must_use]
    pub fn end(self) -> u32 {
        self.start.saturating_add(self.length)
    }

    #[must_use]
    pub fn end_usize(self) -> usize {
        self.end() as usize
    }

    #[must_use]
    pub fn length(self) -> u32 {
        self.length
    }

    #[must_use]
    pub fn length_usize(self) -> usize {
        self.length as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.length == 0
    }

    #[must_use]
    pub fn as_tuple(self) -> (u32, u32) {
        (self.start, self.length)
    }

    /// Whether `offset` falls inside the span. The end is exclusive, except that an
    /// empty span contains its own start.
    #[must_use]
    pub fn contains(self, offset: u32) -> bool {
        if self.is_empty() {
            offset == self.start
        } else {
            self.start <= offset && offset < self.end()
        }
    }

    /// Whether `other` lies entirely within this span.
    #[must_use]
    pub fn contains_span(self, other: Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// The smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(self, other: Span) -> Self {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        Self::new(start, end - start)
    }

    /// The span with the same start, ending where `other` ends.
    #[must_use]
    pub fn until(self, other: Span) -> Self {
        Self::new(self.start, other.end().saturating_sub(self.start))
    }
}

impl From<Span> for (u32, u32) {
    fn from(span: Span) -> Self {
        span.as_tuple()
    }
}

impl From<&Span> for (u32, u32) {
    fn from(span: &Span) -> Self {
        span.as_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_exclusive() {
        let span = Span::new(2, 3);
        assert_eq!(span.end(), 5);
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_empty_span_contains_its_start() {
        let span = Span::empty(7);
        assert!(span.contains(7));
        assert!(!span.contains(8));
    }

    #[test]
    fn test_cover() {
        let a = Span::new(4, 2);
        let b = Span::new(10, 3);
        assert_eq!(a.cover(b), Span::new(4, 9));
        assert_eq!(b.cover(a), Span::new(4, 9));
        assert!(a.cover(b).contains_span(a));
        assert!(a.cover(b).contains_span(b));
    }

    #[test]
    fn test_from_bounds_saturates() {
        assert_eq!(Span::from_bounds(5, 3), Span::new(5, 0));
        assert_eq!(Span::from_bounds(1, 4), Span::new(1, 3));
    }
}
