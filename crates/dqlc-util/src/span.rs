use std::fmt;

/// A half-open range of 1-based source columns within a single clause.
///
/// Clauses are always a single line, so a `Span` only needs a start/end
/// column pair rather than the line-tracking a multi-file `Span` would
/// carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Span { start, end }
    }

    /// A span covering a single column, as produced for one-character
    /// lexemes.
    pub fn point(column: u32) -> Self {
        Span {
            start: column,
            end: column + 1,
        }
    }

    /// The 1-based column this span begins at; the position cited in
    /// diagnostics.
    pub fn position(&self) -> u32 {
        self.start
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
