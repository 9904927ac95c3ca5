//! Anchor types.
//!
//! Positions among children are given either from the start or from the end
//! of the child list, and resolved against the current number of children at
//! the time of the call.

use core::fmt;
use core::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// Position of a child, counted from the start or from the end.
///
/// `FromEnd(0)` is the position just past the last child (where an appended
/// node goes), and `FromEnd(1)` is the last child.
///
/// # Examples
///
/// ```
/// use listree::Position;
///
/// assert_eq!(Position::from(2).offset(5), Some(2));
/// assert_eq!(Position::LAST.offset(5), Some(4));
/// assert_eq!(Position::END.offset(5), Some(5));
/// assert_eq!(Position::FromEnd(6).offset(5), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Offset from the first child.
    FromStart(usize),
    /// Offset backward from the end of the child list.
    FromEnd(usize),
}

impl Position {
    /// The first child.
    pub const FIRST: Self = Self::FromStart(0);
    /// The last child.
    pub const LAST: Self = Self::FromEnd(1);
    /// Just past the last child.
    pub const END: Self = Self::FromEnd(0);

    /// Returns the offset from the start for a list of the given length.
    ///
    /// Returns `None` if a `FromEnd` position reaches before the start.
    /// Note that this does not check the upper bound.
    #[inline]
    #[must_use]
    pub fn offset(self, len: usize) -> Option<usize> {
        match self {
            Self::FromStart(n) => Some(n),
            Self::FromEnd(n) => len.checked_sub(n),
        }
    }
}

impl Default for Position {
    #[inline]
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<usize> for Position {
    #[inline]
    fn from(offset: usize) -> Self {
        Self::FromStart(offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromStart(n) => write!(f, "{n}"),
            Self::FromEnd(n) => write!(f, "^{n}"),
        }
    }
}

/// Half-open span of children, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start.
    pub start: Position,
    /// Exclusive end.
    pub end: Position,
}

impl Span {
    /// Span covering all children.
    pub const FULL: Self = Self {
        start: Position::FIRST,
        end: Position::END,
    };

    /// Creates a new span.
    #[inline]
    #[must_use]
    pub fn new(start: impl Into<Position>, end: impl Into<Position>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Returns true if the span covers every child regardless of the length.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Resolves the span into offsets for a list of the given length.
    ///
    /// Returns the bound that falls outside of `0..=len` on failure.
    pub fn offsets(self, len: usize) -> Result<Range<usize>, Position> {
        let start = self
            .start
            .offset(len)
            .filter(|&start| start <= len)
            .ok_or(self.start)?;
        let end = self
            .end
            .offset(len)
            .filter(|&end| start <= end && end <= len)
            .ok_or(self.end)?;
        Ok(start..end)
    }
}

impl Default for Span {
    #[inline]
    fn default() -> Self {
        Self::FULL
    }
}

impl From<Range<usize>> for Span {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<RangeFrom<usize>> for Span {
    #[inline]
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(range.start, Position::END)
    }
}

impl From<RangeTo<usize>> for Span {
    #[inline]
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(Position::FIRST, range.end)
    }
}

impl From<RangeFull> for Span {
    #[inline]
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

impl From<Range<Position>> for Span {
    #[inline]
    fn from(range: Range<Position>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;

    #[test_case(Position::FromStart(0), 0 => Some(0); "first of empty")]
    #[test_case(Position::FromStart(7), 3 => Some(7); "upper bound unchecked")]
    #[test_case(Position::FromEnd(0), 3 => Some(3); "end")]
    #[test_case(Position::FromEnd(3), 3 => Some(0); "end back to start")]
    #[test_case(Position::FromEnd(4), 3 => None; "before start")]
    fn position_offset(pos: Position, len: usize) -> Option<usize> {
        pos.offset(len)
    }

    #[test_case(Span::FULL, 4 => Ok(0..4); "full")]
    #[test_case(Span::from(1..3), 4 => Ok(1..3); "plain range")]
    #[test_case(Span::from(2..), 4 => Ok(2..4); "range from")]
    #[test_case(Span::from(..2), 4 => Ok(0..2); "range to")]
    #[test_case(Span::new(Position::FromEnd(3), Position::FromEnd(1)), 4 => Ok(1..3); "from end")]
    #[test_case(Span::from(3..2), 4 => Err(Position::FromStart(2)); "reversed")]
    #[test_case(Span::from(0..5), 4 => Err(Position::FromStart(5)); "end too large")]
    #[test_case(Span::from(5..), 4 => Err(Position::FromStart(5)); "start too large")]
    fn span_offsets(span: Span, len: usize) -> Result<Range<usize>, Position> {
        span.offsets(len)
    }

    #[test]
    fn display() {
        assert_eq!(Position::FromEnd(2).to_string(), "^2");
        assert_eq!(Span::from(1..).to_string(), "1..^0");
    }
}
