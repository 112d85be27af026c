//! Extents in an input and the rule that combines them.

use std::fmt::{ Display, Formatter };
use std::fmt;

use serde::{ Deserialize, Serialize };

use super::Point;
use crate::errors;

/// An inclusive extent between two [`Point`]s.
///
/// `end` names the last character covered, so a single character has
/// `begin == end`. Within one input `end` is never before `begin`; a range may
/// also start in one input and end in another (e.g. across an include).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Range {
    begin: Point,
    end: Point,
}

impl Range {
    pub fn new(begin: Point, end: Point) -> Self {
        debug_assert!(
            !begin.same_source(&end) || begin <= end,
            "range end {} is before its begin {}", end, begin
        );
        Range { begin, end }
    }

    /// A zero-width range positioned at `point`.
    pub fn point(point: Point) -> Self {
        Range { begin: point.clone(), end: point }
    }

    pub fn begin(&self) -> &Point {
        &self.begin
    }

    pub fn end(&self) -> &Point {
        &self.end
    }

    pub fn is_zero_width(&self) -> bool {
        self.begin == self.end
    }

    /// Returns `true` when begin and end name the same input.
    pub fn same_source(&self) -> bool {
        self.begin.same_source(&self.end)
    }

    /// Copies the range, giving both points their own source-name allocation.
    ///
    /// The copy is independent of the parser buffers and of the range it was
    /// taken from. Fails with [`Error::Alloc`](crate::Error::Alloc) only when
    /// memory runs out.
    pub fn copy(&self) -> errors::Result<Range> {
        Ok(Range { begin: self.begin.copy()?, end: self.end.copy()? })
    }

    /// Computes the range of a reduced production from its symbols.
    ///
    /// `rhs` holds the ranges of the right-hand-side symbols in order. For a
    /// non-empty production the result spans from the first symbol's begin to
    /// the last symbol's end. An empty production has nothing to anchor on, so
    /// it gets a zero-width range at the end of `previous`, the symbol consumed
    /// just before the reduction.
    pub fn merge(rhs: &[Range], previous: &Range) -> Range {
        match (rhs.first(), rhs.last()) {
            (Some(first), Some(last)) => Range {
                begin: first.begin.clone(),
                end: last.end.clone(),
            },
            _ => Range::point(previous.end.clone()),
        }
    }

    /// Shorthand for [`Range::merge`] over two symbols.
    pub fn span(first: &Range, last: &Range) -> Range {
        Range { begin: first.begin.clone(), end: last.end.clone() }
    }
}

impl From<Point> for Range {
    fn from(point: Point) -> Self {
        Range::point(point)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let (b, e) = (&self.begin, &self.end);
        if !b.same_source(e) {
            write!(f, "{}-{}", b, e)
        } else if b.line() == e.line() {
            write!(f, "{}:{}.{}-{}", b.source(), b.line(), b.column(), e.column())
        } else {
            write!(f, "{}:{}.{}-{}.{}", b.source(), b.line(), b.column(), e.line(), e.column())
        }
    }
}

/// Renders `range` for a diagnostic, without trailing punctuation.
///
/// * same input, same line: `"file:5.2-9"`
/// * same input, several lines: `"file:5.2-7.1"`
/// * different inputs: `"a.txt:5.2-b.txt:1.1"`
pub fn format_range(range: &Range) -> String {
    range.to_string()
}
