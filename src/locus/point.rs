//! A single named source position.

use std::cmp::Ordering;
use std::fmt::{ Display, Formatter };
use std::fmt;
use std::sync::Arc;

use serde::{ Deserialize, Serialize };

use crate::errors::Result;

/// A position in a named input: source name, line and column.
///
/// Lines and columns are 1-based as produced by the scanners in this crate;
/// `0` means "unknown". The source name is shared between all points of one
/// input and is never mutated through a point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    source: Arc<str>,
    line: usize,
    column: usize,
}

impl Point {
    /// Creates a point in `source` at `line`.`column`.
    pub fn new(source: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Point { source: source.into(), line, column }
    }

    /// Name of the input this point refers to.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The shared source-name handle.
    pub fn source_name(&self) -> &Arc<str> {
        &self.source
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns `true` when both points name the same input.
    pub fn same_source(&self, other: &Point) -> bool {
        Arc::ptr_eq(&self.source, &other.source) || self.source == other.source
    }

    /// Copies the point, giving the copy its own source-name allocation.
    ///
    /// Unlike `clone()`, which shares the name, the result does not keep the
    /// original allocation alive.
    ///
    /// The name is first staged in a buffer reserved with
    /// `try_reserve_exact`; failing that reservation yields
    /// [`Error::Alloc`](crate::Error::Alloc). Moving the staged name into the
    /// `Arc` is a second allocation which, like any infallible std
    /// allocation, aborts on out-of-memory.
    pub fn copy(&self) -> Result<Point> {
        let mut name = String::new();
        name.try_reserve_exact(self.source.len())?;
        name.push_str(&self.source);
        Ok(Point { source: Arc::from(name), line: self.line, column: self.column })
    }
}

/// Points of different inputs are unordered.
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_source(other) {
            return None;
        }
        Some((self.line, self.column).cmp(&(other.line, other.column)))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}.{}", self.source, self.line, self.column)
    }
}

/// Renders `point` as `"<source>:<line>.<column>"`.
pub fn format_point(point: &Point) -> String {
    point.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_ok() {
        assert_eq!(format_point(&Point::new("a.conf", 3, 14)), "a.conf:3.14");
    }

    #[test]
    fn copy_is_equal_and_detached() {
        let p = Point::new("a.conf", 1, 2);
        let c = p.copy().unwrap();
        assert_eq!(p, c);
        assert!(!Arc::ptr_eq(p.source_name(), c.source_name()));
    }

    #[test]
    fn copy_of_empty_name() {
        let c = Point::default().copy().unwrap();
        assert_eq!(c.source(), "");
        assert_eq!(c.line(), 0);
    }

    #[test]
    fn failed_reservation_is_alloc_error() {
        let mut buf = String::new();
        let e = buf.try_reserve_exact(usize::MAX).unwrap_err();
        assert!(matches!(crate::Error::from(e), crate::Error::Alloc(_)));
    }

    #[test]
    fn equality_needs_all_fields() {
        let p = Point::new("a", 1, 2);
        assert_ne!(p, Point::new("b", 1, 2));
        assert_ne!(p, Point::new("a", 2, 2));
        assert_ne!(p, Point::new("a", 1, 3));
    }

    #[test]
    fn ordering_within_one_source() {
        let a = Point::new("x", 1, 9);
        let b = Point::new("x", 2, 1);
        assert!(a < b);
        assert_eq!(a.partial_cmp(&a.clone()), Some(Ordering::Equal));
        assert_eq!(a.partial_cmp(&Point::new("y", 2, 1)), None);
    }
}
