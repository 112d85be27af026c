use std::sync::Arc;

use indexmap::IndexSet;

use crate::locus::{ Point, Range };

/// Tracks the current line and column while scanning an input.
///
/// Scanners feed every character through [`LineTracker::advance`] and get back
/// the point the character sits at. A `\r` is an ordinary character, so a
/// `\r\n` line end is a single line break whose `\r` takes one column on
/// the line it ends.
#[derive(Debug, Clone)]
pub struct LineTracker {
    source: Arc<str>,
    /// Current 1-based line index in the input stream.
    pub line_index: usize,
    /// 1-based column of the next character.
    pub column_index: usize,
}

impl LineTracker {
    /// Creates a new tracker at the start of `source`.
    pub fn new(source: Arc<str>) -> Self {
        LineTracker { source, line_index: 1, column_index: 1 }
    }

    pub fn source(&self) -> &Arc<str> {
        &self.source
    }

    /// Position of the next character.
    pub fn point(&self) -> Point {
        Point::new(self.source.clone(), self.line_index, self.column_index)
    }

    /// Consumes `ch` and returns the position it was found at.
    pub fn advance(&mut self, ch: char) -> Point {
        let here = self.point();
        if ch == '\n' {
            self.next_line();
        } else {
            self.column_index += 1;
        }
        here
    }

    /// Consumes all of `text`.
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch);
        }
    }

    /// Consumes `text` and returns the range it covers, or a zero-width
    /// range at the current position for empty text.
    pub fn advance_range(&mut self, text: &str) -> Range {
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return Range::point(self.point());
        };
        let begin = self.advance(first);
        let mut end = begin.clone();
        for ch in chars {
            end = self.advance(ch);
        }
        Range::new(begin, end)
    }

    /// Advances the tracker to the start of the next line.
    pub fn next_line(&mut self) {
        self.line_index += 1;
        self.column_index = 1;
    }
}

/// Interns input names so that all points of one input share one allocation.
#[derive(Debug, Default, Clone)]
pub struct SourceNames {
    names: IndexSet<Arc<str>>,
}

impl SourceNames {
    pub fn new() -> Self {
        SourceNames { names: IndexSet::new() }
    }

    /// Returns the shared handle for `name`, allocating it on first use.
    pub fn intern(&mut self, name: &str) -> Arc<str> {
        if let Some(existing) = self.names.get(name) {
            return existing.clone();
        }
        let name: Arc<str> = Arc::from(name);
        self.names.insert(name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_counts_lines_and_columns() {
        let mut t = LineTracker::new(Arc::from("t"));
        assert_eq!(t.advance('a'), Point::new("t", 1, 1));
        assert_eq!(t.advance('b'), Point::new("t", 1, 2));
        assert_eq!(t.advance('\n'), Point::new("t", 1, 3));
        assert_eq!(t.advance('c'), Point::new("t", 2, 1));
    }

    #[test]
    fn tracker_crlf_is_one_line_break() {
        let mut t = LineTracker::new(Arc::from("t"));
        t.advance_str("ab");
        assert_eq!(t.advance('\r'), Point::new("t", 1, 3));
        assert_eq!(t.advance('\n'), Point::new("t", 1, 4));
        assert_eq!(t.advance('c'), Point::new("t", 2, 1));
        let r = t.advance_range("d\r\n");
        assert_eq!(r.to_string(), "t:2.2-4");
        assert_eq!(t.point(), Point::new("t", 3, 1));
    }

    #[test]
    fn tracker_columns_are_chars_not_bytes() {
        let mut t = LineTracker::new(Arc::from("t"));
        t.advance_str("äö");
        assert_eq!(t.point(), Point::new("t", 1, 3));
    }

    #[test]
    fn advance_range_covers_text() {
        let mut t = LineTracker::new(Arc::from("t"));
        t.advance_str("ab ");
        let r = t.advance_range("cd\nef");
        assert_eq!(r.to_string(), "t:1.4-2.2");
        let empty = t.advance_range("");
        assert_eq!(empty, Range::point(Point::new("t", 2, 3)));
    }

    #[test]
    fn interned_names_are_shared() {
        let mut names = SourceNames::new();
        let a = names.intern("a.conf");
        let b = names.intern("a.conf");
        let c = names.intern("b.conf");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(names.len(), 2);
    }
}
