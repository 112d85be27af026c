//! Reads mailcap files into a [`Mailcap`].

use std::fs::File;
use std::io::{ BufRead, BufReader };
use std::path::Path;
use std::sync::Arc;

use super::mailcap_grammar::{ grammar, RawEntry, Span };
use super::{ Field, Mailcap, MailcapEntry };
use crate::errors::Result;
use crate::locus::{ Point, Range };
use crate::options::{ Abort, ErrorBudget, ParserOptions };
use crate::report::{ DefaultReporter, Reporter };
use crate::util::{ LineTracker, SourceNames };

/// Reads mailcap files (RFC 1524) into a [`Mailcap`].
///
/// Blank lines and lines starting with `#` are skipped. An entry ending in a
/// backslash continues on the next line. A malformed entry is reported
/// through the reporter and skipped; the following entries are still read.
///
/// # Examples
///
/// ```rust
/// # use parse_locus::mailcap::MailcapParser;
/// # use parse_locus::{ get_locus, Range };
/// let text = "# viewers\ntext/html; lynx -dump %s; copiousoutput\n";
/// let mut p = MailcapParser::new();
/// let mailcap = p.parse_str("mailcap", text).unwrap();
///
/// let entry = mailcap.find("text/html").next().unwrap();
/// assert!(entry.copious_output());
///
/// let mut locus = Range::default();
/// get_locus(Some(entry), Some(&mut locus)).unwrap();
/// assert_eq!(locus.to_string(), "mailcap:2.1-39");
/// ```
#[derive(Debug)]
pub struct MailcapParser<R: Reporter = DefaultReporter> {
    reporter: R,
    options: ParserOptions,
    names: SourceNames,
}

impl Default for MailcapParser<DefaultReporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl MailcapParser<DefaultReporter> {
    /// Creates a parser reporting through the [`DefaultReporter`].
    pub fn new() -> Self {
        Self::with_reporter(DefaultReporter::new())
    }
}

impl<R: Reporter> MailcapParser<R> {
    /// Creates a parser reporting through `reporter`.
    pub fn with_reporter(reporter: R) -> Self {
        MailcapParser { reporter, options: ParserOptions::default(), names: SourceNames::new() }
    }

    /// Replaces the error policy.
    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Parses `text`, citing `name` as the source in loci and diagnostics.
    pub fn parse_str(&mut self, name: &str, text: &str) -> Result<Mailcap> {
        let mut bytes = text.as_bytes();
        self.read_mailcap(name, &mut bytes)
    }

    /// Reads and parses the file at `path`.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Mailcap> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        self.read_mailcap(&path.display().to_string(), &mut reader)
    }

    /// Reads entries from `reader` until the end of input.
    pub fn read_mailcap<T: BufRead>(&mut self, name: &str, reader: &mut T) -> Result<Mailcap> {
        let source = self.names.intern(name);
        log::debug!(target: "parse_locus", "parsing mailcap {}", name);
        let mut budget = ErrorBudget::new(&mut self.reporter, &self.options);
        let mut mailcap = Mailcap::new();
        let mut line_index = 0;
        let mut line_str = String::new();
        let mut entry = String::new();
        let mut entry_line = 0;
        let mut aborted = false;
        loop {
            line_str.clear();
            if reader.read_line(&mut line_str)? == 0 {
                break;
            }
            line_index += 1;
            if entry.is_empty() {
                let trimmed = line_str.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                entry_line = line_index;
            }
            entry.push_str(&line_str);
            if is_continued(&line_str) {
                continue;
            }
            let text = EntryText::new(source.clone(), entry_line, &entry);
            match text.parse(&mut budget) {
                Ok(Some(e)) => mailcap.entries.push(e),
                Ok(None) => {}
                Err(Abort) => {
                    aborted = true;
                    break;
                }
            }
            entry.clear();
        }
        if !aborted && !entry.is_empty() {
            // continued past the last line
            let text = EntryText::new(source, entry_line, &entry);
            match text.parse(&mut budget) {
                Ok(Some(e)) => mailcap.entries.push(e),
                Ok(None) => {}
                Err(Abort) => aborted = true,
            }
        }
        log::debug!(target: "parse_locus", "read {} mailcap entries from {}, {} rejected", mailcap.len(), name, budget.count());
        budget.finish(if aborted { None } else { Some(mailcap) })
    }
}

/// Returns `true` when `line` ends in an unescaped backslash.
fn is_continued(line: &str) -> bool {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Removes continuations and the `\;` and `\\` escapes.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\r') | Some('\n') => {
                chars.next_if_eq(&'\r');
                chars.next_if_eq(&'\n');
            }
            Some(';') | Some('\\') => out.extend(chars.next()),
            _ => out.push('\\'),
        }
    }
    out
}

/// Strips trailing blanks, line ends and continuations.
fn trim_blank_end(s: &str) -> &str {
    let mut s = s;
    loop {
        let t = s.trim_end_matches([' ', '\t', '\r', '\n']);
        let t = t.strip_suffix('\\').filter(|_| t.len() < s.len()).unwrap_or(t);
        if t.len() == s.len() {
            return s;
        }
        s = t;
    }
}

/// The text of one logical entry and where it starts in the file.
struct EntryText<'a> {
    text: &'a str,
    start: LineTracker,
}

impl<'a> EntryText<'a> {
    fn new(source: Arc<str>, line: usize, text: &'a str) -> Self {
        let mut start = LineTracker::new(source);
        start.line_index = line;
        EntryText { text, start }
    }

    /// Position of the character at byte `offset`.
    fn point_at(&self, offset: usize) -> Point {
        let mut tracker = self.start.clone();
        tracker.advance_str(&self.text[..offset]);
        tracker.point()
    }

    /// Range of the bytes `begin..end`.
    fn range(&self, begin: usize, end: usize) -> Range {
        match self.text[begin..end].char_indices().last() {
            Some((last, _)) => Range::new(self.point_at(begin), self.point_at(begin + last)),
            None => Range::point(self.point_at(begin)),
        }
    }

    fn span(&self, span: &Span) -> Range {
        self.range(span.begin, span.end)
    }

    /// Where to report a grammar failure at byte `offset`.
    ///
    /// A failure on a real character points at that character. A failure at
    /// the end of the entry means something is missing and gets a zero-width
    /// range after the last character that was accepted.
    fn failure_locus(&self, offset: usize) -> (Range, Option<char>) {
        match self.text[offset..].chars().next() {
            Some(c) if c != '\n' && c != '\r' => (Range::point(self.point_at(offset)), Some(c)),
            _ => {
                let accepted = trim_blank_end(&self.text[..offset]);
                let previous = match accepted.char_indices().last() {
                    Some((last, c)) => self.range(last, last + c.len_utf8()),
                    None => Range::point(self.point_at(0)),
                };
                (Range::merge(&[], &previous), None)
            }
        }
    }

    fn parse<R: Reporter>(&self, budget: &mut ErrorBudget<'_, R>) -> std::result::Result<Option<MailcapEntry>, Abort> {
        match grammar::entry(self.text) {
            Ok(raw) => Ok(Some(self.build(&raw))),
            Err(e) => {
                let (locus, found) = self.failure_locus(e.location.offset);
                let message = match found {
                    Some(c) => format!("unexpected {:?}, expected {}", c, e.expected),
                    None => format!("expected {}", e.expected),
                };
                budget.report(&locus, &message)?;
                Ok(None)
            }
        }
    }

    fn build(&self, raw: &RawEntry) -> MailcapEntry {
        let type_locus = self.span(&raw.mime_type);
        let mut rhs = vec![type_locus.clone(), self.span(&raw.command)];
        let mut entry = MailcapEntry::new(raw.mime_type.text, unescape(raw.command.text));
        for f in &raw.fields {
            let name_locus = self.span(&f.name);
            let locus = match &f.value {
                Some(value) => Range::merge(&[name_locus, self.span(value)], &type_locus),
                None => name_locus,
            };
            rhs.push(locus.clone());
            entry = entry.with_field(Field {
                name: f.name.text.to_string(),
                value: f.value.as_ref().map(|v| unescape(v.text)),
                locus: Some(locus),
            });
        }
        entry.with_locus(Range::merge(&rhs, &type_locus))
    }
}
