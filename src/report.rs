//! Delivery of parse diagnostics.
//!
//! Grammar code never prints anything. It hands every diagnostic to the
//! parser's [`Reporter`], which is chosen when the parser is built. Without an
//! explicit choice the parser uses [`DefaultReporter`], which formats the
//! locus and forwards the message to a [`DiagnosticSink`] (by default the
//! [`log`] facade) at error severity.

use std::fmt::{ Display, Formatter };
use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::locus::Range;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

impl From<Severity> for log::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error => log::Level::Error,
        }
    }
}

/// Receives fully formatted diagnostic messages.
pub trait DiagnosticSink {
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Sink forwarding to the [`log`] facade under the `parse_locus` target.
///
/// Nothing is printed unless the application installed a logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        log::log!(target: "parse_locus", log::Level::from(severity), "{}", message);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, severity: Severity, message: &str) {
        (**self).emit(severity, message)
    }
}

/// Called by a parser for every error it detects.
///
/// The implementing value is the reporter's context: whatever state it needs
/// lives in `self` and is released when the parser drops it. A reporter only
/// delivers diagnostics; whether the parse goes on after a report is decided
/// by the parser's [`ParserOptions`](crate::ParserOptions).
///
/// Any `FnMut(&Range, &str)` closure is a reporter:
///
/// ```rust
/// # use parse_locus::config::ConfigParser;
/// let mut seen = Vec::new();
/// let mut p = ConfigParser::with_reporter(|locus: &parse_locus::Range, msg: &str| {
///     seen.push(format!("{}: {}", locus, msg));
/// });
/// assert!(p.parse_str("demo.conf", "answer =\n").is_err());
/// drop(p);
/// assert_eq!(seen, vec!["demo.conf:1.8-8: expected value"]);
/// ```
pub trait Reporter {
    fn report(&mut self, locus: &Range, message: &str);
}

impl<F: FnMut(&Range, &str)> Reporter for F {
    fn report(&mut self, locus: &Range, message: &str) {
        self(locus, message)
    }
}

/// The reporter parsers use when none is given.
///
/// Sends `"<locus>: <message>"` to its sink at [`Severity::Error`].
#[derive(Debug, Default, Clone)]
pub struct DefaultReporter<S: DiagnosticSink = LogSink> {
    sink: S,
}

impl DefaultReporter<LogSink> {
    pub fn new() -> Self {
        DefaultReporter { sink: LogSink }
    }
}

impl<S: DiagnosticSink> DefaultReporter<S> {
    /// Creates a default reporter writing to `sink` instead of the log.
    pub fn with_sink(sink: S) -> Self {
        DefaultReporter { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: DiagnosticSink> Reporter for DefaultReporter<S> {
    fn report(&mut self, locus: &Range, message: &str) {
        self.sink.emit(Severity::Error, &format!("{}: {}", locus, message));
    }
}

/// A diagnostic as kept by [`Collector`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub locus: Range,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.locus, self.message)
    }
}

/// Reporter that keeps every diagnostic, for batch error handling.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Collector { diagnostics: Vec::new() }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for Collector {
    fn report(&mut self, locus: &Range, message: &str) {
        self.diagnostics.push(Diagnostic { locus: locus.clone(), message: message.to_string() });
    }
}

/// Reporter that drops every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&mut self, _locus: &Range, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locus::Point;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(Severity, String)>,
    }

    impl DiagnosticSink for Recorder {
        fn emit(&mut self, severity: Severity, message: &str) {
            self.lines.push((severity, message.to_string()));
        }
    }

    fn locus() -> Range {
        Range::new(Point::new("x.conf", 4, 2), Point::new("x.conf", 4, 6))
    }

    #[test]
    fn default_reporter_formats_locus_and_message() {
        let mut r = DefaultReporter::with_sink(Recorder::default());
        r.report(&locus(), "bad value");
        let sink = r.into_sink();
        assert_eq!(sink.lines, vec![(Severity::Error, "x.conf:4.2-6: bad value".to_string())]);
    }

    #[test]
    fn default_reporter_over_borrowed_sink() {
        let mut rec = Recorder::default();
        {
            let mut r = DefaultReporter::with_sink(&mut rec);
            r.report(&locus(), "one");
            r.report(&locus(), "two");
        }
        assert_eq!(rec.lines.len(), 2);
    }

    #[test]
    fn collector_keeps_order() {
        let mut c = Collector::new();
        c.report(&locus(), "first");
        c.report(&Range::point(Point::new("x.conf", 5, 1)), "second");
        let d = c.into_diagnostics();
        assert_eq!(d[0].message, "first");
        assert_eq!(d[1].to_string(), "x.conf:5.1-1: second");
    }

    #[test]
    fn closures_are_reporters() {
        let mut count = 0;
        {
            let mut f = |_: &Range, _: &str| count += 1;
            f.report(&locus(), "a");
            f.report(&locus(), "b");
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn severity_maps_to_log_level() {
        assert_eq!(log::Level::from(Severity::Error), log::Level::Error);
        assert_eq!(log::Level::from(Severity::Warning), log::Level::Warn);
        assert!(Severity::Warning < Severity::Error);
    }
}
