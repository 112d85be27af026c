//! Parser-level error policy.

use crate::errors::{ Error, Result };
use crate::locus::Range;
use crate::report::Reporter;

/// Options shared by the parsers in this crate.
///
/// A parser always reports every error it finds through its reporter. These
/// options only decide how many reports it makes before it gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of diagnostics before the parse stops. `None` means the
    /// parser keeps going until the end of the input.
    pub max_errors: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions { max_errors: Some(100) }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort the parse at the first error.
    pub fn stop_at_first_error() -> Self {
        ParserOptions { max_errors: Some(1) }
    }

    /// Report every error in the input.
    pub fn collect_all() -> Self {
        ParserOptions { max_errors: None }
    }

    /// Stop after `max` errors.
    pub fn with_max_errors(max: usize) -> Self {
        ParserOptions { max_errors: Some(max.max(1)) }
    }
}

/// Raised inside a parser once the error limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Abort;

/// Counts the reports of one parse against [`ParserOptions::max_errors`].
pub(crate) struct ErrorBudget<'r, R: Reporter> {
    reporter: &'r mut R,
    limit: Option<usize>,
    count: usize,
}

impl<'r, R: Reporter> ErrorBudget<'r, R> {
    pub(crate) fn new(reporter: &'r mut R, options: &ParserOptions) -> Self {
        ErrorBudget { reporter, limit: options.max_errors, count: 0 }
    }

    /// Hands a diagnostic to the reporter. Fails with [`Abort`] when this was
    /// the last report the options allow.
    pub(crate) fn report(&mut self, locus: &Range, message: &str) -> std::result::Result<(), Abort> {
        self.reporter.report(locus, message);
        self.count += 1;
        match self.limit {
            Some(limit) if self.count >= limit => {
                log::debug!(target: "parse_locus", "error limit of {} reached, stopping", limit);
                Err(Abort)
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Turns the outcome of a parse into the public result.
    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T> {
        match value {
            Some(value) if self.count == 0 => Ok(value),
            _ => Err(Error::Syntax { count: self.count }),
        }
    }
}
