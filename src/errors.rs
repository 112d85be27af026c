use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by locus operations and by the parsers built on them.
///
/// Diagnostics about the *content* of an input never show up here directly:
/// they are delivered through the parser's [`Reporter`](crate::report::Reporter),
/// and the parse as a whole then fails with [`Error::Syntax`].
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred while reading an input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Memory for a copied range could not be allocated.
    #[error("Allocation failure: {0}")]
    Alloc(#[from] TryReserveError),
    /// An absent entity was passed where one is required.
    #[error("Invalid argument: no entity given")]
    InvalidArgument,
    /// An absent output destination was passed where one is required.
    #[error("Invalid argument: no output target given")]
    NullOutputTarget,
    /// The entity carries no locus, e.g. because it was built by hand
    /// rather than parsed from an input.
    #[error("No locus recorded")]
    NotFound,
    /// The input was rejected; `count` diagnostics were reported.
    #[error("Syntax error: {count} diagnostic(s) reported")]
    Syntax {
        /// Number of diagnostics handed to the reporter.
        count: usize,
    },
}

/// A specialized `Result` type for locus and parser operations.
pub type Result<T> = std::result::Result<T, Error>;
