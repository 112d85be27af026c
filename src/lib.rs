//! Source locus tracking and diagnostic reporting for grammar-driven parsers.
//!
//! The crate is built around four pieces:
//!
//! * [`Point`] and [`Range`] name a place in an input by source name, line
//!   and column. Lines and columns count from 1 and a range includes its end.
//! * [`Range::merge`] computes the locus of a production from the loci of its
//!   right-hand side, and places empty productions right after the previous
//!   symbol.
//! * The [`Located`] trait and [`get_locus`] let callers ask any parsed entity
//!   where it came from.
//! * A [`Reporter`] receives every diagnostic. The [`DefaultReporter`] writes
//!   `<locus>: <message>` through the `log` crate; a closure or a
//!   [`Collector`] can take its place.
//!
//! Two parsers use these pieces: a [`config::ConfigParser`] for a small
//! configuration language and a [`mailcap::MailcapParser`] for RFC 1524
//! mailcap files.
//!
//! ```rust
//! use parse_locus::config::ConfigParser;
//! use parse_locus::{ Collector, Located };
//!
//! let mut p = ConfigParser::with_reporter(Collector::new());
//! let config = p.parse_str("mail.conf", "user = mail\nport = 25\n").unwrap();
//! let port = config.get("port").unwrap();
//! assert_eq!(port.locus().unwrap().to_string(), "mail.conf:2.1-9");
//! ```

pub mod config;
pub mod locus;
pub mod mailcap;
pub mod report;
pub mod util;

mod errors;
pub use self::errors::{ Error, Result };

mod options;
pub use self::options::ParserOptions;

pub use self::locus::{ format_point, format_range, get_locus, Located, Point, Range };
pub use self::report::{ Collector, DefaultReporter, Diagnostic, DiagnosticSink, LogSink, Reporter, Severity, Silent };

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
