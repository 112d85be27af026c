//! Mailcap files (RFC 1524).
//!
//! Each entry maps a media type to a view command and optional fields:
//!
//! ```text
//! # type       command            fields
//! text/plain;  cat %s;            copiousoutput
//! image/*;     xv %s;             test=test -n "$DISPLAY"
//! ```
//!
//! Entries, and every field in them, carry the range they were read from.

mod mailcap_grammar;

mod entry;
pub use self::entry::*;

mod key_map;
pub use self::key_map::*;

mod parser;
pub use self::parser::*;
