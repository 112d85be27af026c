//! Source loci: points, ranges, and how entities carry them.
//!
//! Every token produced by a scanner in this crate is tagged with a [`Range`].
//! Grammar code combines the ranges of a production's symbols with
//! [`Range::merge`], and semantic actions store a copy of the result in the
//! entity they build (see [`Located`]).

mod point;
pub use self::point::*;

mod range;
pub use self::range::*;

mod attach;
pub use self::attach::*;
