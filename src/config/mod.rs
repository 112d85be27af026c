//! Configuration files.
//!
//! The syntax is line oriented. A statement is either an assignment or a
//! block, and is terminated by `;` or a newline. The end of input does not
//! terminate a statement.
//!
//! ```text
//! # comment
//! user = mail
//! aliases = [postmaster, "abuse desk"]
//! server smtp {
//!     port = 25; timeout = 30
//!     tls { cert = "/etc/ssl/mail.pem"; }
//! }
//! ```

mod parser;
pub use self::parser::*;

mod scanner;
pub use self::scanner::{ LexError, Scanner, Token, TokenKind };

mod tree;
pub use self::tree::*;
