//! Turns configuration text into tokens tagged with their ranges.

use std::fmt::{ Display, Formatter };
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

use crate::locus::Range;
use crate::util::LineTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    String,
    Number,
    Equals,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Newline,
    /// A malformed token; the text holds the lexical diagnostic.
    Error,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            TokenKind::Word => "word",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Equals => "'='",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Newline => "newline",
            TokenKind::Error => "malformed token",
            TokenKind::Eof => "end of input",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text; for strings the unescaped contents without quotes.
    pub text: String,
    pub range: Range,
}

impl Token {
    /// Human readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Word | TokenKind::Number => format!("'{}'", self.text),
            TokenKind::String => format!("string {:?}", self.text),
            TokenKind::Error => self.text.clone(),
            _ => self.kind.to_string(),
        }
    }
}

/// A malformed token. The scanner has already skipped past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub range: Range,
    pub message: String,
}

impl From<LexError> for Token {
    /// Keeps a malformed token in the stream so the parser reports it when
    /// it gets there.
    fn from(e: LexError) -> Self {
        Token { kind: TokenKind::Error, text: e.message, range: e.range }
    }
}

fn word_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !"=;,{}[]#\"".contains(c)
}

fn is_number(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}

pub struct Scanner<'s> {
    chars: Peekable<Chars<'s>>,
    tracker: LineTracker,
}

impl<'s> Scanner<'s> {
    pub fn new(source: Arc<str>, text: &'s str) -> Self {
        Scanner { chars: text.chars().peekable(), tracker: LineTracker::new(source) }
    }

    pub fn tracker(&self) -> &LineTracker {
        &self.tracker
    }

    fn bump(&mut self) -> Option<(char, crate::locus::Point)> {
        let c = self.chars.next()?;
        Some((c, self.tracker.advance(c)))
    }

    fn token(kind: TokenKind, text: impl Into<String>, range: Range) -> Token {
        Token { kind, text: text.into(), range }
    }

    /// Returns the next token. Once the input is exhausted every call yields
    /// an [`TokenKind::Eof`] token positioned just past the last character.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(Self::token(TokenKind::Eof, "", Range::point(self.tracker.point())));
            };
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '#' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                }
                '"' => return self.string(),
                c if word_char(c) => return Ok(self.word()),
                _ => {
                    let Some((c, at)) = self.bump() else { continue };
                    let range = Range::point(at);
                    let kind = match c {
                        '\n' => TokenKind::Newline,
                        '=' => TokenKind::Equals,
                        ';' => TokenKind::Semicolon,
                        ',' => TokenKind::Comma,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        _ => {
                            return Err(LexError {
                                range,
                                message: format!("unexpected character {:?}", c),
                            });
                        }
                    };
                    return Ok(Self::token(kind, c, range));
                }
            }
        }
    }

    fn word(&mut self) -> Token {
        let mut text = String::new();
        let mut range: Option<Range> = None;
        while let Some(&c) = self.chars.peek() {
            if !word_char(c) {
                break;
            }
            let Some((c, at)) = self.bump() else { break };
            text.push(c);
            range = Some(match range {
                None => Range::point(at),
                Some(r) => Range::span(&r, &Range::point(at)),
            });
        }
        let range = range.unwrap_or_else(|| Range::point(self.tracker.point()));
        let kind = if is_number(&text) { TokenKind::Number } else { TokenKind::Word };
        Self::token(kind, text, range)
    }

    fn string(&mut self) -> Result<Token, LexError> {
        let Some((_, open)) = self.bump() else {
            return Ok(Self::token(TokenKind::Eof, "", Range::point(self.tracker.point())));
        };
        let mut text = String::new();
        let mut last = open.clone();
        loop {
            match self.chars.peek() {
                None | Some('\n') => {
                    return Err(LexError {
                        range: Range::new(open, last),
                        message: "unterminated string".to_string(),
                    });
                }
                Some('"') => {
                    if let Some((_, close)) = self.bump() {
                        last = close;
                    }
                    return Ok(Self::token(TokenKind::String, text, Range::new(open, last)));
                }
                Some('\\') => {
                    if let Some((_, at)) = self.bump() {
                        last = at;
                    }
                    match self.chars.peek() {
                        None | Some('\n') => continue,
                        Some(_) => {}
                    }
                    if let Some((c, at)) = self.bump() {
                        last = at;
                        match c {
                            'n' => text.push('\n'),
                            't' => text.push('\t'),
                            '"' | '\\' => text.push(c),
                            other => {
                                text.push('\\');
                                text.push(other);
                            }
                        }
                    }
                }
                Some(_) => {
                    if let Some((c, at)) = self.bump() {
                        text.push(c);
                        last = at;
                    }
                }
            }
        }
    }
}
