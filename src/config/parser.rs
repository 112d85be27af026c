//! Recursive-descent grammar for configuration files.
//!
//! Every reduction computes its range with [`Range::merge`] from the ranges of
//! the symbols it consumed, with the range of the previously consumed token as
//! the anchor for empty productions. Errors about something *missing* are
//! placed the same way, right after the last token that was accepted.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use super::scanner::{ Scanner, Token, TokenKind };
use super::tree::{ Assign, Block, Config, Node, Scalar, ScalarKind, Value };
use crate::errors::Result;
use crate::locus::{ Located, Range };
use crate::options::{ Abort, ErrorBudget, ParserOptions };
use crate::report::{ DefaultReporter, Reporter };
use crate::util::SourceNames;

type Step<T> = std::result::Result<T, Abort>;

/// Blocks nested deeper than this are rejected.
const MAX_DEPTH: usize = 64;

/// Reads configuration files into a [`Config`].
///
/// Diagnostics go to the reporter given at construction; [`ConfigParser::new`]
/// uses the [`DefaultReporter`].
///
/// # Examples
///
/// ```rust
/// # use parse_locus::config::ConfigParser;
/// # use parse_locus::Located;
/// let mut p = ConfigParser::new();
/// let config = p.parse_str("mail.conf", "server smtp {\n  port = 25\n}\n").unwrap();
/// let port = config.get("server.port").unwrap();
/// assert_eq!(port.locus().unwrap().to_string(), "mail.conf:2.3-11");
/// ```
#[derive(Debug)]
pub struct ConfigParser<R: Reporter = DefaultReporter> {
    reporter: R,
    options: ParserOptions,
    names: SourceNames,
}

impl Default for ConfigParser<DefaultReporter> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser<DefaultReporter> {
    /// Creates a parser reporting through the [`DefaultReporter`].
    pub fn new() -> Self {
        Self::with_reporter(DefaultReporter::new())
    }
}

impl<R: Reporter> ConfigParser<R> {
    /// Creates a parser reporting through `reporter`.
    pub fn with_reporter(reporter: R) -> Self {
        ConfigParser { reporter, options: ParserOptions::default(), names: SourceNames::new() }
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

    /// Gives back the reporter, e.g. to inspect what a [`Collector`](crate::Collector) gathered.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Parses `text`, citing `name` as the source in loci and diagnostics.
    pub fn parse_str(&mut self, name: &str, text: &str) -> Result<Config> {
        let source = self.names.intern(name);
        log::debug!(target: "parse_locus", "parsing config {}", name);
        let budget = ErrorBudget::new(&mut self.reporter, &self.options);
        let mut grammar = Grammar::new(source, text, budget);
        let nodes = grammar.file().ok();
        let result = grammar.budget.finish(nodes.map(|nodes| Config { nodes }));
        if let Err(ref e) = result {
            log::debug!(target: "parse_locus", "config {} rejected: {}", name, e);
        }
        result
    }

    /// Reads the whole of `source` and parses it.
    pub fn read_config<T: Read>(&mut self, name: &str, source: &mut T) -> Result<Config> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        self.parse_str(name, &text)
    }

    /// Reads and parses the file at `path`.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Config> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        self.read_config(&path.display().to_string(), &mut file)
    }
}

struct Grammar<'s, 'r, R: Reporter> {
    scanner: Scanner<'s>,
    budget: ErrorBudget<'r, R>,
    current: Token,
    /// Range of the last consumed token, the anchor for empty productions.
    previous: Range,
    depth: usize,
}

impl<'s, 'r, R: Reporter> Grammar<'s, 'r, R> {
    fn new(source: Arc<str>, text: &'s str, budget: ErrorBudget<'r, R>) -> Self {
        let scanner = Scanner::new(source, text);
        let start = Range::point(scanner.tracker().point());
        let current = Token { kind: TokenKind::Eof, text: String::new(), range: start.clone() };
        Grammar { scanner, budget, current, previous: start, depth: 0 }
    }

    fn fetch(&mut self) -> Token {
        self.scanner.next_token().unwrap_or_else(Token::from)
    }

    /// Consumes the current token and returns it. A malformed token is
    /// reported here, once it is reached.
    fn bump(&mut self) -> Step<Token> {
        let next = self.fetch();
        let token = std::mem::replace(&mut self.current, next);
        self.previous = token.range.clone();
        if token.kind == TokenKind::Error {
            self.budget.report(&token.range, &token.text)?;
        }
        Ok(token)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn at_terminator(&self) -> bool {
        self.at(TokenKind::Semicolon) || self.at(TokenKind::Newline)
    }

    /// Consumes a malformed token where a value was written. Returns `false`
    /// when the current token is well formed.
    fn malformed(&mut self) -> Step<bool> {
        if !self.at(TokenKind::Error) {
            return Ok(false);
        }
        self.bump()?;
        Ok(true)
    }

    /// Zero-width range right after the last consumed token.
    fn here(&self) -> Range {
        Range::merge(&[], &self.previous)
    }

    fn expected(&mut self, what: &str) -> Step<()> {
        let locus = self.here();
        self.budget.report(&locus, &format!("expected {}", what))
    }

    fn unexpected(&mut self) -> Step<()> {
        if self.at(TokenKind::Error) {
            self.bump()?;
            return Ok(());
        }
        let locus = self.current.range.clone();
        let message = format!("unexpected {}", self.current.describe());
        self.budget.report(&locus, &message)
    }

    /// Skips to the end of the current statement: past the next terminator,
    /// or up to a `}` closing the enclosing block, or to the end of input.
    fn synchronize(&mut self) -> Step<()> {
        let mut nesting = 0usize;
        let start = self.current.range.clone();
        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::RBrace if nesting == 0 => break,
                TokenKind::RBrace => nesting -= 1,
                TokenKind::LBrace => nesting += 1,
                TokenKind::Semicolon | TokenKind::Newline if nesting == 0 => {
                    self.bump()?;
                    break;
                }
                _ => {}
            }
            self.bump()?;
        }
        log::debug!(target: "parse_locus", "skipped input at {}", Range::span(&start, &self.previous));
        Ok(())
    }

    fn file(&mut self) -> Step<Vec<Node>> {
        self.current = self.fetch();
        let (nodes, _) = self.statements(false)?;
        Ok(nodes)
    }

    /// stmts := ε | stmts stmt
    fn statements(&mut self, in_block: bool) -> Step<(Vec<Node>, Range)> {
        let anchor = self.previous.clone();
        let mut nodes = Vec::new();
        let mut rhs = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::RBrace if in_block => break,
                TokenKind::RBrace => {
                    self.unexpected()?;
                    self.bump()?;
                }
                TokenKind::Semicolon | TokenKind::Newline => {
                    rhs.push(self.bump()?.range);
                }
                _ => {
                    if let Some(node) = self.statement()? {
                        if let Some(locus) = node.locus() {
                            rhs.push(locus.clone());
                        }
                        nodes.push(node);
                    }
                }
            }
        }
        Ok((nodes, Range::merge(&rhs, &anchor)))
    }

    /// stmt := assign term | block [term]
    fn statement(&mut self) -> Step<Option<Node>> {
        if !self.at(TokenKind::Word) {
            self.unexpected()?;
            self.synchronize()?;
            return Ok(None);
        }
        let name = self.bump()?;
        match self.current.kind {
            TokenKind::Equals => {
                let Some(assign) = self.assignment(name)? else {
                    self.synchronize()?;
                    return Ok(None);
                };
                if !self.terminator()? {
                    return Ok(None);
                }
                Ok(Some(Node::Assign(assign)))
            }
            TokenKind::LBrace | TokenKind::Word | TokenKind::String | TokenKind::Number => {
                let block = self.block(name)?;
                if self.at_terminator() {
                    self.bump()?;
                }
                Ok(block.map(Node::Block))
            }
            _ => {
                self.expected(&format!("'=' or '{{' after '{}'", name.text))?;
                self.synchronize()?;
                Ok(None)
            }
        }
    }

    /// Consumes a statement terminator. Reports and resynchronizes when it is
    /// missing; the statement before it is then dropped.
    fn terminator(&mut self) -> Step<bool> {
        if self.at_terminator() {
            self.bump()?;
            return Ok(true);
        }
        self.expected("';' or newline")?;
        self.synchronize()?;
        Ok(false)
    }

    /// assign := WORD '=' value
    fn assignment(&mut self, name: Token) -> Step<Option<Assign>> {
        let equals = self.bump()?;
        let Some(value) = self.value()? else {
            return Ok(None);
        };
        let value_locus = value.locus().unwrap_or(&equals.range);
        let locus = Range::merge(&[name.range.clone(), equals.range.clone(), value_locus.clone()], &self.previous);
        Ok(Some(Assign { name: name.text, value, locus: Some(locus) }))
    }

    /// value := scalar | '[' items ']'
    fn value(&mut self) -> Step<Option<Value>> {
        if let Some(scalar) = self.scalar()? {
            return Ok(Some(Value::Scalar(scalar)));
        }
        if self.malformed()? {
            return Ok(None);
        }
        if !self.at(TokenKind::LBracket) {
            self.expected("value")?;
            return Ok(None);
        }
        let open = self.bump()?;
        self.skip_newlines()?;
        let Some((items, items_locus)) = self.items()? else {
            return Ok(None);
        };
        self.skip_newlines()?;
        if !self.at(TokenKind::RBracket) {
            self.expected("',' or ']'")?;
            return Ok(None);
        }
        let close = self.bump()?;
        let locus = Range::merge(&[open.range, items_locus, close.range], &self.previous);
        Ok(Some(Value::List { items, locus: Some(locus) }))
    }

    /// items := ε | scalar (',' scalar)*
    fn items(&mut self) -> Step<Option<(Vec<Scalar>, Range)>> {
        let anchor = self.previous.clone();
        let mut items: Vec<Scalar> = Vec::new();
        let mut rhs = Vec::new();
        if self.at(TokenKind::RBracket) {
            return Ok(Some((items, Range::merge(&rhs, &anchor))));
        }
        loop {
            let Some(item) = self.scalar()? else {
                if self.malformed()? {
                    return Ok(None);
                }
                self.expected("value")?;
                return Ok(None);
            };
            if let Some(locus) = &item.locus {
                rhs.push(locus.clone());
            }
            items.push(item);
            self.skip_newlines()?;
            if !self.at(TokenKind::Comma) {
                break;
            }
            rhs.push(self.bump()?.range);
            self.skip_newlines()?;
        }
        Ok(Some((items, Range::merge(&rhs, &anchor))))
    }

    fn scalar(&mut self) -> Step<Option<Scalar>> {
        let kind = match self.current.kind {
            TokenKind::Word => ScalarKind::Word,
            TokenKind::String => ScalarKind::String,
            TokenKind::Number => ScalarKind::Number,
            _ => return Ok(None),
        };
        let token = self.bump()?;
        Ok(Some(Scalar { kind, text: token.text, locus: Some(token.range) }))
    }

    fn skip_newlines(&mut self) -> Step<()> {
        while self.at(TokenKind::Newline) {
            self.bump()?;
        }
        Ok(())
    }

    /// block := WORD [label] '{' stmts '}'
    fn block(&mut self, name: Token) -> Step<Option<Block>> {
        let label = self.scalar()?;
        if !self.at(TokenKind::LBrace) {
            self.expected(&format!("'{{' after '{}'", name.text))?;
            self.synchronize()?;
            return Ok(None);
        }
        if self.depth >= MAX_DEPTH {
            let locus = self.current.range.clone();
            self.budget.report(&locus, "blocks nested too deeply")?;
            self.synchronize()?;
            return Ok(None);
        }
        let open = self.bump()?;
        self.depth += 1;
        let body = self.statements(true);
        self.depth -= 1;
        let (nodes, body_locus) = body?;
        if !self.at(TokenKind::RBrace) {
            let message = format!("expected '}}' to close '{}' opened at {}", name.text, open.range.begin());
            let locus = self.here();
            self.budget.report(&locus, &message)?;
            return Ok(None);
        }
        let close = self.bump()?;
        let mut rhs = vec![name.range];
        if let Some(label) = label.as_ref().and_then(|l| l.locus.clone()) {
            rhs.push(label);
        }
        rhs.extend([open.range, body_locus.clone(), close.range]);
        let locus = Range::merge(&rhs, &self.previous);
        Ok(Some(Block { name: name.text, label, nodes, locus: Some(locus), body_locus: Some(body_locus) }))
    }
}
