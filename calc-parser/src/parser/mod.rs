pub mod ast;
pub mod error;
pub mod fmt;
pub mod latex;
pub mod plain;
pub mod token;

use error::{kind, Error, ErrorKind};
use logos::Logos;
use super::tokenizer::{tokenize_complete, Kind, Token};
use std::ops::Range;

/// How deeply groups, signs and function applications may nest before parsing gives up.
pub const MAX_DEPTH: usize = 128;

/// Context that changes how some tokens are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Whether the parser is reading the integrand of an integral, where `d` followed by a
    /// variable is the differential that ends the integrand, not a product.
    pub in_integrand: bool,
}

/// A high-level parser for one of the notations. This is the type to use to parse an arbitrary
/// piece of input into an abstract syntax tree.
///
/// The token kind `K` decides the notation; [`Expr`](ast::expr::Expr) implements [`Parse`] for
/// each of them.
#[derive(Debug, Clone)]
pub struct Parser<'source, K> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source, K>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The current parsing context.
    state: ParserState,

    /// How many nested calls to [`Parser::nested`] are running.
    depth: usize,
}

impl<'source, K> Parser<'source, K>
where
    K: Kind + Logos<'source, Source = str>,
    K::Extras: Default,
{
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            state: ParserState::default(),
            depth: 0,
        }
    }
}

impl<'source, K: Kind> Parser<'source, K> {
    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Creates a fatal error that points at the current token, or the end of the source code if
    /// the cursor is at the end of the stream.
    pub fn error_fatal(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new_fatal(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the position where the previously consumed token ended.
    pub fn prev_end(&self) -> usize {
        self.cursor.checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(0, |token| token.span.end)
    }

    /// Returns the index of the next token to be parsed.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor back to a position previously returned by [`Parser::cursor`].
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.tokens.len());
    }

    /// Returns the current parsing context.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Runs the given parsing function with a different context, restoring the previous context
    /// afterwards.
    pub fn with_state<T, F>(&mut self, state: ParserState, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let previous = std::mem::replace(&mut self.state, state);
        let result = f(self);
        self.state = previous;
        result
    }

    /// Runs a parsing function that may recurse back into the grammar. Past [`MAX_DEPTH`] levels,
    /// a fatal error is returned instead.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_fatal(kind::NestedTooDeeply { limit: MAX_DEPTH }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source, K>> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<K> {
        self.peek_token().map(|token| token.kind)
    }

    /// Returns true if the next non-whitespace token is of the given kind.
    pub fn next_is(&self, kind: K) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source, K>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Consumes the next token if it has the given kind.
    pub fn eat(&mut self, kind: K) -> Option<Token<'source, K>> {
        if self.next_is(kind) {
            self.next_token().ok()
        } else {
            None
        }
    }

    /// Consumes the next token, which must have the given kind. `expected` describes the token
    /// in the error message otherwise.
    pub fn expect(&mut self, kind: K, expected: &'static str) -> Result<Token<'source, K>, Error> {
        let token = self.next_token()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected,
                found: token.lexeme.to_string(),
            }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse<'source, K>>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Runs the given parsing function and reports whether it would succeed, without consuming
    /// anything.
    pub fn lookahead<T, F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let start = self.cursor;
        let found = f(self).is_ok();
        self.cursor = start;
        found
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse<'source, K>>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        if self.peek_token().is_none() {
            Ok(value)
        } else {
            let end = self.eof_span().end;
            Err(Error::new(vec![self.span().start..end], kind::ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens of kind `K`.
pub trait Parse<'source, K>: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser<'source, K>) -> Result<Self, Error>;
}

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// `a op b op c` is evaluated as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary subtraction (`-`).
    Neg,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Precedence of atoms: literals, groups, calls and calculus operators.
    Atom,
}
