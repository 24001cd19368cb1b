pub mod latex;
pub mod plain;

use logos::Logos;
use std::{fmt::Debug, ops::Range};

/// Behavior shared by the token kinds of every notation the parser understands.
pub trait Kind: Copy + Debug + PartialEq {
    /// Returns true if the token represents whitespace.
    fn is_whitespace(self) -> bool;

    /// The kind given to input that the lexer could not match.
    fn unknown() -> Self;
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source, K> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: K,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl<K: Kind> Token<'_, K> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
pub fn tokenize_complete<'source, K>(input: &'source str) -> Box<[Token<'source, K>]>
where
    K: Kind + Logos<'source, Source = str>,
    K::Extras: Default,
{
    let mut lexer = K::lexer(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or_else(|_| K::unknown()),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn complete_spans() {
        let tokens = tokenize_complete::<latex::TokenKind>(r"\int x\,dx");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..4, 4..5, 5..6, 6..8, 8..9, 9..10]);
        assert!(tokens[1].is_whitespace());
        assert!(tokens[3].is_whitespace());
    }
}
