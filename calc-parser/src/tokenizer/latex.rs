//! Tokens of the LaTeX notation.

use logos::Logos;
use super::Kind;

/// The different kinds of tokens that can be produced by the LaTeX tokenizer.
///
/// Letters are tokenized one at a time, since `xy` means `x` times `y` in LaTeX.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"\\[,;:! ]")]
    #[token(r"\quad")]
    #[token(r"\qquad")]
    Space,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Caret,

    #[token("_")]
    Underscore,

    #[token("=")]
    Eq,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    #[regex(r"[a-zA-Z]")]
    Letter,

    #[regex(r"\\[a-zA-Z]+")]
    Command,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl Kind for TokenKind {
    fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Space)
    }

    fn unknown() -> Self {
        TokenKind::Symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = TokenKind::lexer(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn derivative_operator() {
        compare_tokens(
            r"\frac{d}{dx} x^2",
            [
                (TokenKind::Command, r"\frac"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Letter, "d"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Letter, "d"),
                (TokenKind::Letter, "x"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Letter, "x"),
                (TokenKind::Caret, "^"),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn spacing_commands() {
        compare_tokens(
            r"\int_0^{1.5} x \, \mathrm{d}x\quad",
            [
                (TokenKind::Command, r"\int"),
                (TokenKind::Underscore, "_"),
                (TokenKind::Number, "0"),
                (TokenKind::Caret, "^"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Number, "1.5"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Letter, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Space, r"\,"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Command, r"\mathrm"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Letter, "d"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Letter, "x"),
                (TokenKind::Space, r"\quad"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        compare_tokens(
            r"x $ \",
            [
                (TokenKind::Letter, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, r"\"),
            ],
        );
    }
}
