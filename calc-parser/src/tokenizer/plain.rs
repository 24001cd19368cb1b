//! Tokens of the plain symbolic notation, such as `Integral(x**2, (x, 0, 1))`.

use logos::Logos;
use super::Kind;

/// The different kinds of tokens that can be produced by the plain tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("**")]
    Pow,

    #[token("^")]
    Caret,

    #[token("/")]
    Div,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl Kind for TokenKind {
    fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
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
    fn power_operators() {
        compare_tokens(
            "x**2 + y^0.5",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Pow, "**"),
                (TokenKind::Number, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
                (TokenKind::Caret, "^"),
                (TokenKind::Number, "0.5"),
            ],
        );
    }

    #[test]
    fn calculus_call() {
        compare_tokens(
            "Sum(n_1, (n_1, 1, oo))",
            [
                (TokenKind::Name, "Sum"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "n_1"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "n_1"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "1"),
                (TokenKind::Comma, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "oo"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::CloseParen, ")"),
            ],
        );
    }
}
