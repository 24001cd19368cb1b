//! Parsers for calculus expressions written in LaTeX, such as `\int_0^1 x^2 \, dx`, or in a plain
//! symbolic notation, such as `Integral(x**2, (x, 0, 1))`.
//!
//! Both notations produce the same [`ast::Expr`] tree, where every node carries the span of the
//! source it was parsed from. Errors carry spans too, and can be rendered with [`ariadne`]
//! through [`Error::build_report`].

pub mod parser;
pub mod tokenizer;

pub use parser::{ast, error::{Error, ErrorKind}, Parser};

use tokenizer::{latex, plain};

/// Parses the whole input as LaTeX.
pub fn parse_latex(input: &str) -> Result<ast::Expr, Error> {
    let result = Parser::<latex::TokenKind>::new(input).try_parse_full::<ast::Expr>();
    if let Err(err) = &result {
        log::trace!("input is not valid LaTeX: {}", err);
    }
    result
}

/// Parses the whole input with the plain symbolic notation.
pub fn parse_plain(input: &str) -> Result<ast::Expr, Error> {
    let result = Parser::<plain::TokenKind>::new(input).try_parse_full::<ast::Expr>();
    if let Err(err) = &result {
        log::trace!("input is not valid plain notation: {}", err);
    }
    result
}
