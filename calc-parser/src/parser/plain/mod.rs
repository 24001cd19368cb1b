//! Recursive-descent grammar for the plain notation, such as `x**2 + 2*x` or
//! `Integral(sin(x), (x, 0, pi))`.
//!
//! There is no implicit multiplication; `^` and `**` both mean exponentiation.

mod calculus;

use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            expr::Expr,
            literal::{Constant, LitConst, LitNum, LitSym, Literal},
            paren::Paren,
            unary::Unary,
        },
        error::{kind, Error},
        token::op::{BinOp, BinOpKind},
        Parse,
        Parser,
    },
    tokenizer::{plain::TokenKind, Token},
};
use std::ops::Range;

/// A parser over plain tokens.
pub type PlainParser<'source> = Parser<'source, TokenKind>;

impl<'source> Parse<'source, TokenKind> for Expr {
    fn parse(input: &mut PlainParser<'source>) -> Result<Self, Error> {
        parse_expr(input)
    }
}

/// An argument of a call: either an expression, or a tuple used as a limit of a calculus call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Argument {
    Expr(Expr),
    Tuple(Vec<Expr>, Range<usize>),
}

/// Parses a sum of terms.
fn parse_expr(input: &mut PlainParser) -> Result<Expr, Error> {
    let mut lhs = parse_term(input)?;

    loop {
        let kind = match input.peek_kind() {
            Some(TokenKind::Add) => BinOpKind::Add,
            Some(TokenKind::Sub) => BinOpKind::Sub,
            _ => break,
        };
        let op = input.next_token()?;
        let rhs = parse_term(input)?;
        lhs = Expr::Binary(Binary::new(lhs, BinOp::new(kind, op.span), rhs));
    }

    Ok(lhs)
}

/// Parses a product or quotient of factors.
fn parse_term(input: &mut PlainParser) -> Result<Expr, Error> {
    let mut lhs = parse_unary(input)?;

    loop {
        let kind = match input.peek_kind() {
            Some(TokenKind::Mul) => BinOpKind::Mul,
            Some(TokenKind::Div) => BinOpKind::Div,
            _ => break,
        };
        let op = input.next_token()?;
        let rhs = parse_unary(input)?;
        lhs = Expr::Binary(Binary::new(lhs, BinOp::new(kind, op.span), rhs));
    }

    Ok(lhs)
}

/// Parses a signed factor. The sign binds more loosely than exponentiation, so `-x**2` is
/// `-(x**2)`.
fn parse_unary(input: &mut PlainParser) -> Result<Expr, Error> {
    input.nested(|input| match input.peek_kind() {
        Some(TokenKind::Sub) => {
            let op = input.next_token()?;
            let operand = parse_unary(input)?;
            Ok(Expr::Unary(Unary::neg(op.span, operand)))
        },
        Some(TokenKind::Add) => {
            input.next_token()?;
            parse_unary(input)
        },
        _ => parse_power(input),
    })
}

/// Parses a power. Exponentiation is right-associative.
fn parse_power(input: &mut PlainParser) -> Result<Expr, Error> {
    let base = parse_atom(input)?;
    match input.peek_kind() {
        Some(TokenKind::Pow | TokenKind::Caret) => {
            let op = input.next_token()?;
            let exponent = parse_unary(input)?;
            Ok(Expr::Binary(Binary::new(base, BinOp::new(BinOpKind::Exp, op.span), exponent)))
        },
        _ => Ok(base),
    }
}

/// Parses a number, a name, a call or a parenthesized expression.
fn parse_atom(input: &mut PlainParser) -> Result<Expr, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Number => Ok(Expr::Literal(Literal::Number(LitNum {
            value: normalize_number(token.lexeme),
            span: token.span,
        }))),
        TokenKind::Name => {
            if input.next_is(TokenKind::OpenParen) {
                parse_call(input, token)
            } else {
                Ok(name(&token))
            }
        },
        TokenKind::OpenParen => {
            let expr = parse_expr(input)?;
            let close = input.eat(TokenKind::CloseParen)
                .ok_or_else(|| Error::new(vec![token.span.clone()], kind::UnclosedGroup { closer: "`)`" }))?;
            Ok(Expr::Paren(Paren {
                expr: Box::new(expr),
                span: token.span.start..close.span.end,
            }))
        },
        _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: "an expression",
            found: token.lexeme.to_string(),
        })),
    }
}

/// Writes a number literal with digits on both sides of the decimal point, so that `.5` and `2.`
/// become `0.5` and `2`.
fn normalize_number(lexeme: &str) -> String {
    let lexeme = lexeme.strip_suffix('.').unwrap_or(lexeme);
    if lexeme.starts_with('.') {
        format!("0{}", lexeme)
    } else {
        lexeme.to_string()
    }
}

/// Creates the literal for a bare name. `pi`, `E` and `oo` are constants.
fn name(token: &Token<TokenKind>) -> Expr {
    let constant = match token.lexeme {
        "pi" => Some(Constant::Pi),
        "E" => Some(Constant::E),
        "oo" => Some(Constant::Infinity),
        _ => None,
    };
    match constant {
        Some(constant) => Expr::Literal(Literal::Constant(LitConst {
            constant,
            span: token.span.clone(),
        })),
        None => Expr::Literal(Literal::Symbol(LitSym {
            name: token.lexeme.to_string(),
            span: token.span.clone(),
        })),
    }
}

/// Normalizes the name of a function, so that both notations produce the same calls.
fn function_name(name: &str) -> &str {
    match name {
        "ln" => "log",
        "arcsin" => "asin",
        "arccos" => "acos",
        "arctan" => "atan",
        name => name,
    }
}

/// Parses a call after the function name, such as `sin(x)` or `Integral(x, x)`.
fn parse_call(input: &mut PlainParser, name: Token<TokenKind>) -> Result<Expr, Error> {
    let (args, close) = parse_arguments(input)?;
    let span = name.span.start..close;

    match name.lexeme {
        "Integral" => calculus::build_integral(name, args, span),
        "Derivative" => calculus::build_derivative(name, args, span),
        "Sum" => calculus::build_sum(name, args, span),
        function => {
            let args = args.into_iter()
                .map(|arg| match arg {
                    Argument::Expr(expr) => Ok(expr),
                    Argument::Tuple(_, span) => Err(Error::new(vec![span], kind::UnexpectedTuple)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call(Call {
                name: LitSym { name: function_name(function).to_string(), span: name.span.clone() },
                args,
                span,
            }))
        },
    }
}

/// Parses a parenthesized, comma-separated argument list, returning the arguments and the end
/// of the closing parenthesis.
fn parse_arguments(input: &mut PlainParser) -> Result<(Vec<Argument>, usize), Error> {
    let open = input.expect(TokenKind::OpenParen, "`(`")?;
    let mut args = Vec::new();

    if let Some(close) = input.eat(TokenKind::CloseParen) {
        return Ok((args, close.span.end));
    }

    loop {
        let arg = match input.try_parse_with_fn(parse_tuple) {
            Ok(tuple) => tuple,
            Err(err) if err.fatal => return Err(err),
            Err(_) => Argument::Expr(parse_expr(input)?),
        };
        args.push(arg);

        if input.eat(TokenKind::Comma).is_some() {
            continue;
        }
        return match input.eat(TokenKind::CloseParen) {
            Some(close) => Ok((args, close.span.end)),
            None => Err(Error::new(vec![open.span], kind::UnclosedGroup { closer: "`)`" })),
        };
    }
}

/// Parses a tuple of at least two expressions, such as `(x, 0, 1)`.
fn parse_tuple(input: &mut PlainParser) -> Result<Argument, Error> {
    let open = input.expect(TokenKind::OpenParen, "`(`")?;
    let mut items = vec![parse_expr(input)?];
    while input.eat(TokenKind::Comma).is_some() {
        items.push(parse_expr(input)?);
    }
    let close = input.expect(TokenKind::CloseParen, "`)`")?;

    if items.len() < 2 {
        return Err(Error::new(vec![open.span], kind::UnexpectedToken {
            expected: "a tuple",
            found: "(".to_string(),
        }));
    }
    Ok(Argument::Tuple(items, open.span.start..close.span.end))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parse_plain;

    /// Parses the input and formats the tree again.
    fn display(input: &str) -> String {
        parse_plain(input).unwrap().to_string()
    }

    /// Parses the input, which must fail, and returns the error message.
    fn error(input: &str) -> String {
        parse_plain(input).unwrap_err().to_string()
    }

    #[test]
    fn negated_power() {
        let expr = parse_plain("-x**2").unwrap();

        assert_eq!(expr, Expr::Unary(Unary::neg(0..1, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                name: "x".to_string(),
                span: 1..2,
            }))),
            op: BinOp::new(BinOpKind::Exp, 2..4),
            rhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: "2".to_string(),
                span: 4..5,
            }))),
            span: 1..5,
        }))));
    }

    #[test]
    fn arithmetic() {
        assert_eq!(display("x**2 + 2*x"), "x**2 + 2*x");
        assert_eq!(display("2^3^2"), "2**3**2");
        assert_eq!(display(".5*x"), "0.5*x");
        assert_eq!(display("ln(x) + E + pi"), "log(x) + E + pi");
    }

    #[test]
    fn calculus_calls() {
        assert_eq!(display("Integral(x**2, (x, 0, 1))"), "Integral(x**2, (x, 0, 1))");
        assert_eq!(display("Integral(x*y, x, y)"), "Integral(Integral(x*y, x), y)");
        assert_eq!(display("Derivative(sin(x), x, 2)"), "Derivative(sin(x), x, 2)");
        assert_eq!(display("Derivative(f(x), (x, 3))"), "Derivative(f(x), x, 3)");
        assert_eq!(display("Sum(1/2**n, (n, 0, oo))"), "Sum(1/2**n, (n, 0, oo))");
    }

    #[test]
    fn call_errors() {
        assert_eq!(error("Integral(x)"), "`Integral` takes at least 2 arguments, but 1 were given");
        assert_eq!(error("Sum(n, n)"), "invalid limit");
        assert_eq!(error("sin((x, 1))"), "unexpected tuple");
        assert_eq!(error("Derivative(x, x, 0)"), "invalid derivative order");
    }

    #[test]
    fn no_implicit_multiplication() {
        assert_eq!(error("2x"), "expected end of input");
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(error(&deep), "expression is nested too deeply");
        assert_eq!(error(&format!("{}x", "-".repeat(10_000))), "expression is nested too deeply");

        let err = parse_plain(&deep).unwrap_err();
        assert!(err.fatal);

        let shallow = format!("sin({}x{})", "(".repeat(50), ")".repeat(50));
        assert!(parse_plain(&shallow).is_ok());
    }
}
