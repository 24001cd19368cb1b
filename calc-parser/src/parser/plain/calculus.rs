//! The calculus calls of the plain notation: `Integral`, `Derivative` and `Sum`.
//!
//! Calls with several limits nest, innermost first, so `Integral(f, x, y)` integrates over `x`,
//! then over `y`.

use crate::{
    parser::{
        ast::{
            calculus::{Bounds, Derivative, Integral, Sum},
            expr::Expr,
            literal::{LitSym, Literal},
        },
        error::{kind, Error},
    },
    tokenizer::{plain::TokenKind, Token},
};
use std::{iter::Peekable, ops::Range, vec::IntoIter};
use super::Argument;

/// Splits the arguments of a calculus call into the expression and its limits, checking that
/// there is at least one limit.
fn split_arguments(
    name: &Token<TokenKind>,
    args: Vec<Argument>,
    expected: &'static str,
) -> Result<(Expr, Peekable<IntoIter<Argument>>), Error> {
    let given = args.len();
    let mut args = args.into_iter();
    let expr = match args.next() {
        Some(Argument::Expr(expr)) if given >= 2 => expr,
        Some(Argument::Tuple(_, span)) => return Err(Error::new(vec![span], kind::UnexpectedTuple)),
        _ => return Err(Error::new(vec![name.span.clone()], kind::WrongArgumentCount {
            name: name.lexeme.to_string(),
            expected,
            given,
        })),
    };
    Ok((expr, args.peekable()))
}

/// Extracts the symbol from an expression used as a limit variable.
fn symbol(expr: Expr) -> Result<LitSym, Error> {
    match expr {
        Expr::Literal(Literal::Symbol(sym)) => Ok(sym),
        expr => Err(Error::new(vec![expr.span()], kind::InvalidLimit { expected: "a symbol" })),
    }
}

/// Extracts the order of a derivative from a number literal.
fn derivative_order(expr: Expr) -> Result<u32, Error> {
    let span = expr.span();
    match expr {
        Expr::Literal(Literal::Number(num)) => match num.value.parse::<u32>() {
            Ok(order) if order > 0 => Ok(order),
            _ => Err(Error::new(vec![span], kind::InvalidDerivativeOrder)),
        },
        _ => Err(Error::new(vec![span], kind::InvalidDerivativeOrder)),
    }
}

/// Splits a tuple limit into its variable and bounds, like `(x, 0, 1)`.
fn bounded_limit(items: Vec<Expr>, span: Range<usize>) -> Result<(LitSym, Bounds), Error> {
    let mut items = items.into_iter();
    match (items.next(), items.next(), items.next(), items.next()) {
        (Some(variable), Some(lower), Some(upper), None) => Ok((symbol(variable)?, Bounds::new(lower, upper))),
        _ => Err(Error::new(vec![span], kind::InvalidLimit {
            expected: "a tuple like `(x, 0, 1)`",
        })),
    }
}

/// Builds `Integral(f, x)` or `Integral(f, (x, a, b))`.
pub(crate) fn build_integral(
    name: Token<TokenKind>,
    args: Vec<Argument>,
    span: Range<usize>,
) -> Result<Expr, Error> {
    let (mut expr, limits) = split_arguments(&name, args, "at least 2")?;

    for limit in limits {
        let (variable, bounds) = match limit {
            Argument::Expr(variable) => (symbol(variable)?, None),
            Argument::Tuple(items, span) => {
                let (variable, bounds) = bounded_limit(items, span)?;
                (variable, Some(bounds))
            },
        };
        expr = Expr::Integral(Integral {
            integrand: Box::new(expr),
            variable,
            bounds,
            span: span.clone(),
        });
    }

    Ok(expr)
}

/// Builds `Derivative(f, x)`, `Derivative(f, x, n)` or `Derivative(f, (x, n))`.
pub(crate) fn build_derivative(
    name: Token<TokenKind>,
    args: Vec<Argument>,
    span: Range<usize>,
) -> Result<Expr, Error> {
    let (mut expr, mut limits) = split_arguments(&name, args, "at least 2")?;

    while let Some(limit) = limits.next() {
        let (variable, order) = match limit {
            Argument::Expr(variable) => {
                let variable = symbol(variable)?;
                let order = match limits.peek() {
                    Some(Argument::Expr(Expr::Literal(Literal::Number(_)))) => match limits.next() {
                        Some(Argument::Expr(order_expr)) => derivative_order(order_expr)?,
                        _ => 1,
                    },
                    _ => 1,
                };
                (variable, order)
            },
            Argument::Tuple(items, span) => {
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(variable), Some(order_expr), None) => (symbol(variable)?, derivative_order(order_expr)?),
                    _ => return Err(Error::new(vec![span], kind::InvalidLimit {
                        expected: "a tuple like `(x, 2)`",
                    })),
                }
            },
        };
        expr = Expr::Derivative(Derivative {
            expr: Box::new(expr),
            variable,
            order,
            span: span.clone(),
        });
    }

    Ok(expr)
}

/// Builds `Sum(f, (n, a, b))`.
pub(crate) fn build_sum(
    name: Token<TokenKind>,
    args: Vec<Argument>,
    span: Range<usize>,
) -> Result<Expr, Error> {
    let (mut expr, limits) = split_arguments(&name, args, "at least 2")?;

    for limit in limits {
        let (variable, bounds) = match limit {
            Argument::Tuple(items, span) => bounded_limit(items, span)?,
            Argument::Expr(expr) => return Err(Error::new(vec![expr.span()], kind::InvalidLimit {
                expected: "a tuple like `(n, 1, 10)`",
            })),
        };
        expr = Expr::Sum(Sum {
            summand: Box::new(expr),
            variable,
            bounds,
            span: span.clone(),
        });
    }

    Ok(expr)
}
