//! Integrals, sums and derivative operators in LaTeX notation.

use crate::{
    parser::{
        ast::{
            calculus::{Bounds, Derivative, Integral, Sum},
            expr::Expr,
            literal::{LitNum, LitSym, Literal},
        },
        error::{kind, Error},
        ParserState,
    },
    tokenizer::{latex::TokenKind, Token},
};
use std::ops::Range;
use super::{command, expect_closer, parse_expr, parse_script, parse_term, LatexParser};

/// A derivative operator, such as `\frac{d}{dx}`, `\frac{d^2}{dx^2}` or `\frac{dy}{dx}`.
#[derive(Debug)]
pub(crate) struct DerivativeOperator {
    /// The expression written in the numerator, as in `\frac{dy}{dx}`. If absent, the operator
    /// applies to the rest of the term.
    expr: Option<Expr>,

    /// The variable to differentiate with respect to.
    variable: LitSym,

    /// The order of the derivative.
    order: u32,

    /// The region of the source code that the operator was parsed from.
    span: Range<usize>,
}

/// Parses a derivative operator. Errors are non-fatal unless the input is unmistakably a
/// malformed derivative, so that the caller can fall back to parsing an ordinary fraction.
pub(crate) fn parse_derivative_operator(input: &mut LatexParser) -> Result<DerivativeOperator, Error> {
    let frac = input.next_token()?;
    if !matches!(frac.lexeme, r"\frac" | r"\dfrac" | r"\tfrac") {
        return Err(Error::new(vec![frac.span], kind::UnexpectedToken {
            expected: "a derivative operator",
            found: frac.lexeme.to_string(),
        }));
    }

    input.expect(TokenKind::OpenBrace, "`{`")?;
    parse_d(input)?;
    let numerator_order = parse_order(input)?;
    let expr = if input.next_is(TokenKind::CloseBrace) {
        None
    } else {
        Some(parse_expr(input)?)
    };
    input.expect(TokenKind::CloseBrace, "`}`")?;

    input.expect(TokenKind::OpenBrace, "`{`")?;
    parse_d(input)?;
    let variable = parse_variable(input)?;
    let denominator_order = parse_order(input)?;
    let close = input.expect(TokenKind::CloseBrace, "`}`")?;

    let span = frac.span.start..close.span.end;
    let order = match (numerator_order, denominator_order) {
        (Some(numerator), Some(denominator)) if numerator != denominator => {
            return Err(Error::new_fatal(vec![span], kind::DerivativeOrderMismatch {
                numerator,
                denominator,
            }));
        },
        (Some(order), _) | (None, Some(order)) => order,
        (None, None) => 1,
    };
    if order == 0 {
        return Err(Error::new_fatal(vec![span], kind::InvalidDerivativeOrder));
    }

    Ok(DerivativeOperator { expr, variable, order, span })
}

/// Builds the derivative for a parsed operator. An operator without its own expression takes
/// the rest of the current term as its operand.
pub(crate) fn apply_derivative_operator(
    input: &mut LatexParser,
    operator: DerivativeOperator,
) -> Result<Expr, Error> {
    let expr = match operator.expr {
        Some(expr) => expr,
        None => parse_term(input)?,
    };
    let span = operator.span.start..expr.span().end.max(operator.span.end);
    Ok(Expr::Derivative(Derivative {
        expr: Box::new(expr),
        variable: operator.variable,
        order: operator.order,
        span,
    }))
}

/// Parses the `d` of a derivative or differential: `d`, `\mathrm{d}` or `\partial`.
fn parse_d(input: &mut LatexParser) -> Result<Range<usize>, Error> {
    let token = input.next_token()?;
    match (token.kind, token.lexeme) {
        (TokenKind::Letter, "d") | (TokenKind::Command, r"\partial") => Ok(token.span),
        (TokenKind::Command, r"\mathrm") => {
            input.expect(TokenKind::OpenBrace, "`{`")?;
            let d = input.next_token()?;
            if d.lexeme != "d" {
                return Err(unexpected(&d, "`d`"));
            }
            let close = input.expect(TokenKind::CloseBrace, "`}`")?;
            Ok(token.span.start..close.span.end)
        },
        _ => Err(unexpected(&token, "`d`")),
    }
}

/// Parses the optional order written after the `d` of a derivative, as in `d^2` or `dx^{3}`.
fn parse_order(input: &mut LatexParser) -> Result<Option<u32>, Error> {
    if input.eat(TokenKind::Caret).is_none() {
        return Ok(None);
    }

    let braced = input.eat(TokenKind::OpenBrace);
    let token = input.next_token()?;
    if token.kind != TokenKind::Number {
        return Err(unexpected(&token, "the order of the derivative"));
    }
    let order = token.lexeme.parse::<u32>()
        .map_err(|_| Error::new_fatal(vec![token.span.clone()], kind::InvalidDerivativeOrder))?;
    if braced.is_some() {
        input.expect(TokenKind::CloseBrace, "`}`")?;
    }
    Ok(Some(order))
}

/// Parses the variable named by a derivative or differential: a letter, or a Greek letter
/// command.
fn parse_variable(input: &mut LatexParser) -> Result<LitSym, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Letter => Ok(LitSym { name: token.lexeme.to_string(), span: token.span }),
        TokenKind::Command => match command::greek_letter(&token.lexeme[1..]) {
            Some(name) => Ok(LitSym { name: name.to_string(), span: token.span }),
            None => Err(unexpected(&token, "a variable")),
        },
        _ => Err(unexpected(&token, "a variable")),
    }
}

/// The differential ending an integrand, such as `dx` or `\mathrm{d}\theta`.
#[derive(Debug)]
pub(crate) struct Differential {
    /// The variable of integration.
    variable: LitSym,

    /// The region of the source code that the differential was parsed from.
    span: Range<usize>,
}

/// Parses a differential.
pub(crate) fn parse_differential(input: &mut LatexParser) -> Result<Differential, Error> {
    let d = parse_d(input)?;
    let variable = parse_variable(input)?;
    let span = d.start..variable.span.end;
    Ok(Differential { variable, span })
}

/// Parses the optional `_lower` and `^upper` scripts after `\int` or `\sum`, in either order.
fn parse_limits<T>(
    input: &mut LatexParser,
    mut parse_lower: impl FnMut(&mut LatexParser) -> Result<T, Error>,
) -> Result<(Option<T>, Option<Expr>), Error> {
    let mut lower = None;
    let mut upper = None;

    loop {
        match input.peek_kind() {
            Some(TokenKind::Underscore) if lower.is_none() => {
                input.next_token()?;
                lower = Some(parse_lower(input)?);
            },
            Some(TokenKind::Caret) if upper.is_none() => {
                input.next_token()?;
                upper = Some(parse_script(input)?);
            },
            _ => break,
        }
    }

    Ok((lower, upper))
}

/// Parses an integral after the `\int` command.
pub(crate) fn parse_integral(input: &mut LatexParser, int: Token<TokenKind>) -> Result<Expr, Error> {
    let bounds = match parse_limits(input, parse_script)? {
        (Some(lower), Some(upper)) => Some(Bounds::new(lower, upper)),
        (None, None) => None,
        _ => return Err(Error::new(vec![int.span], kind::IncompleteBounds)),
    };

    let integrand = input.with_state(ParserState { in_integrand: true }, |input| {
        if input.lookahead(parse_differential) {
            Ok(None)
        } else {
            parse_expr(input).map(Some)
        }
    })?;

    let differential = input.try_parse_with_fn(parse_differential)
        .map_err(|_| Error::new(
            vec![int.span.start..input.prev_end()],
            kind::MissingDifferential,
        ))?;

    // `\int dx` integrates the constant 1
    let integrand = integrand.unwrap_or_else(|| Expr::Literal(Literal::Number(LitNum {
        value: "1".to_string(),
        span: differential.span.clone(),
    })));

    Ok(Expr::Integral(Integral {
        integrand: Box::new(integrand),
        variable: differential.variable,
        bounds,
        span: int.span.start..differential.span.end,
    }))
}

/// Parses the index and lower bound of a sum, such as `{n=1}`.
fn parse_sum_index(input: &mut LatexParser) -> Result<(LitSym, Expr), Error> {
    let open = input.expect(TokenKind::OpenBrace, "`{`")?;
    let variable = parse_variable(input)?;
    input.expect(TokenKind::Eq, "`=`")?;
    let lower = parse_expr(input)?;
    expect_closer(input, &open, TokenKind::CloseBrace, "`}`")?;
    Ok((variable, lower))
}

/// Parses a sum after the `\sum` command.
pub(crate) fn parse_sum(input: &mut LatexParser, sum: Token<TokenKind>) -> Result<Expr, Error> {
    let ((variable, lower), upper) = match parse_limits(input, parse_sum_index)? {
        (Some(index), Some(upper)) => (index, upper),
        _ => return Err(Error::new(vec![sum.span], kind::MissingSumBounds)),
    };

    let summand = parse_term(input)?;
    let span = sum.span.start..summand.span().end;
    Ok(Expr::Sum(Sum {
        summand: Box::new(summand),
        variable,
        bounds: Bounds::new(lower, upper),
        span,
    }))
}

/// Creates an unexpected token error for the given token.
fn unexpected(token: &Token<TokenKind>, expected: &'static str) -> Error {
    Error::new(vec![token.span.clone()], kind::UnexpectedToken {
        expected,
        found: token.lexeme.to_string(),
    })
}
