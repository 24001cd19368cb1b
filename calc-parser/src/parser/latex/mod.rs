//! Recursive-descent grammar for the LaTeX notation.
//!
//! The grammar follows the way people write calculus homework in LaTeX:
//!
//! - juxtaposition is multiplication, so `2x \sin x` is `2 * x * sin(x)`;
//! - a derivative operator such as `\frac{d}{dx}` applies to the rest of the multiplicative term
//!   it appears in;
//! - the integrand of `\int` extends up to the differential `dx`;
//! - the summand of `\sum` is the multiplicative term after the bounds.

mod calculus;
mod command;

use crate::{
    parser::{
        ast::{
            binary::Binary,
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
    tokenizer::{latex::TokenKind, Token},
};

/// A parser over LaTeX tokens.
pub type LatexParser<'source> = Parser<'source, TokenKind>;

impl<'source> Parse<'source, TokenKind> for Expr {
    fn parse(input: &mut LatexParser<'source>) -> Result<Self, Error> {
        parse_expr(input)
    }
}

/// Parses a sum of terms, such as `x^2 + 2x - 1`.
pub(crate) fn parse_expr(input: &mut LatexParser) -> Result<Expr, Error> {
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

/// Parses a product of factors, either explicit (`a \cdot b`, `a / b`) or implicit (`2x`).
pub(crate) fn parse_term(input: &mut LatexParser) -> Result<Expr, Error> {
    let mut lhs = parse_factor(input, true)?;

    loop {
        if let Some(kind) = peek_explicit_product(input) {
            let op = input.next_token()?;
            let rhs = parse_factor(input, true)?;
            lhs = Expr::Binary(Binary::new(lhs, BinOp::new(kind, op.span), rhs));
        } else if starts_implicit_operand(input) {
            let gap = input.prev_end()..input.span().start;
            let rhs = parse_factor(input, false)?;
            lhs = Expr::Binary(Binary::new(lhs, BinOp::implicit_mul(gap), rhs));
        } else {
            break;
        }
    }

    Ok(lhs)
}

/// Parses one factor of a product. A derivative operator found here consumes the rest of the
/// term as its operand.
fn parse_factor(input: &mut LatexParser, allow_sign: bool) -> Result<Expr, Error> {
    input.nested(|input| {
        match input.try_parse_with_fn(calculus::parse_derivative_operator) {
            Ok(operator) => return calculus::apply_derivative_operator(input, operator),
            Err(err) if err.fatal => return Err(err),
            Err(_) => {},
        }

        if allow_sign {
            parse_unary(input)
        } else {
            parse_power(input)
        }
    })
}

/// Parses a signed factor, such as `-x^2`.
fn parse_unary(input: &mut LatexParser) -> Result<Expr, Error> {
    match input.peek_kind() {
        Some(TokenKind::Sub) => {
            let op = input.next_token()?;
            let operand = parse_factor(input, true)?;
            Ok(Expr::Unary(Unary::neg(op.span, operand)))
        },
        Some(TokenKind::Add) => {
            input.next_token()?;
            parse_factor(input, true)
        },
        _ => parse_power(input),
    }
}

/// Parses a power with any number of leading signs, without trying a derivative operator.
pub(crate) fn parse_unary_operand(input: &mut LatexParser) -> Result<Expr, Error> {
    match input.eat(TokenKind::Sub) {
        Some(op) => {
            let operand = input.nested(parse_unary_operand)?;
            Ok(Expr::Unary(Unary::neg(op.span, operand)))
        },
        None => parse_power(input),
    }
}

/// Parses an atom with an optional superscript, such as `x^2` or `e^{2x}`.
pub(crate) fn parse_power(input: &mut LatexParser) -> Result<Expr, Error> {
    let base = parse_atom(input)?;
    parse_superscript(input, base)
}

/// Parses an optional superscript applied to the given base.
pub(crate) fn parse_superscript(input: &mut LatexParser, base: Expr) -> Result<Expr, Error> {
    match input.eat(TokenKind::Caret) {
        Some(caret) => {
            let exponent = parse_script(input)?;
            Ok(Expr::Binary(Binary::new(base, BinOp::new(BinOpKind::Exp, caret.span), exponent)))
        },
        None => Ok(base),
    }
}

/// Parses the argument of a `^` or `_`: a braced group, or a single token.
pub(crate) fn parse_script(input: &mut LatexParser) -> Result<Expr, Error> {
    input.nested(|input| match input.peek_kind() {
        Some(TokenKind::OpenBrace) => {
            let open = input.next_token()?;
            parse_brace_group(input, open)
        },
        Some(TokenKind::Sub) => {
            let op = input.next_token()?;
            let operand = parse_script(input)?;
            Ok(Expr::Unary(Unary::neg(op.span, operand)))
        },
        Some(TokenKind::Number) => {
            let token = input.next_token()?;
            Ok(number(&token))
        },
        Some(TokenKind::Letter) => {
            let token = input.next_token()?;
            Ok(letter(&token))
        },
        Some(TokenKind::Command) => parse_atom(input),
        _ => {
            let token = input.next_token()?;
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: "a superscript or subscript",
                found: token.lexeme.to_string(),
            }))
        },
    })
}

/// Parses a single operand: a number, a symbol, a group or a command.
pub(crate) fn parse_atom(input: &mut LatexParser) -> Result<Expr, Error> {
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Number => Ok(number(&token)),
        TokenKind::Letter => parse_letter(input, token),
        TokenKind::OpenParen => parse_paren_group(input, token, TokenKind::CloseParen, "`)`"),
        TokenKind::OpenBracket => parse_paren_group(input, token, TokenKind::CloseBracket, "`]`"),
        TokenKind::OpenBrace => parse_brace_group(input, token),
        TokenKind::Command => command::parse_command(input, token),
        _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: "an expression",
            found: token.lexeme.to_string(),
        })),
    }
}

/// Parses the inside of a visible group, such as `(x + 1)`, after its opening token.
pub(crate) fn parse_paren_group(
    input: &mut LatexParser,
    open: Token<TokenKind>,
    close: TokenKind,
    closer: &'static str,
) -> Result<Expr, Error> {
    let expr = parse_expr(input)?;
    let end = expect_closer(input, &open, close, closer)?;
    Ok(Expr::Paren(Paren {
        expr: Box::new(expr),
        span: open.span.start..end,
    }))
}

/// Parses the inside of a brace group after its opening brace. Braces only group in LaTeX, so
/// the inner expression is returned directly.
pub(crate) fn parse_brace_group(input: &mut LatexParser, open: Token<TokenKind>) -> Result<Expr, Error> {
    let expr = parse_expr(input)?;
    expect_closer(input, &open, TokenKind::CloseBrace, "`}`")?;
    Ok(expr)
}

/// Consumes the token closing a group, returning where it ends. Anything else is reported as an
/// unclosed group, pointing at the opening token.
pub(crate) fn expect_closer(
    input: &mut LatexParser,
    open: &Token<TokenKind>,
    close: TokenKind,
    closer: &'static str,
) -> Result<usize, Error> {
    match input.eat(close) {
        Some(token) => Ok(token.span.end),
        None => Err(Error::new(vec![open.span.clone()], kind::UnclosedGroup { closer })),
    }
}

/// Parses a letter and its optional subscript, such as `x_1` or `a_{10}`.
fn parse_letter(input: &mut LatexParser, token: Token<TokenKind>) -> Result<Expr, Error> {
    if input.next_is(TokenKind::Underscore) {
        let (subscript, end) = parse_subscript_name(input)?;
        Ok(Expr::Literal(Literal::Symbol(LitSym {
            name: format!("{}_{}", token.lexeme, subscript),
            span: token.span.start..end,
        })))
    } else {
        Ok(letter(&token))
    }
}

/// Parses a subscript made of letters and digits, returning its text and where it ends.
fn parse_subscript_name(input: &mut LatexParser) -> Result<(String, usize), Error> {
    input.expect(TokenKind::Underscore, "`_`")?;
    let token = input.next_token()?;
    match token.kind {
        TokenKind::Number | TokenKind::Letter => Ok((token.lexeme.to_string(), token.span.end)),
        TokenKind::OpenBrace => {
            let mut name = String::new();
            loop {
                let part = input.next_token()?;
                match part.kind {
                    TokenKind::Number | TokenKind::Letter => name.push_str(part.lexeme),
                    TokenKind::CloseBrace if !name.is_empty() => return Ok((name, part.span.end)),
                    _ => return Err(Error::new(vec![part.span], kind::UnexpectedToken {
                        expected: "letters or digits in a subscript",
                        found: part.lexeme.to_string(),
                    })),
                }
            }
        },
        _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: "a subscript",
            found: token.lexeme.to_string(),
        })),
    }
}

/// Returns the kind of explicit multiplicative operator coming next, if any.
fn peek_explicit_product(input: &LatexParser) -> Option<BinOpKind> {
    let token = input.peek_token()?;
    match token.kind {
        TokenKind::Mul => Some(BinOpKind::Mul),
        TokenKind::Div => Some(BinOpKind::Div),
        TokenKind::Command => match token.lexeme {
            r"\cdot" | r"\times" => Some(BinOpKind::Mul),
            r"\div" => Some(BinOpKind::Div),
            _ => None,
        },
        _ => None,
    }
}

/// Returns true if the next token can start the right operand of an implicit multiplication.
pub(crate) fn starts_implicit_operand(input: &mut LatexParser) -> bool {
    if input.state().in_integrand && input.lookahead(calculus::parse_differential) {
        return false;
    }

    match input.peek_token() {
        Some(token) => match token.kind {
            TokenKind::Number
                | TokenKind::Letter
                | TokenKind::OpenParen
                | TokenKind::OpenBracket
                | TokenKind::OpenBrace => true,
            TokenKind::Command => !matches!(
                token.lexeme,
                r"\cdot" | r"\times" | r"\div" | r"\right"
            ),
            _ => false,
        },
        None => false,
    }
}

/// Creates a number literal from a token.
fn number(token: &Token<TokenKind>) -> Expr {
    Expr::Literal(Literal::Number(LitNum {
        value: token.lexeme.to_string(),
        span: token.span.clone(),
    }))
}

/// Creates a symbol from a single-letter token. `e` is Euler's number.
fn letter(token: &Token<TokenKind>) -> Expr {
    if token.lexeme == "e" {
        Expr::Literal(Literal::Constant(LitConst {
            constant: Constant::E,
            span: token.span.clone(),
        }))
    } else {
        Expr::Literal(Literal::Symbol(LitSym {
            name: token.lexeme.to_string(),
            span: token.span.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use crate::parse_latex;

    /// Parses the input and formats the tree in plain notation.
    fn display(input: &str) -> String {
        parse_latex(input).unwrap().to_string()
    }

    /// Parses the input, which must fail, and returns the error message.
    fn error(input: &str) -> String {
        parse_latex(input).unwrap_err().to_string()
    }

    #[test]
    fn literal_number() {
        let expr = parse_latex("16").unwrap();

        assert_eq!(expr, Expr::Literal(Literal::Number(LitNum {
            value: "16".to_string(),
            span: 0..2,
        })));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse_latex("2x").unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Literal(Literal::Number(LitNum {
                value: "2".to_string(),
                span: 0..1,
            }))),
            op: BinOp::implicit_mul(1..1),
            rhs: Box::new(Expr::Literal(Literal::Symbol(LitSym {
                name: "x".to_string(),
                span: 1..2,
            }))),
            span: 0..2,
        }));
    }

    #[test]
    fn operators_and_groups() {
        assert_eq!(display(r"3 \cdot 4 \div 2"), "3*4/2");
        assert_eq!(display("-x^2"), "-x**2");
        assert_eq!(display(r"\left( x + 1 \right)^2"), "(x + 1)**2");
        assert_eq!(display(r"2\pi r"), "2*pi*r");
        assert_eq!(display(r"e^{2x}"), "E**(2*x)");
        assert_eq!(display(r"x_1 + a_{10}"), "x_1 + a_10");
        assert_eq!(display(r"\theta"), "theta");
        assert_eq!(display(r"\frac12"), "1/2");
        assert_eq!(display(r"\frac{x+1}{x-1}"), "(x + 1)/(x - 1)");
    }

    #[test]
    fn functions() {
        assert_eq!(display(r"\sin^2 x"), "sin(x)**2");
        assert_eq!(display(r"\sin^{-1} x"), "asin(x)");
        assert_eq!(display(r"\ln(x+1)"), "log(x + 1)");
        assert_eq!(display(r"\log_2 x"), "log(x, 2)");
        assert_eq!(display(r"\sin 2x"), "sin(2*x)");
        assert_eq!(display(r"\cos(x)^2"), "cos(x)**2");
        assert_eq!(display(r"\sqrt{x}"), "sqrt(x)");
        assert_eq!(display(r"\sqrt[3]{x}"), "root(x, 3)");
        assert_eq!(display(r"\arctan x"), "atan(x)");
    }

    #[test]
    fn derivative_operator() {
        let expr = parse_latex(r"\frac{d}{dx} x^2").unwrap();
        assert_eq!(expr.span(), 0..16);
        assert_eq!(expr.to_string(), "Derivative(x**2, x)");

        assert_eq!(display(r"\frac{dy}{dx}"), "Derivative(y, x)");
        assert_eq!(display(r"\frac{d}{dx} x \sin x + 1"), "Derivative(x*sin(x), x) + 1");
        assert_eq!(display(r"\dfrac{d^{2}}{d x^{2}} e^x"), "Derivative(E**x, x, 2)");
        assert_eq!(display(r"\frac{\partial}{\partial t} t^3"), "Derivative(t**3, t)");
    }

    #[test]
    fn fraction_that_is_not_a_derivative() {
        assert_eq!(display(r"\frac{dx}{x}"), "d*x/x");
        assert_eq!(display(r"\frac{d}{2}"), "d/2");
    }

    #[test]
    fn integrals() {
        assert_eq!(display(r"\int x dx"), "Integral(x, x)");
        assert_eq!(display(r"\int_0^1 x^2 \, dx"), "Integral(x**2, (x, 0, 1))");
        assert_eq!(display(r"\int^{1}_{0} 3 \, \mathrm{d}t"), "Integral(3, (t, 0, 1))");
        assert_eq!(display(r"\int dx"), "Integral(1, x)");
        assert_eq!(display(r"\int \sin x \cos x dx"), "Integral(sin(x)*cos(x), x)");
        assert_eq!(display(r"\int x y \, dy"), "Integral(x*y, y)");
        assert_eq!(display(r"\int \frac{1}{x} dx + 1"), "Integral(1/x, x) + 1");
    }

    #[test]
    fn sums() {
        assert_eq!(display(r"\sum_{n=1}^{3} n"), "Sum(n, (n, 1, 3))");
        assert_eq!(display(r"\sum_{k=0}^\infty \frac{1}{2^k}"), "Sum(1/2**k, (k, 0, oo))");
        assert_eq!(display(r"\sum_{n=1}^{10} n^2 + 1"), "Sum(n**2, (n, 1, 10)) + 1");
    }

    #[test]
    fn calculus_errors() {
        assert_eq!(error(r"\int x^2"), "missing differential in integral");
        assert_eq!(error(r"\int_0 x dx"), "integral has only one bound");
        assert_eq!(error(r"\sum n"), "sum is missing its bounds");
        assert_eq!(error(r"\frac{d^2}{dx^3} x"), "mismatched derivative order");
    }

    #[test]
    fn unknown_command() {
        let err = parse_latex(r"\sinn x").unwrap_err();
        assert_eq!(err.to_string(), r"unknown command `\sinn`");
        assert_eq!(err.spans, vec![0..5]);
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(error(r"\frac{1}{x"), "unclosed group");
        assert_eq!(error("(x+1"), "unclosed group");
        assert_eq!(error("x )"), "expected end of input");
        assert_eq!(error(""), "unexpected end of input");
    }

    #[test]
    fn nesting_limit() {
        let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(error(&deep), "expression is nested too deeply");
        assert_eq!(error(&format!("{}x", "-".repeat(10_000))), "expression is nested too deeply");
        assert_eq!(error(&format!("{}x", r"\sqrt ".repeat(10_000))), "expression is nested too deeply");
        assert_eq!(error(&format!("{}x", r"\sin ".repeat(10_000))), "expression is nested too deeply");

        let shallow = format!("{}x{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(display(&shallow), shallow);
    }
}
