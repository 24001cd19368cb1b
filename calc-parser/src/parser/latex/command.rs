//! LaTeX commands: fractions, roots, functions, constants and Greek letters.

use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::Call,
            expr::Expr,
            literal::{Constant, LitConst, LitNum, LitSym, Literal},
            paren::Paren,
        },
        error::{kind, Error},
        token::op::{BinOp, BinOpKind},
    },
    tokenizer::{latex::TokenKind, Token},
};
use levenshtein::levenshtein;
use super::{
    calculus,
    expect_closer,
    parse_atom,
    parse_expr,
    parse_power,
    parse_script,
    parse_superscript,
    parse_unary_operand,
    LatexParser,
};

/// The functions understood by the LaTeX parser, mapped to the name of the resulting call.
const FUNCTIONS: [(&str, &str); 17] = [
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("sec", "sec"),
    ("csc", "csc"),
    ("cot", "cot"),
    ("arcsin", "asin"),
    ("arccos", "acos"),
    ("arctan", "atan"),
    ("sinh", "sinh"),
    ("cosh", "cosh"),
    ("tanh", "tanh"),
    ("ln", "log"),
    ("log", "log"),
    ("exp", "exp"),
    ("asin", "asin"),
    ("atan", "atan"),
];

/// The Greek letters that can be used as symbols.
const GREEK_LETTERS: [&str; 31] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "rho", "sigma", "tau", "upsilon",
    "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta", "Theta", "Lambda", "Phi", "Omega",
];

/// Every other command the parser knows, used to suggest corrections for unknown commands.
const OTHER_COMMANDS: [&str; 14] = [
    "frac", "dfrac", "tfrac", "sqrt", "int", "sum", "left", "right", "pi", "infty", "cdot",
    "times", "div", "mathrm",
];

/// Returns the call name of the function with the given command name.
pub(crate) fn function_name(name: &str) -> Option<&'static str> {
    FUNCTIONS.iter()
        .find(|(command, _)| *command == name)
        .map(|(_, call)| *call)
}

/// Returns the symbol name of the Greek letter command with the given name.
pub(crate) fn greek_letter(name: &str) -> Option<&'static str> {
    GREEK_LETTERS.iter()
        .find(|letter| **letter == name)
        .copied()
}

/// Returns the inverse of a trigonometric function, for `\sin^{-1} x`.
fn inverse_function(name: &str) -> Option<&'static str> {
    match name {
        "sin" => Some("asin"),
        "cos" => Some("acos"),
        "tan" => Some("atan"),
        _ => None,
    }
}

/// Finds the known command closest to an unknown one.
fn suggest_command(name: &str) -> Option<&'static str> {
    FUNCTIONS.iter()
        .map(|(command, _)| *command)
        .chain(GREEK_LETTERS)
        .chain(OTHER_COMMANDS)
        .map(|command| (levenshtein(command, name), command))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, command)| command)
}

/// Parses the command in the given token, along with its arguments.
pub(crate) fn parse_command(input: &mut LatexParser, token: Token<TokenKind>) -> Result<Expr, Error> {
    let name = &token.lexeme[1..];
    match name {
        "frac" | "dfrac" | "tfrac" => parse_frac(input, token),
        "sqrt" => parse_sqrt(input, token),
        "int" => calculus::parse_integral(input, token),
        "sum" => calculus::parse_sum(input, token),
        "left" => parse_left(input, token),
        "mathrm" | "text" | "operatorname" => parse_text(input, token),
        "pi" => Ok(constant(Constant::Pi, &token)),
        "infty" => Ok(constant(Constant::Infinity, &token)),
        _ => {
            if let Some(function) = function_name(name) {
                parse_function(input, token, function)
            } else if let Some(letter) = greek_letter(name) {
                Ok(Expr::Literal(Literal::Symbol(LitSym {
                    name: letter.to_string(),
                    span: token.span,
                })))
            } else if matches!(name, "right" | "cdot" | "times" | "div") {
                Err(Error::new(vec![token.span], kind::UnexpectedToken {
                    expected: "an expression",
                    found: token.lexeme.to_string(),
                }))
            } else {
                Err(Error::new(vec![token.span], kind::UnknownCommand {
                    name: name.to_string(),
                    suggestion: suggest_command(name),
                }))
            }
        },
    }
}

/// Creates a constant literal from a command token.
fn constant(constant: Constant, token: &Token<TokenKind>) -> Expr {
    Expr::Literal(Literal::Constant(LitConst {
        constant,
        span: token.span.clone(),
    }))
}

/// Parses one argument of `\frac` or `\sqrt`: a braced group, or a single token.
fn parse_argument(input: &mut LatexParser) -> Result<Expr, Error> {
    match input.peek_kind() {
        Some(TokenKind::OpenBrace | TokenKind::Number | TokenKind::Letter | TokenKind::Command) => parse_script(input),
        _ => {
            let token = input.next_token()?;
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: "`{`",
                found: token.lexeme.to_string(),
            }))
        },
    }
}

/// Parses a fraction after the `\frac` command, such as `\frac{x}{2}` or `\frac12`.
fn parse_frac(input: &mut LatexParser, frac: Token<TokenKind>) -> Result<Expr, Error> {
    // `\frac12` is tokenized as a single number
    let digit_pair = input.peek_token()
        .is_some_and(|token| token.kind == TokenKind::Number && token.lexeme.len() == 2);
    if digit_pair {
        let token = input.next_token()?;
        let (numerator, denominator) = token.lexeme.split_at(1);
        let middle = token.span.start + 1;
        let numerator = Expr::Literal(Literal::Number(LitNum {
            value: numerator.to_string(),
            span: token.span.start..middle,
        }));
        let denominator = Expr::Literal(Literal::Number(LitNum {
            value: denominator.to_string(),
            span: middle..token.span.end,
        }));
        let span = frac.span.start..token.span.end;
        return Ok(Expr::Binary(Binary::with_span(
            numerator,
            BinOp::new(BinOpKind::Div, frac.span),
            denominator,
            span,
        )));
    }

    let numerator = parse_argument(input)?;
    let denominator = parse_argument(input)?;
    let span = frac.span.start..input.prev_end();
    Ok(Expr::Binary(Binary::with_span(
        numerator,
        BinOp::new(BinOpKind::Div, frac.span),
        denominator,
        span,
    )))
}

/// Parses a root after the `\sqrt` command, such as `\sqrt{x}` or `\sqrt[3]{x}`.
fn parse_sqrt(input: &mut LatexParser, sqrt: Token<TokenKind>) -> Result<Expr, Error> {
    let index = match input.eat(TokenKind::OpenBracket) {
        Some(open) => {
            let index = parse_expr(input)?;
            expect_closer(input, &open, TokenKind::CloseBracket, "`]`")?;
            Some(index)
        },
        None => None,
    };
    let radicand = parse_argument(input)?;
    let span = sqrt.span.start..input.prev_end();

    let (name, args) = match index {
        Some(index) => ("root", vec![radicand, index]),
        None => ("sqrt", vec![radicand]),
    };
    Ok(Expr::Call(Call {
        name: LitSym { name: name.to_string(), span: sqrt.span },
        args,
        span,
    }))
}

/// Parses a group delimited by `\left` and `\right`, such as `\left( x \right)`.
fn parse_left(input: &mut LatexParser, left: Token<TokenKind>) -> Result<Expr, Error> {
    let open = input.next_token()?;
    let (close, closer) = match open.kind {
        TokenKind::OpenParen => (TokenKind::CloseParen, r"`\right)`"),
        TokenKind::OpenBracket => (TokenKind::CloseBracket, r"`\right]`"),
        _ => return Err(Error::new(vec![open.span], kind::UnexpectedToken {
            expected: "`(` or `[`",
            found: open.lexeme.to_string(),
        })),
    };

    let expr = parse_expr(input)?;
    let unclosed = || Error::new(vec![left.span.start..open.span.end], kind::UnclosedGroup { closer });
    match input.next_token() {
        Ok(right) if right.lexeme == r"\right" => {},
        _ => return Err(unclosed()),
    }
    let end = match input.next_token() {
        Ok(token) if token.kind == close => token.span.end,
        _ => return Err(unclosed()),
    };

    Ok(Expr::Paren(Paren {
        expr: Box::new(expr),
        span: left.span.start..end,
    }))
}

/// Parses upright text used as a name, such as `\mathrm{x}` or `\operatorname{e}`.
fn parse_text(input: &mut LatexParser, command: Token<TokenKind>) -> Result<Expr, Error> {
    let open = input.expect(TokenKind::OpenBrace, "`{`")?;
    let mut name = String::new();
    let end = loop {
        let token = input.next_token()
            .map_err(|_| Error::new(vec![open.span.clone()], kind::UnclosedGroup { closer: "`}`" }))?;
        match token.kind {
            TokenKind::Letter | TokenKind::Number => name.push_str(token.lexeme),
            TokenKind::CloseBrace if !name.is_empty() => break token.span.end,
            _ => return Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: "a name",
                found: token.lexeme.to_string(),
            })),
        }
    };

    let span = command.span.start..end;
    if name == "e" {
        return Ok(Expr::Literal(Literal::Constant(LitConst { constant: Constant::E, span })));
    }
    if let Some(function) = function_name(&name) {
        let token = Token { span, kind: TokenKind::Command, lexeme: command.lexeme };
        return parse_function(input, token, function);
    }
    Ok(Expr::Literal(Literal::Symbol(LitSym { name, span })))
}

/// Parses a function application after the function's command, such as `\sin^2 x`, `\ln(x+1)`
/// or `\log_2 x`.
fn parse_function(input: &mut LatexParser, token: Token<TokenKind>, function: &'static str) -> Result<Expr, Error> {
    let base = if function == "log" && input.eat(TokenKind::Underscore).is_some() {
        Some(parse_script(input)?)
    } else {
        None
    };
    let power = match input.eat(TokenKind::Caret) {
        Some(caret) => Some((caret.span, parse_script(input)?)),
        None => None,
    };

    let (argument, grouped) = parse_function_argument(input)?;
    let span = token.span.start..input.prev_end();

    let inverse = match &power {
        Some((_, power)) if is_minus_one(power) => inverse_function(function),
        _ => None,
    };
    let (name, power) = match inverse {
        Some(inverse) => (inverse, None),
        None => (function, power),
    };

    let mut args = vec![argument];
    args.extend(base);
    let call = Expr::Call(Call {
        name: LitSym { name: name.to_string(), span: token.span },
        args,
        span: span.clone(),
    });

    let call = match power {
        Some((caret, power)) => Expr::Binary(Binary::with_span(
            call,
            BinOp::new(BinOpKind::Exp, caret),
            power,
            span,
        )),
        None => call,
    };

    // `\sin(x)^2` squares the function, not its argument
    if grouped {
        parse_superscript(input, call)
    } else {
        Ok(call)
    }
}

/// Parses the argument of a function, returning it along with whether it was written in
/// parentheses or braces.
///
/// A bare argument extends over a product of simple factors, so `\sin 2x` is `sin(2x)`, while
/// `\sin x \cos x` is `sin(x) cos(x)`.
fn parse_function_argument(input: &mut LatexParser) -> Result<(Expr, bool), Error> {
    let grouped = input.peek_token().is_some_and(|token| {
        matches!(token.kind, TokenKind::OpenParen | TokenKind::OpenBrace | TokenKind::OpenBracket)
            || token.lexeme == r"\left"
    });
    input.nested(|input| {
        if grouped {
            let group = parse_atom(input)?;
            Ok((unwrap_paren(group), true))
        } else {
            let mut argument = parse_unary_operand(input)?;
            while matches!(input.peek_kind(), Some(TokenKind::Number | TokenKind::Letter))
                && super::starts_implicit_operand(input)
            {
                let gap = input.prev_end()..input.span().start;
                let rhs = parse_power(input)?;
                argument = Expr::Binary(Binary::new(argument, BinOp::implicit_mul(gap), rhs));
            }
            Ok((argument, false))
        }
    })
}

/// Removes any number of enclosing parentheses.
fn unwrap_paren(expr: Expr) -> Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(*paren.expr),
        expr => expr,
    }
}

/// Returns true if the expression is the literal `-1`.
fn is_minus_one(expr: &Expr) -> bool {
    match expr.innermost() {
        Expr::Unary(unary) => matches!(
            unary.operand.innermost(),
            Expr::Literal(Literal::Number(num)) if num.value == "1"
        ),
        _ => false,
    }
}
