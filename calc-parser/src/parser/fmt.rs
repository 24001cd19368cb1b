//! Formatting helpers. Every AST node displays in the plain notation, so the output of
//! formatting a LaTeX parse can be parsed again as plain input.

use std::fmt::{Display, Formatter, Result};
use super::{ast::expr::Expr, Precedence};

/// Formats an operand of an operator with the given precedence, adding parentheses if the
/// operand binds more loosely. If `strict` is set, an operand of equal precedence is also
/// parenthesized.
pub fn fmt_operand(f: &mut Formatter, operand: &Expr, precedence: Precedence, strict: bool) -> Result {
    let operand_precedence = operand.precedence();
    if operand_precedence < precedence || (strict && operand_precedence == precedence) {
        write!(f, "(")?;
        operand.fmt(f)?;
        write!(f, ")")
    } else {
        operand.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_latex, parse_plain};
    use pretty_assertions::assert_eq;

    #[test]
    fn display_implicit_product() {
        let expr = parse_latex("3x + 6").unwrap();
        assert_eq!(expr.to_string(), "3*x + 6");
    }

    #[test]
    fn display_nested_operators() {
        let expr = parse_plain("-(x + 1)**2 - (a - b)").unwrap();
        assert_eq!(expr.to_string(), "-(x + 1)**2 - (a - b)");
    }

    #[test]
    fn display_calculus() {
        let expr = parse_latex(r"\int_0^1 x^2 dx").unwrap();
        assert_eq!(expr.to_string(), "Integral(x**2, (x, 0, 1))");

        let expr = parse_latex(r"\frac{d^2}{dx^2} \sin x").unwrap();
        assert_eq!(expr.to_string(), "Derivative(sin(x), x, 2)");

        let expr = parse_latex(r"\sum_{n=1}^{3} n").unwrap();
        assert_eq!(expr.to_string(), "Sum(n, (n, 1, 3))");
    }

    #[test]
    fn display_reparses_as_plain() {
        let inputs = [
            r"\frac{x+1}{x-1}",
            r"\int e^{2x} \sin x \, dx",
            r"\frac{d}{dx} x^{-2} \cos(3x)",
            r"\sum_{k=0}^{\infty} \frac{1}{2^k}",
        ];
        for input in inputs {
            let latex = parse_latex(input).unwrap();
            let plain = parse_plain(&latex.to_string()).unwrap();
            assert_eq!(latex.to_string(), plain.to_string());
        }
    }
}
