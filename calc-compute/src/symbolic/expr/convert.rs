//! Conversion from the [`calc_parser`] AST into [`SymExpr`].

use calc_parser::{
    ast::{Binary, Call, Constant, Expr as AstExpr, Literal},
    parser::token::op::{BinOpKind, UnaryOpKind},
};
use crate::{
    error::ComputeError,
    primitive::rational_from_str,
    problem::{Derivative, Integral, Sum},
};
use super::SymExpr;

impl TryFrom<AstExpr> for SymExpr {
    type Error = ComputeError;

    /// Converts the AST into a [`SymExpr`], flattening sums and products.
    ///
    /// Calculus operations nested inside the expression are evaluated during conversion, so
    /// `2 \int x \, dx` becomes `x^2`.
    fn try_from(expr: AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(Literal::Number(num)) => rational_from_str(&num.value)
                .map(Self::number)
                .ok_or(ComputeError::InvalidNumber(num.value)),
            AstExpr::Literal(Literal::Symbol(sym)) => Ok(Self::symbol(sym.name)),
            AstExpr::Literal(Literal::Constant(lit)) => Ok(Self::constant(lit.constant)),
            AstExpr::Paren(paren) => Self::try_from(*paren.expr),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Ok(-Self::try_from(*unary.operand)?),
            },
            AstExpr::Binary(bin) => convert_binary(bin),
            AstExpr::Integral(integral) => Ok(Integral::try_from(integral)?.evaluate()?),
            AstExpr::Derivative(derivative) => Ok(Derivative::try_from(derivative)?.evaluate()?),
            AstExpr::Sum(sum) => Ok(Sum::try_from(sum)?.evaluate()?),
        }
    }
}

fn convert_binary(bin: Binary) -> Result<SymExpr, ComputeError> {
    let lhs = SymExpr::try_from(*bin.lhs)?;
    let rhs = SymExpr::try_from(*bin.rhs)?;
    Ok(match bin.op.kind {
        BinOpKind::Exp => SymExpr::pow(lhs, rhs),
        BinOpKind::Mul => lhs * rhs,
        BinOpKind::Div => lhs / rhs,
        BinOpKind::Add => lhs + rhs,
        BinOpKind::Sub => lhs - rhs,
    })
}

/// Converts a function call. Functions that are shorthand for powers or quotients are rewritten,
/// so that the simplifier only sees a single representation of each.
fn convert_call(call: Call) -> Result<SymExpr, ComputeError> {
    let name = call.name.name;
    let mut args = call.args.into_iter()
        .map(SymExpr::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match (name.as_str(), args.len()) {
        ("sqrt", 1) => args.remove(0).sqrt(),
        ("root", 2) => {
            let index = args.remove(1);
            SymExpr::pow(args.remove(0), index.recip())
        },
        ("exp", 1) => SymExpr::pow(SymExpr::constant(Constant::E), args.remove(0)),
        ("log", 2) => {
            let base = args.remove(1);
            SymExpr::call("log", args) / SymExpr::call("log", vec![base])
        },
        _ => SymExpr::call(name, args),
    })
}

#[cfg(test)]
mod tests {
    use calc_parser::{parse_latex, parse_plain};
    use pretty_assertions::assert_eq;
    use rug::Rational;
    use super::*;

    fn latex(input: &str) -> SymExpr {
        SymExpr::try_from(parse_latex(input).unwrap()).unwrap()
    }

    fn plain(input: &str) -> SymExpr {
        SymExpr::try_from(parse_plain(input).unwrap()).unwrap()
    }

    #[test]
    fn decimal_literal() {
        assert_eq!(plain("2.5"), SymExpr::number(Rational::from((5, 2))));
    }

    #[test]
    fn roots_become_powers() {
        assert_eq!(latex(r"\sqrt{x}"), SymExpr::symbol("x").sqrt());
        assert_eq!(
            latex(r"\sqrt[3]{x}"),
            SymExpr::pow(SymExpr::symbol("x"), SymExpr::number(Rational::from((1, 3)))),
        );
    }

    #[test]
    fn exp_becomes_power_of_e() {
        assert_eq!(plain("exp(2*x)"), plain("E**(2*x)"));
    }

    #[test]
    fn log_with_base() {
        assert_eq!(latex(r"\log_2 x"), plain("log(x)/log(2)"));
    }

    #[test]
    fn notations_agree() {
        assert_eq!(latex(r"\frac{x^{2}}{2} + \sin(x)"), plain("x**2/2 + sin(x)"));
    }
}
