//! Symbolic derivatives of the built-in functions.

use crate::error::DerivativeError;
use crate::symbolic::expr::SymExpr;
use rug::Rational;
use super::{differentiate, MultBuilder};

/// `(a + b u^2)^exp`
fn quadratic_power(a: i64, b: i64, u: &SymExpr, exp: Rational) -> SymExpr {
    let squared = SymExpr::pow(u.clone(), SymExpr::integer(2));
    SymExpr::pow(
        SymExpr::integer(a) + SymExpr::integer(b) * squared,
        SymExpr::number(exp),
    )
}

/// Computes the derivative of a supported function and performs the chain rule.
pub(super) fn function_derivative(func: &str, args: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let [u] = args else {
        return Err(DerivativeError::UnsupportedFunction(func.to_string()));
    };
    let call = |name: &str| SymExpr::call(name, vec![u.clone()]);
    let squared = |expr: SymExpr| SymExpr::pow(expr, SymExpr::integer(2));

    let outer = match func {
        "sin" => call("cos"),
        "cos" => -call("sin"),
        "tan" => squared(call("tan")) + SymExpr::integer(1),
        "sec" => call("sec") * call("tan"),
        "csc" => -(call("csc") * call("cot")),
        "cot" => -(squared(call("cot")) + SymExpr::integer(1)),
        "asin" => quadratic_power(1, -1, u, Rational::from((-1, 2))),
        "acos" => -quadratic_power(1, -1, u, Rational::from((-1, 2))),
        "atan" => quadratic_power(1, 1, u, Rational::from(-1)),
        "sinh" => call("cosh"),
        "cosh" => call("sinh"),
        "tanh" => SymExpr::integer(1) - squared(call("tanh")),
        "log" => u.clone().recip(),
        _ => return Err(DerivativeError::UnsupportedFunction(func.to_string())),
    };

    let mut mult_group = MultBuilder::default();
    mult_group.mult(outer);
    mult_group.mult(differentiate(u, var)?);
    Ok(mult_group.into())
}
