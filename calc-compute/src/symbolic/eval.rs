//! Numerical evaluation of expressions.

use calc_parser::ast::Constant;
use crate::error::EvalError;
use crate::symbolic::expr::{Primary, SymExpr};
use std::f64::consts;

/// Evaluates the expression to a floating-point number, using the given values for its symbols.
///
/// Odd roots of negative numbers are evaluated to real numbers, so `(-8)^(1/3)` is `-2`.
pub fn eval(expr: &SymExpr, bindings: &[(&str, f64)]) -> Result<f64, EvalError> {
    match expr {
        SymExpr::Primary(primary) => eval_primary(primary, bindings),
        SymExpr::Add(terms) => terms.iter()
            .map(|term| eval(term, bindings))
            .sum(),
        SymExpr::Mul(factors) => factors.iter()
            .map(|factor| eval(factor, bindings))
            .product(),
        SymExpr::Exp(base, exp) => {
            let base_value = eval(base, bindings)?;
            let exp_value = eval(exp, bindings)?;
            match exp.as_number() {
                Some(n) if base_value < 0.0 && *n.denom() != 1 && n.denom().is_odd() => {
                    let magnitude = (-base_value).powf(exp_value);
                    if n.numer().is_odd() {
                        Ok(-magnitude)
                    } else {
                        Ok(magnitude)
                    }
                },
                _ => Ok(base_value.powf(exp_value)),
            }
        },
    }
}

fn eval_primary(primary: &Primary, bindings: &[(&str, f64)]) -> Result<f64, EvalError> {
    match primary {
        Primary::Number(n) => Ok(n.to_f64()),
        Primary::Constant(Constant::Pi) => Ok(consts::PI),
        Primary::Constant(Constant::E) => Ok(consts::E),
        Primary::Constant(Constant::Infinity) => Ok(f64::INFINITY),
        Primary::Symbol(name) => bindings.iter()
            .find(|(symbol, _)| symbol == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| EvalError::UnboundSymbol(name.clone())),
        Primary::Call(name, args) => {
            let args = args.iter()
                .map(|arg| eval(arg, bindings))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, &args).ok_or_else(|| EvalError::UnknownFunction(name.clone()))
        },
    }
}

/// Evaluates a call to a built-in function.
fn call(name: &str, args: &[f64]) -> Option<f64> {
    let [x] = *args else {
        return None;
    };

    let value = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "sec" => x.cos().recip(),
        "csc" => x.sin().recip(),
        "cot" => x.tan().recip(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "log" => x.ln(),
        "exp" => x.exp(),
        "sqrt" => x.sqrt(),
        "abs" => x.abs(),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use calc_parser::parse_plain;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        SymExpr::try_from(parse_plain(input).unwrap()).unwrap()
    }

    #[test]
    fn polynomial() {
        let value = eval(&parse("x**2 + 5*x + 6"), &[("x", 2.0)]).unwrap();
        assert_float_absolute_eq!(value, 20.0);
    }

    #[test]
    fn functions_and_constants() {
        let value = eval(&parse("sin(pi/2) + log(E) + atan(1)"), &[]).unwrap();
        assert_float_absolute_eq!(value, 2.0 + consts::FRAC_PI_4);
    }

    #[test]
    fn odd_root_of_negative() {
        let value = eval(&parse("(-8)**(1/3)"), &[]).unwrap();
        assert_float_absolute_eq!(value, -2.0);
    }

    #[test]
    fn unbound_symbol() {
        assert_eq!(eval(&parse("x + y"), &[("x", 1.0)]), Err(EvalError::UnboundSymbol("y".to_string())));
    }
}
