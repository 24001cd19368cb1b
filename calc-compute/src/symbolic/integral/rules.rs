//! A table of standard antiderivatives.
//!
//! Every rule in this module looks at the shape of the integrand and returns `Some(expr)` with
//! the antiderivative if the integrand matches, or `None` otherwise. Functions of a linear
//! argument `a x + b` are supported throughout, by dividing the antiderivative by `a`.

use calc_parser::ast::Constant;
use crate::symbolic::{
    expr::SymExpr,
    polynomial::Polynomial,
};
use rug::Rational;
use super::linear;

/// `x -> x^2/2`
fn symbol(f: &SymExpr, var: &str) -> Option<SymExpr> {
    if f.as_symbol() != Some(var) {
        return None;
    }

    Some(SymExpr::number(Rational::from((1, 2))) * SymExpr::pow(f.clone(), SymExpr::integer(2)))
}

/// `u^n -> u^(n+1) / ((n+1) a)`
/// `u^-1 -> log(u) / a`
fn power(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = f else {
        return None;
    };
    if exp.contains_symbol(var) {
        return None;
    }
    let (slope, _) = linear(base, var)?;

    if exp.as_number().is_some_and(|n| *n == -1) {
        return Some(SymExpr::call("log", vec![*base.clone()]) / slope);
    }

    let raised = match exp.as_number() {
        Some(n) => SymExpr::number(n.clone() + 1u32),
        None => *exp.clone() + SymExpr::integer(1),
    };
    Some(SymExpr::pow(*base.clone(), raised.clone()) / (raised * slope))
}

/// `e^u -> e^u / a`
/// `c^u -> c^u / (a log(c))`
fn exponential(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = f else {
        return None;
    };
    if base.contains_symbol(var) {
        return None;
    }
    let (slope, _) = linear(exp, var)?;

    if base.is_constant(Constant::E) {
        Some(f.clone() / slope)
    } else {
        Some(f.clone() / (slope * SymExpr::call("log", vec![*base.clone()])))
    }
}

/// Integer powers of trigonometric functions.
///
/// `sec(u)^2 = cos(u)^-2 -> tan(u) / a`
/// `csc(u)^2 = sin(u)^-2 -> -cot(u) / a`
/// `sin(u)^2 -> x/2 - sin(2u) / 4a`
/// `cos(u)^2 -> x/2 + sin(2u) / 4a`
fn trigonometric_power(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = f else {
        return None;
    };
    let n = exp.as_number()
        .filter(|n| *n.denom() == 1)?
        .numer()
        .to_i32()?;
    let (name, arg) = ["sin", "cos", "sec", "csc"].into_iter()
        .find_map(|name| match base.as_call(name) {
            Some([arg]) => Some((name, arg)),
            _ => None,
        })?;
    let (slope, _) = linear(arg, var)?;

    let call = |name: &str, arg: SymExpr| SymExpr::call(name, vec![arg]);
    let half_x = SymExpr::number(Rational::from((1, 2))) * SymExpr::symbol(var);
    let double_angle = || call("sin", SymExpr::integer(2) * arg.clone())
        / (SymExpr::integer(4) * slope.clone());

    match (name, n) {
        ("cos", -2) | ("sec", 2) => Some(call("tan", arg.clone()) / slope.clone()),
        ("sin", -2) | ("csc", 2) => Some(-call("cot", arg.clone()) / slope.clone()),
        ("sin", 2) => Some(half_x - double_angle()),
        ("cos", 2) => Some(half_x + double_angle()),
        _ => None,
    }
}

/// `(c - k x^2)^(-1/2) -> asin(x sqrt(k/c)) / sqrt(k)`, for positive `c` and `k`
fn arcsine(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let SymExpr::Exp(base, exp) = f else {
        return None;
    };
    if !exp.as_number().is_some_and(|n| *n == Rational::from((-1, 2))) {
        return None;
    }

    let quadratic = Polynomial::from_expr(base, var)?;
    if quadratic.degree() != 2 || quadratic.coefficient(1) != 0 {
        return None;
    }
    let c = quadratic.coefficient(0);
    let k = -quadratic.coefficient(2);
    if c <= 0 || k <= 0 {
        return None;
    }

    let scale = SymExpr::number(Rational::from(&k / &c)).sqrt();
    Some(
        SymExpr::call("asin", vec![scale * SymExpr::symbol(var)])
            * SymExpr::pow(SymExpr::number(k), SymExpr::number(Rational::from((-1, 2))))
    )
}

/// Functions of a linear argument.
fn function(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let (name, arg) = ["sin", "cos", "tan", "sec", "sinh", "cosh", "tanh", "log"].into_iter()
        .find_map(|name| match f.as_call(name) {
            Some([arg]) => Some((name, arg)),
            _ => None,
        })?;
    let (slope, _) = linear(arg, var)?;

    let call = |name: &str, arg: SymExpr| SymExpr::call(name, vec![arg]);
    let u = || arg.clone();
    let antiderivative = match name {
        "sin" => -call("cos", u()),
        "cos" => call("sin", u()),
        "tan" => -call("log", call("cos", u())),
        "sec" => call("log", call("sec", u()) + call("tan", u())),
        "sinh" => call("cosh", u()),
        "cosh" => call("sinh", u()),
        "tanh" => call("log", call("cosh", u())),
        "log" => u() * call("log", u()) - u(),
        _ => return None,
    };
    Some(antiderivative / slope)
}

/// Rational functions whose denominator is linear, or a quadratic `a x^2 + c` with positive `a`
/// and `c`. The numerator is divided by the denominator first.
///
/// `r / (a x + b) -> r/a log(a x + b)`
/// `(p x + q) / (a x^2 + c) -> p/2a log(a x^2 + c) + q atan(x sqrt(a/c)) / sqrt(a c)`
fn rational_function(f: &SymExpr, var: &str) -> Option<SymExpr> {
    let factors = match f {
        SymExpr::Mul(factors) => factors.as_slice(),
        f => std::slice::from_ref(f),
    };

    let mut numerator = Vec::new();
    let mut denominator = None;
    for factor in factors {
        match factor {
            SymExpr::Exp(base, exp) if exp.as_number().is_some_and(|n| *n == -1) && base.contains_symbol(var) => {
                if denominator.replace(&**base).is_some() {
                    return None;
                }
            },
            factor => numerator.push(factor.clone()),
        }
    }

    let denominator = Polynomial::from_expr(denominator?, var)?;
    let numerator = Polynomial::from_expr(&SymExpr::Mul(numerator).downgrade(), var)?;
    let (quotient, remainder) = numerator.div_rem(&denominator)?;

    let log_denominator = || SymExpr::call("log", vec![denominator.to_expr(var)]);
    let mut result = antiderivative(&quotient).to_expr(var);
    match denominator.degree() {
        1 => {
            let r = remainder.coefficient(0);
            if r != 0 {
                result += SymExpr::number(r / denominator.coefficient(1)) * log_denominator();
            }
        },
        2 if denominator.coefficient(1) == 0 => {
            let (a, c) = (denominator.coefficient(2), denominator.coefficient(0));
            if a <= 0 || c <= 0 {
                return None;
            }

            let (p, q) = (remainder.coefficient(1), remainder.coefficient(0));
            if p != 0 {
                result += SymExpr::number(p / (a.clone() * 2u32)) * log_denominator();
            }
            if q != 0 {
                let scale = SymExpr::number(Rational::from(&a / &c)).sqrt();
                let norm = SymExpr::pow(
                    SymExpr::number(a * c),
                    SymExpr::number(Rational::from((-1, 2))),
                );
                result += SymExpr::number(q)
                    * SymExpr::call("atan", vec![scale * SymExpr::symbol(var)])
                    * norm;
            }
        },
        _ => return None,
    }
    Some(result)
}

/// Integrates a polynomial term by term.
fn antiderivative(polynomial: &Polynomial) -> Polynomial {
    let mut coefficients = vec![Rational::new()];
    coefficients.extend(
        polynomial.coefficients()
            .iter()
            .zip(1u32..)
            .map(|(c, k)| c.clone() / k)
    );
    Polynomial::new(coefficients)
}

/// Looks up the antiderivative of `f` in the table. The result is not simplified.
pub(super) fn table(f: &SymExpr, var: &str) -> Option<SymExpr> {
    symbol(f, var)
        .or_else(|| power(f, var))
        .or_else(|| exponential(f, var))
        .or_else(|| trigonometric_power(f, var))
        .or_else(|| arcsine(f, var))
        .or_else(|| function(f, var))
        .or_else(|| rational_function(f, var))
}
