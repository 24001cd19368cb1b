//! Symbolic differentiation.

mod function;

use calc_parser::ast::Constant;
use crate::error::DerivativeError;
use crate::latex::Latex;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{simplify_with, step::Step},
    step_collector::StepCollector,
};

/// Returns `true` if the given [`SymExpr`] is "clearly" zero. This is intended to clean up
/// intermediate results and is not mathematically rigorous.
fn is_trivially_zero(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 0,
        SymExpr::Add(terms) => terms.iter().all(is_trivially_zero),
        SymExpr::Mul(factors) => factors.iter().any(is_trivially_zero),
        SymExpr::Exp(base, exp) => is_trivially_zero(base) && exp.as_number().is_some_and(|n| *n > 0),
        _ => false,
    }
}

/// Returns `true` if the given [`SymExpr`] is "clearly" one. This is intended to clean up
/// intermediate results and is not mathematically rigorous.
fn is_trivially_unity(e: &SymExpr) -> bool {
    match e {
        SymExpr::Primary(Primary::Number(n)) => *n == 1,
        SymExpr::Mul(factors) => factors.iter().all(is_trivially_unity),
        SymExpr::Exp(base, exp) => exp.is_zero() || is_trivially_unity(base),
        SymExpr::Add(terms) => terms.len() == 1 && is_trivially_unity(&terms[0]),
        _ => false,
    }
}

/// Helper struct to build a product of expressions while applying basic simplification rules. If
/// any of the expressions are zero, the product is reduced to zero.
#[derive(Default)]
struct MultBuilder(Vec<SymExpr>);

impl From<MultBuilder> for SymExpr {
    fn from(value: MultBuilder) -> Self {
        SymExpr::Mul(value.0).downgrade()
    }
}

impl MultBuilder {
    fn mult(&mut self, e: SymExpr) {
        if is_trivially_zero(&e) || self.0.first().is_some_and(is_trivially_zero) {
            self.0 = vec![SymExpr::integer(0)];
            return;
        }

        if !is_trivially_unity(&e) {
            self.0.push(e)
        }
    }
}

/// Helper struct to build a sum of expressions while applying basic simplification rules. Only
/// non-zero expressions are added to the sum.
#[derive(Default)]
struct SumBuilder(Vec<SymExpr>);

impl From<SumBuilder> for SymExpr {
    fn from(value: SumBuilder) -> Self {
        SymExpr::Add(value.0).downgrade()
    }
}

impl SumBuilder {
    fn add(&mut self, e: SymExpr) {
        if !is_trivially_zero(&e) {
            self.0.push(e)
        }
    }
}

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let mut sum = SumBuilder::default();
    for term in terms {
        sum.add(differentiate(term, var)?);
    }
    Ok(sum.into())
}

/// `(f * g * h)' = f' * g * h + f * g' * h + f * g * h'`
fn product_rule(product: &[SymExpr], var: &str) -> Result<SymExpr, DerivativeError> {
    let mut outer_sum = SumBuilder::default();

    for derivative_index in 0..product.len() {
        let mut inner_mult = MultBuilder::default();
        for (term_index, term) in product.iter().enumerate() {
            if derivative_index == term_index {
                inner_mult.mult(differentiate(term, var)?);
            } else {
                inner_mult.mult(term.clone());
            }
        }

        outer_sum.add(inner_mult.into());
    }

    Ok(outer_sum.into())
}

/// Derivative of `base^exp`.
fn power_rule(base: &SymExpr, exp: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    let mut mult_group = MultBuilder::default();

    if !exp.contains_symbol(var) {
        // (f^c)' = c f^(c - 1) f'
        let reduced = match exp.as_number() {
            Some(n) => SymExpr::number(n.clone() - 1u32),
            None => exp.clone() + SymExpr::integer(-1),
        };
        mult_group.mult(exp.clone());
        mult_group.mult(SymExpr::pow(base.clone(), reduced));
        mult_group.mult(differentiate(base, var)?);
    } else if !base.contains_symbol(var) {
        // (c^g)' = c^g log(c) g'
        mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
        if !base.is_constant(Constant::E) {
            mult_group.mult(SymExpr::call("log", vec![base.clone()]));
        }
        mult_group.mult(differentiate(exp, var)?);
    } else {
        // (f^g)' = f^g (g' log(f) + g f' / f)
        let mut inner = SumBuilder::default();

        let mut log_term = MultBuilder::default();
        log_term.mult(differentiate(exp, var)?);
        log_term.mult(SymExpr::call("log", vec![base.clone()]));
        inner.add(log_term.into());

        let mut ratio_term = MultBuilder::default();
        ratio_term.mult(exp.clone());
        ratio_term.mult(differentiate(base, var)?);
        ratio_term.mult(base.clone().recip());
        inner.add(ratio_term.into());

        mult_group.mult(SymExpr::pow(base.clone(), exp.clone()));
        mult_group.mult(inner.into());
    }

    Ok(mult_group.into())
}

/// Computes the derivative of the given expression without simplifying the result.
fn differentiate(f: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    if !f.contains_symbol(var) {
        return Ok(SymExpr::integer(0));
    }

    let expr = match f {
        SymExpr::Primary(Primary::Symbol(_)) => SymExpr::integer(1),
        SymExpr::Primary(Primary::Call(name, args)) => function::function_derivative(name, args, var)?,
        SymExpr::Primary(_) => SymExpr::integer(0),
        SymExpr::Add(terms) => sum_rule(terms, var)?,
        SymExpr::Mul(factors) => product_rule(factors, var)?,
        SymExpr::Exp(base, exp) => power_rule(base, exp, var)?,
    };

    if is_trivially_zero(&expr) {
        Ok(SymExpr::integer(0))
    } else {
        Ok(expr)
    }
}

/// Computes the derivative of the given expression with respect to the given variable, and
/// simplifies the result. Returns [`Err`] if the derivative could not be symbolically computed.
pub fn derivative(f: &SymExpr, var: &str) -> Result<SymExpr, DerivativeError> {
    derivative_with(f, var, &mut ())
}

/// Computes the derivative of the given expression, reporting the simplification steps to the
/// given step collector.
pub fn derivative_with(
    f: &SymExpr,
    var: &str,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, DerivativeError> {
    if f.contains_infinity() {
        return Err(DerivativeError::Infinity);
    }

    let undefined = || DerivativeError::Undefined(f.as_display().to_string());
    if f.is_undefined() {
        return Err(undefined());
    }

    let result = simplify_with(&differentiate(f, var)?, step_collector);
    if result.is_undefined() {
        return Err(undefined());
    }
    log::debug!("d/d{} [{}] = {}", var, f, result);
    Ok(result)
}

/// Computes the derivative of the given order. The result is simplified after every
/// differentiation, which keeps higher-order derivatives small.
pub fn derivative_n(
    f: &SymExpr,
    var: &str,
    order: u32,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, DerivativeError> {
    let mut result = simplify_with(f, step_collector);
    for _ in 0..order {
        result = derivative_with(&result, var, step_collector)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use calc_parser::parse_plain;
    use crate::symbolic::{eval::eval, simplify::simplify};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        simplify(&SymExpr::try_from(parse_plain(input).unwrap()).unwrap())
    }

    fn eval_x(e: &SymExpr, x: f64) -> f64 {
        eval(e, &[("x", x)]).unwrap()
    }

    /// Performs a central finite difference to approximate the derivative of the expression.
    fn finite_difference(e: &SymExpr, x: f64) -> f64 {
        const DX: f64 = 1e-6;
        (eval_x(e, x + DX) - eval_x(e, x - DX)) / (2.0 * DX)
    }

    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        let expr = parse(function);
        let symbolic = derivative(&expr, "x").unwrap();

        for point in points {
            let symbolically_computed = eval_x(&symbolic, point);
            let numerically_computed = finite_difference(&expr, point);
            assert_float_absolute_eq!(symbolically_computed, numerically_computed, 1e-4);
        }
    }

    #[test]
    fn power_rule() {
        assert_eq!(derivative(&parse("x**2"), "x").unwrap(), parse("2*x"));
        assert_eq!(derivative(&parse("x**3"), "x").unwrap(), parse("3*x**2"));
        test_for_function("x**2 + x + 1", [0., 1., 2., 5., 8.]);
    }

    #[test]
    fn constants_vanish() {
        assert_eq!(derivative(&parse("a*y + pi"), "x").unwrap(), SymExpr::integer(0));
        assert_eq!(derivative(&parse("a*x"), "x").unwrap(), parse("a"));
    }

    #[test]
    fn chain_rule() {
        assert_eq!(derivative(&parse("sin(x**2)"), "x").unwrap(), parse("2*x*cos(x**2)"));
        test_for_function("cos(3*x + 1)", [0., 0.5, 2.]);
        test_for_function("tan(x) + sec(x) + csc(x) + cot(x)", [0.3, 1.0, 1.2]);
        test_for_function("asin(x/2) + acos(x/3) + atan(x**2)", [0., 0.5, 1.]);
        test_for_function("sinh(x) + cosh(2*x) + tanh(x)", [-1., 0., 1.]);
        test_for_function("log(x**2 + 1)", [-2., 0., 3.]);
    }

    #[test]
    fn exponentials() {
        assert_eq!(derivative(&parse("E**(2*x)"), "x").unwrap(), parse("2*E**(2*x)"));
        test_for_function("2**x", [0., 1., 3.]);
        test_for_function("x**x", [0.5, 1., 2.]);
    }

    #[test]
    fn product_and_quotient() {
        test_for_function("x**2*sin(x)", [0., 1., 2.]);
        test_for_function("(x + 1)/(x**2 + 1)", [-1., 0., 2.]);
        test_for_function("sqrt(x)*log(x)", [0.5, 1., 4.]);
    }

    #[test]
    fn higher_order() {
        let result = derivative_n(&parse("x**4"), "x", 2, &mut ()).unwrap();
        assert_eq!(result, parse("12*x**2"));
    }

    #[test]
    fn unsupported_function() {
        assert_eq!(
            derivative(&parse("gamma(x)"), "x"),
            Err(DerivativeError::UnsupportedFunction("gamma".to_string())),
        );
    }

    #[test]
    fn infinity() {
        assert_eq!(derivative(&parse("oo*x"), "x"), Err(DerivativeError::Infinity));
    }

    #[test]
    fn undefined() {
        assert!(matches!(derivative(&parse("x/0"), "x"), Err(DerivativeError::Undefined(_))));
        assert!(matches!(derivative(&parse("log(0)*x"), "x"), Err(DerivativeError::Undefined(_))));
        assert_eq!(derivative(&parse("x/2"), "x").unwrap(), parse("1/2"));
    }
}
