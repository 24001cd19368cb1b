//! Symbolic integration.
//!
//! Antiderivatives are found by trying a sequence of strategies on the integrand, recursing into
//! smaller integrals where a strategy calls for it:
//!
//! - integrands that do not depend on the variable are multiplied by the variable
//! - sums are integrated term by term, and constant factors are pulled out
//! - a table of standard forms ([`rules`]) is looked up
//! - products of a polynomial with an exponential, trigonometric or logarithmic factor are
//!   integrated by parts ([`parts`])
//! - products and powers of sums are expanded
//! - a substitution `u = g(x)` is tried for every subexpression `g(x)` ([`substitution`])
//!
//! No constant of integration is added to the result.

mod parts;
mod rules;
mod substitution;

use crate::error::IntegralError;
use crate::latex::Latex;
use crate::symbolic::{
    derivative::derivative,
    expand::expand,
    expr::SymExpr,
    simplify::{simplify_with, step::Step},
    step_collector::StepCollector,
    substitute::substitute,
};

/// Strategies that recurse into new integrals give up after this many nested attempts.
const MAX_DEPTH: usize = 8;

/// If the expression is linear in the given variable, returns its slope and intercept.
///
/// `3x + 2` -> `(3, 2)`
fn linear(expr: &SymExpr, var: &str) -> Option<(SymExpr, SymExpr)> {
    let slope = derivative(expr, var).ok()?;
    if slope.contains_symbol(var) || slope.is_zero() {
        return None;
    }

    let intercept = expand(&(expr.clone() - slope.clone() * SymExpr::symbol(var)));
    if intercept.contains_symbol(var) {
        return None;
    }
    Some((slope, intercept))
}

/// Finds an antiderivative of `f` with respect to `var`. The result is not simplified.
fn integrate(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    if depth > MAX_DEPTH {
        log::trace!("giving up on {} at depth {}", f, depth);
        return None;
    }

    if !f.contains_symbol(var) {
        return Some(f.clone() * SymExpr::symbol(var));
    }

    match f {
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += integrate(term, var, depth)?;
            }
            Some(sum.downgrade())
        },
        SymExpr::Mul(_) => {
            let (constant, dependent) = f.split_factors(var);
            if !constant.is_one() {
                return integrate(&dependent, var, depth).map(|result| constant * result);
            }

            rules::table(f, var)
                .or_else(|| parts::by_parts(f, var, depth))
                .or_else(|| expanded(f, var, depth))
                .or_else(|| substitution::by_substitution(f, var, depth))
        },
        _ => rules::table(f, var)
            .or_else(|| expanded(f, var, depth))
            .or_else(|| substitution::by_substitution(f, var, depth)),
    }
}

/// Integrates the expanded form of `f`, if expanding changes it.
fn expanded(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let expanded = expand(f);
    if expanded == *f {
        return None;
    }

    log::trace!("expanding {} into {}", f, expanded);
    integrate(&expanded, var, depth + 1)
}

/// Computes an antiderivative of the given expression with respect to the given variable.
pub fn integral(f: &SymExpr, var: &str) -> Result<SymExpr, IntegralError> {
    integral_with(f, var, &mut ())
}

/// Computes an antiderivative of the given expression, reporting the simplification steps to the
/// given step collector.
pub fn integral_with(
    f: &SymExpr,
    var: &str,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, IntegralError> {
    let f = simplify_with(f, step_collector);
    if f.contains_infinity() {
        return Err(IntegralError::NoClosedForm(f.as_display().to_string()));
    }

    match integrate(&f, var, 0) {
        Some(result) => {
            let result = simplify_with(&result, step_collector);
            log::debug!("integral of {} d{} = {}", f, var, result);
            Ok(result)
        },
        None => Err(IntegralError::NoClosedForm(f.as_display().to_string())),
    }
}

/// Computes the definite integral of the given expression between the given bounds, as
/// `F(upper) - F(lower)`.
///
/// Discontinuities of the integrand between the bounds are not detected.
pub fn definite_integral_with(
    f: &SymExpr,
    var: &str,
    lower: &SymExpr,
    upper: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, IntegralError> {
    if lower.contains_infinity() || upper.contains_infinity() {
        return Err(IntegralError::InfiniteBounds);
    }

    let antiderivative = integral_with(f, var, step_collector)?;
    let upper_value = evaluate_at(&antiderivative, var, upper, step_collector)?;
    let lower_value = evaluate_at(&antiderivative, var, lower, step_collector)?;
    Ok(simplify_with(&expand(&(upper_value - lower_value)), step_collector))
}

/// Evaluates the antiderivative at one of the bounds of a definite integral.
fn evaluate_at(
    antiderivative: &SymExpr,
    var: &str,
    bound: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, IntegralError> {
    let value = simplify_with(&substitute(antiderivative, var, bound), step_collector);
    if value.is_undefined() {
        Err(IntegralError::UndefinedAtBound(bound.as_display().to_string()))
    } else {
        Ok(value)
    }
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

    /// Checks that differentiating the antiderivative gives back the integrand at the given
    /// points.
    fn test_for_function(function: &str, points: impl IntoIterator<Item = f64>) {
        let expr = parse(function);
        let antiderivative = integral(&expr, "x").unwrap();
        let recovered = derivative(&antiderivative, "x").unwrap();

        for point in points {
            let expected = eval(&expr, &[("x", point)]).unwrap();
            let actual = eval(&recovered, &[("x", point)]).unwrap();
            assert_float_absolute_eq!(expected, actual, 1e-9);
        }
    }

    #[test]
    fn power_rule() {
        assert_eq!(integral(&parse("x"), "x").unwrap(), parse("x**2/2"));
        assert_eq!(integral(&parse("3*x**2"), "x").unwrap(), parse("x**3"));
        assert_eq!(integral(&parse("1/x"), "x").unwrap(), parse("log(x)"));
        test_for_function("sqrt(x) + x**(-3)", [0.5, 1., 4.]);
        test_for_function("(2*x + 1)**5", [-1., 0., 1.]);
    }

    #[test]
    fn constants() {
        assert_eq!(integral(&parse("5"), "x").unwrap(), parse("5*x"));
        assert_eq!(integral(&parse("a*x"), "x").unwrap(), parse("a*x**2/2"));
    }

    #[test]
    fn exponentials() {
        assert_eq!(integral(&parse("E**(2*x)"), "x").unwrap(), parse("E**(2*x)/2"));
        test_for_function("2**x", [0., 1., 2.]);
    }

    #[test]
    fn trigonometric() {
        assert_eq!(integral(&parse("cos(x)"), "x").unwrap(), parse("sin(x)"));
        assert_eq!(integral(&parse("sin(3*x)"), "x").unwrap(), parse("-cos(3*x)/3"));
        assert_eq!(integral(&parse("sec(x)**2"), "x").unwrap(), parse("tan(x)"));
        assert_eq!(integral(&parse("cos(x)**(-2)"), "x").unwrap(), parse("tan(x)"));
        test_for_function("tan(x) + sec(x)**2 + sinh(x) + cosh(x) + tanh(x)", [0., 0.5, 1.]);
        test_for_function("sin(x)**2 + cos(2*x)**2", [0., 1., 2.]);
    }

    #[test]
    fn logarithm() {
        test_for_function("log(2*x + 1)", [0.5, 1., 3.]);
    }

    #[test]
    fn rational_functions() {
        test_for_function("x/(x + 1)", [0., 1., 2.]);
        test_for_function("(x**2 + 1)/(2*x - 1)", [1., 2., 3.]);
        test_for_function("1/(x**2 + 1)", [-1., 0., 2.]);
        test_for_function("(3*x + 2)/(2*x**2 + 8)", [-1., 0., 2.]);
        test_for_function("1/sqrt(4 - x**2)", [-1., 0., 1.]);
    }

    #[test]
    fn by_parts() {
        test_for_function("x*E**x", [0., 1., 2.]);
        test_for_function("x**2*sin(x)", [0., 1., 2.]);
        test_for_function("x*log(x)", [0.5, 1., 2.]);
    }

    #[test]
    fn substitution() {
        assert_eq!(integral(&parse("2*x*cos(x**2)"), "x").unwrap(), parse("sin(x**2)"));
        test_for_function("sin(x)*cos(x)", [0., 1., 2.]);
        test_for_function("x*E**(x**2)", [0., 0.5, 1.]);
        test_for_function("E**x/(E**x + 1)", [-1., 0., 1.]);
    }

    #[test]
    fn expansion() {
        test_for_function("(x + 1)*(x - 2)", [0., 1., 3.]);
    }

    #[test]
    fn no_closed_form() {
        let err = integral(&parse("E**(x**2)"), "x").unwrap_err();
        assert_eq!(err, IntegralError::NoClosedForm("e^{x^{2}}".to_string()));
        assert_eq!(err.to_string(), "no closed form found for the integral of e^{x^{2}}");
    }

    #[test]
    fn definite() {
        let mut steps = Vec::new();
        let result = definite_integral_with(&parse("x**2"), "x", &parse("0"), &parse("1"), &mut steps);
        assert_eq!(result.unwrap(), parse("1/3"));

        let result = definite_integral_with(&parse("sin(x)"), "x", &parse("0"), &parse("pi"), &mut steps);
        assert_eq!(result.unwrap(), parse("2"));

        let result = definite_integral_with(&parse("1/x"), "x", &parse("1"), &parse("E"), &mut steps);
        assert_eq!(result.unwrap(), parse("1"));
    }

    #[test]
    fn definite_errors() {
        assert_eq!(
            definite_integral_with(&parse("x"), "x", &parse("0"), &parse("oo"), &mut ()),
            Err(IntegralError::InfiniteBounds),
        );
        assert_eq!(
            definite_integral_with(&parse("1/x"), "x", &parse("0"), &parse("1"), &mut ()),
            Err(IntegralError::UndefinedAtBound("0".to_string())),
        );
    }
}
