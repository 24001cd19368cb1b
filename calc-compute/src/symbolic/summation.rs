//! Sums over an integer index.
//!
//! Sums with integer bounds and few enough terms are added up term by term. Otherwise, a closed
//! form is looked for:
//!
//! - summands that do not depend on the index are multiplied by the number of terms
//! - sums are split term by term, and constant factors are pulled out
//! - polynomials in the index are summed with [Faulhaber's formula]
//! - geometric summands `c^(a n + b)` are summed with the geometric series formula, which also
//!   covers an infinite upper bound when the ratio is smaller than 1 in magnitude
//!
//! [Faulhaber's formula]: https://en.wikipedia.org/wiki/Faulhaber%27s_formula

use crate::error::SumError;
use crate::latex::Latex;
use crate::symbolic::{
    derivative::derivative,
    eval::eval,
    expand::expand,
    expr::SymExpr,
    polynomial::Polynomial,
    simplify::{simplify, simplify_with, step::Step},
    step_collector::StepCollector,
    substitute::substitute,
};
use rug::{Integer, Rational};

/// Sums with more terms than this are not added up term by term.
const MAX_TERMS: u32 = 10_000;

/// If the bound is an integer, returns it.
fn integer_bound(bound: &SymExpr) -> Option<Integer> {
    bound.as_number()
        .filter(|n| *n.denom() == 1)
        .map(|n| n.numer().clone())
}

/// Adds up the summand for every index from `lower` to `upper`, inclusive.
fn term_by_term(summand: &SymExpr, var: &str, lower: Integer, upper: &Integer) -> Result<SymExpr, SumError> {
    let mut numeric = Rational::new();
    let mut sum = SymExpr::Add(Vec::new());
    let mut n = lower;
    while n <= *upper {
        let term = simplify(&substitute(summand, var, &SymExpr::number(Rational::from(&n))));
        if term.is_undefined() {
            return Err(SumError::UndefinedTerm { var: var.to_string(), index: n.to_string() });
        }

        if let Some(value) = term.as_number() {
            numeric += value;
        } else {
            sum += term;
        }
        n += 1;
    }
    Ok(sum + SymExpr::number(numeric))
}

/// Computes the Bernoulli numbers `B_0` to `B_n`, with the convention `B_1 = +1/2`.
fn bernoulli_numbers(n: usize) -> Vec<Rational> {
    let mut numbers: Vec<Rational> = Vec::with_capacity(n + 1);
    for m in 0..=n {
        if m == 0 {
            numbers.push(Rational::from(1));
            continue;
        }

        let mut total = Rational::new();
        for (j, b) in numbers.iter().enumerate() {
            total += Rational::from(Integer::from(m + 1).binomial(j as u32)) * b;
        }
        numbers.push(-total / (m as u32 + 1));
    }

    if n >= 1 {
        numbers[1] = Rational::from((1, 2));
    }
    numbers
}

/// `1^k + 2^k + ... + m^k`, as a polynomial in `m`.
fn power_sum(k: usize, m: &SymExpr, bernoulli: &[Rational]) -> SymExpr {
    let mut sum = SymExpr::Add(Vec::new());
    for (j, b) in bernoulli.iter().enumerate().take(k + 1) {
        if *b == 0 {
            continue;
        }
        let coefficient = Rational::from(Integer::from(k + 1).binomial(j as u32)) * b / (k as u32 + 1);
        let power = SymExpr::pow(m.clone(), SymExpr::integer((k + 1 - j) as i64));
        sum += SymExpr::number(coefficient) * power;
    }
    sum.downgrade()
}

/// Sums a polynomial in the index with Faulhaber's formula, `S(upper) - S(lower - 1)`.
fn faulhaber(polynomial: &Polynomial, lower: &SymExpr, upper: &SymExpr) -> SymExpr {
    let bernoulli = bernoulli_numbers(polynomial.degree());
    let before_lower = lower.clone() - SymExpr::integer(1);

    let mut sum = SymExpr::Add(Vec::new());
    for (k, c) in polynomial.coefficients().iter().enumerate() {
        if *c == 0 {
            continue;
        }
        let difference = power_sum(k, upper, &bernoulli) - power_sum(k, &before_lower, &bernoulli);
        sum += SymExpr::number(c.clone()) * difference;
    }
    sum.downgrade()
}

/// Returns true if the numeric expression is smaller than 1 in magnitude.
fn is_convergent_ratio(ratio: &SymExpr) -> bool {
    match ratio.as_number() {
        Some(r) => *r > -1 && *r < 1,
        None => eval(ratio, &[]).is_ok_and(|r| r.abs() < 1.0),
    }
}

/// Sums `base^(a n + b)` with the geometric series formula. Returns `Ok(None)` if the summand is
/// not geometric.
fn geometric(summand: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<Option<SymExpr>, SumError> {
    let SymExpr::Exp(base, exp) = summand else {
        return Ok(None);
    };
    if !base.is_numeric() {
        return Ok(None);
    }

    let slope = match derivative(exp, var) {
        Ok(slope) if slope.is_numeric() && !slope.is_zero() => slope,
        _ => return Ok(None),
    };
    let intercept = expand(&(*exp.clone() - slope.clone() * SymExpr::symbol(var)));
    if intercept.contains_symbol(var) {
        return Ok(None);
    }

    let ratio = simplify(&SymExpr::pow(*base.clone(), slope));
    if ratio.is_one() {
        return Ok(None);
    }
    let coefficient = SymExpr::pow(*base.clone(), intercept);
    let first = SymExpr::pow(ratio.clone(), lower.clone());
    let denominator = (SymExpr::integer(1) - ratio.clone()).recip();

    if upper.contains_infinity() {
        if !is_convergent_ratio(&ratio) {
            return Err(SumError::Diverges);
        }
        return Ok(Some(coefficient * first * denominator));
    }

    let after_last = SymExpr::pow(ratio, upper.clone() + SymExpr::integer(1));
    Ok(Some(coefficient * (first - after_last) * denominator))
}

/// Finds a closed form for the sum. The result is not simplified.
fn closed_form(summand: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, SumError> {
    if !summand.contains_symbol(var) {
        if upper.contains_infinity() {
            return if summand.is_zero() {
                Ok(SymExpr::integer(0))
            } else {
                Err(SumError::Diverges)
            };
        }
        return Ok(summand.clone() * (upper.clone() - lower.clone() + SymExpr::integer(1)));
    }

    match summand {
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += closed_form(term, var, lower, upper)?;
            }
            return Ok(sum.downgrade());
        },
        SymExpr::Mul(_) => {
            let (constant, dependent) = summand.split_factors(var);
            if !constant.is_one() {
                return Ok(constant * closed_form(&dependent, var, lower, upper)?);
            }
        },
        _ => {},
    }

    if let Some(polynomial) = Polynomial::from_expr(summand, var) {
        if upper.contains_infinity() {
            return Err(SumError::Diverges);
        }
        log::trace!("summing polynomial {} with Faulhaber's formula", summand);
        return Ok(faulhaber(&polynomial, lower, upper));
    }

    if let Some(result) = geometric(summand, var, lower, upper)? {
        log::trace!("summing geometric series {}", summand);
        return Ok(result);
    }

    Err(SumError::CannotEvaluate(summand.as_display().to_string()))
}

/// Computes the sum of the summand for every integer value of `var` from `lower` to `upper`,
/// inclusive.
pub fn sum(summand: &SymExpr, var: &str, lower: &SymExpr, upper: &SymExpr) -> Result<SymExpr, SumError> {
    sum_with(summand, var, lower, upper, &mut ())
}

/// Computes the sum, reporting the simplification steps to the given step collector.
///
/// A sum whose upper bound is smaller than its lower bound is empty, and equal to 0.
pub fn sum_with(
    summand: &SymExpr,
    var: &str,
    lower: &SymExpr,
    upper: &SymExpr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, SumError> {
    if lower.contains_infinity() {
        return Err(SumError::InfiniteLowerBound);
    }

    let summand = simplify_with(summand, step_collector);
    let lower = simplify_with(lower, step_collector);
    let upper = simplify_with(upper, step_collector);

    if let (Some(first), Some(last)) = (integer_bound(&lower), integer_bound(&upper)) {
        if last < first {
            return Ok(SymExpr::integer(0));
        }
        if Integer::from(&last - &first) < MAX_TERMS {
            log::trace!("summing {} term by term", summand);
            let result = term_by_term(&summand, var, first, &last)?;
            return Ok(simplify_with(&result, step_collector));
        }
    }

    let result = closed_form(&summand, var, &lower, &upper)?;
    let result = simplify_with(&expand(&result), step_collector);
    if result.is_undefined() {
        return Err(SumError::Undefined(summand.as_display().to_string()));
    }
    log::debug!("sum of {} for {} from {} to {} = {}", summand, var, lower, upper, result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        simplify(&SymExpr::try_from(parse_plain(input).unwrap()).unwrap())
    }

    fn sum_of(summand: &str, lower: &str, upper: &str) -> Result<SymExpr, SumError> {
        sum(&parse(summand), "n", &parse(lower), &parse(upper))
    }

    #[test]
    fn bernoulli() {
        let numbers = bernoulli_numbers(4);
        assert_eq!(numbers, vec![
            Rational::from(1),
            Rational::from((1, 2)),
            Rational::from((1, 6)),
            Rational::new(),
            Rational::from((-1, 30)),
        ]);
    }

    #[test]
    fn numeric_bounds() {
        assert_eq!(sum_of("n", "1", "3").unwrap(), SymExpr::integer(6));
        assert_eq!(sum_of("n**2", "1", "10").unwrap(), SymExpr::integer(385));
        assert_eq!(sum_of("1/n", "1", "4").unwrap(), parse("25/12"));
    }

    #[test]
    fn symbolic_terms() {
        assert_eq!(sum_of("x**n", "0", "2").unwrap(), parse("x**2 + x + 1"));
    }

    #[test]
    fn empty_range() {
        assert_eq!(sum_of("n", "5", "1").unwrap(), SymExpr::integer(0));
    }

    #[test]
    fn faulhaber_symbolic_bound() {
        assert_eq!(sum_of("n", "1", "m").unwrap(), parse("m**2/2 + m/2"));
        assert_eq!(sum_of("3", "1", "m").unwrap(), parse("3*m"));
        assert_eq!(sum_of("2*n + 1", "0", "m").unwrap(), parse("m**2 + 2*m + 1"));
    }

    #[test]
    fn faulhaber_large_bound() {
        assert_eq!(sum_of("n", "1", "100000").unwrap(), SymExpr::integer(5_000_050_000));
    }

    #[test]
    fn geometric_series() {
        assert_eq!(sum_of("2**n", "0", "m").unwrap(), parse("2**(m + 1) - 1"));
        assert_eq!(sum_of("(1/2)**n", "0", "oo").unwrap(), SymExpr::integer(2));
        assert_eq!(sum_of("1/2**n", "1", "oo").unwrap(), SymExpr::integer(1));
        assert_eq!(sum_of("3*(1/3)**n", "1", "oo").unwrap(), parse("3/2"));
    }

    #[test]
    fn divergent() {
        assert_eq!(sum_of("2**n", "1", "oo"), Err(SumError::Diverges));
        assert_eq!(sum_of("n", "1", "oo"), Err(SumError::Diverges));
        assert_eq!(sum_of("5", "1", "oo"), Err(SumError::Diverges));
    }

    #[test]
    fn errors() {
        assert_eq!(sum_of("n", "-oo", "0"), Err(SumError::InfiniteLowerBound));
        assert!(matches!(sum_of("sin(n)", "1", "m"), Err(SumError::CannotEvaluate(_))));
    }

    #[test]
    fn undefined_terms() {
        assert_eq!(
            sum_of("1/(n-2)", "1", "3"),
            Err(SumError::UndefinedTerm { var: "n".to_string(), index: "2".to_string() }),
        );
        assert_eq!(
            sum_of("log(n)", "0", "2").unwrap_err().to_string(),
            "the sum is undefined at n = 0",
        );
        assert_eq!(sum_of("1/(n-5)", "1", "3").unwrap(), parse("-13/12"));
        assert!(matches!(sum_of("n", "1", "1/0"), Err(SumError::Undefined(_))));
    }
}
