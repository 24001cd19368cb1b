//! Expansion of products of sums.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{simplify_with, step::Step},
    step_collector::StepCollector,
};

/// Powers of sums with larger exponents are not expanded.
const MAX_POWER: u32 = 32;

/// Products that would have more terms than this are not expanded.
const MAX_TERMS: usize = 4096;

/// Expands products of sums and positive integer powers of sums, then simplifies the result.
///
/// `(x + 1)^2` -> `x^2 + 2x + 1`
pub fn expand(expr: &SymExpr) -> SymExpr {
    expand_with(expr, &mut ())
}

/// Expands the given expression, reporting every simplification step to the given step
/// collector.
pub fn expand_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let expr = simplify_with(expr, step_collector);
    let expanded = expand_node(&expr, step_collector);
    simplify_with(&expanded, step_collector)
}

/// Returns the terms of the expression, treating anything that is not a sum as a single term.
fn terms(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Add(terms) => terms,
        expr => std::slice::from_ref(expr),
    }
}

/// Multiplies two expressions, distributing each term of one over each term of the other.
fn multiply_out(lhs: &SymExpr, rhs: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let (lhs_terms, rhs_terms) = (terms(lhs), terms(rhs));
    if lhs_terms.len() * rhs_terms.len() > MAX_TERMS {
        return lhs.clone() * rhs.clone();
    }

    let mut sum = SymExpr::Add(Vec::new());
    for lhs_term in lhs_terms {
        for rhs_term in rhs_terms {
            sum += lhs_term.clone() * rhs_term.clone();
        }
    }
    simplify_with(&sum.downgrade(), step_collector)
}

fn expand_node(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    match expr {
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += expand_node(term, step_collector);
            }
            sum.downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut product = SymExpr::integer(1);
            for factor in factors {
                let factor = expand_node(factor, step_collector);
                product = multiply_out(&product, &factor, step_collector);
            }
            product
        },
        SymExpr::Exp(base, exp) => {
            let base = expand_node(base, step_collector);
            let power = exp.as_number()
                .filter(|n| *n.denom() == 1)
                .and_then(|n| n.numer().to_u32())
                .filter(|n| (2..=MAX_POWER).contains(n));

            match (&base, power) {
                (SymExpr::Add(_), Some(power)) => {
                    let mut product = base.clone();
                    for _ in 1..power {
                        product = multiply_out(&product, &base, step_collector);
                    }
                    product
                },
                _ => SymExpr::pow(base, *exp.clone()),
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::parse_plain;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        SymExpr::try_from(parse_plain(input).unwrap()).unwrap()
    }

    #[test]
    fn square_of_sum() {
        assert_eq!(expand(&parse("(x + 1)**2")), parse("x**2 + 2*x + 1"));
    }

    #[test]
    fn product_of_sums() {
        assert_eq!(expand(&parse("(x + 1)*(x - 1)")), parse("x**2 - 1"));
    }

    #[test]
    fn nested_products() {
        assert_eq!(expand(&parse("2*x*(x + 3)")), parse("2*x**2 + 6*x"));
    }

    #[test]
    fn leaves_other_powers() {
        assert_eq!(expand(&parse("(x + 1)**(1/2)")), parse("(x + 1)**(1/2)"));
    }
}
