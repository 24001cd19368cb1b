//! Simplification of expressions.
//!
//! An expression is simplified by first simplifying each of its children, then repeatedly
//! applying the [`rules`] to the expression itself until none of them apply. Each rule that is
//! applied is reported to a [`StepCollector`] as a [`Step`].

pub mod rules;
pub mod step;

use crate::symbolic::{
    expr::{Primary, SymExpr},
    step_collector::StepCollector,
};
use step::Step;

/// The maximum number of times the rules are applied to a single node. Well-behaved rules settle
/// long before this.
const MAX_PASSES: usize = 64;

/// Simplifies the given expression.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the given expression, returning the simplified expression along with the steps
/// taken to simplify it.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let expr = simplify_with(expr, &mut steps);
    (expr, steps)
}

/// Simplifies the given expression, reporting every applied rule to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let mut expr = simplify_children(expr, step_collector);
    for _ in 0..MAX_PASSES {
        match rules::all(&expr, step_collector) {
            Some(new_expr) => expr = simplify_children(&new_expr, step_collector),
            None => return expr,
        }
    }

    log::warn!("simplification of `{}` did not settle after {} passes", expr, MAX_PASSES);
    expr
}

/// Simplifies the children of the given expression, flattening nested sums and products.
fn simplify_children(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| simplify_with(arg, step_collector))
                .collect();
            SymExpr::call(name.clone(), args)
        },
        SymExpr::Primary(_) => expr.clone(),
        SymExpr::Add(terms) => {
            let mut sum = SymExpr::Add(Vec::new());
            for term in terms {
                sum += simplify_with(term, step_collector);
            }
            sum.downgrade()
        },
        SymExpr::Mul(factors) => {
            let mut product = SymExpr::Mul(Vec::new());
            for factor in factors {
                product *= simplify_with(factor, step_collector);
            }
            product.downgrade()
        },
        SymExpr::Exp(base, exp) => SymExpr::pow(
            simplify_with(base, step_collector),
            simplify_with(exp, step_collector),
        ),
    }
}

#[cfg(test)]
mod tests {
    use calc_parser::{ast::Constant, parse_plain};
    use pretty_assertions::assert_eq;
    use rug::Rational;
    use super::*;

    /// Parses and simplifies the given plain expression.
    fn simplified(input: &str) -> SymExpr {
        let expr = SymExpr::try_from(parse_plain(input).unwrap()).unwrap();
        simplify(&expr)
    }

    fn sym(name: &str) -> SymExpr {
        SymExpr::symbol(name)
    }

    fn num(n: i64, d: i64) -> SymExpr {
        SymExpr::number(Rational::from((n, d)))
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplified("x + x + x"), SymExpr::Mul(vec![SymExpr::integer(3), sym("x")]));
    }

    #[test]
    fn cancel_terms() {
        assert_eq!(simplified("2*x + 3 - 2*x - 3"), SymExpr::integer(0));
    }

    #[test]
    fn fold_numbers() {
        assert_eq!(simplified("2*3*x/4"), SymExpr::Mul(vec![num(3, 2), sym("x")]));
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(simplified("x * x**2 * y / x"), SymExpr::Mul(vec![
            SymExpr::pow(sym("x"), SymExpr::integer(2)),
            sym("y"),
        ]));
    }

    #[test]
    fn power_rules() {
        assert_eq!(simplified("x**0 + y**1"), SymExpr::Add(vec![SymExpr::integer(1), sym("y")]));
        assert_eq!(simplified("(x**2)**3"), SymExpr::pow(sym("x"), SymExpr::integer(6)));
        assert_eq!(simplified("(2*x)**2"), SymExpr::Mul(vec![
            SymExpr::integer(4),
            SymExpr::pow(sym("x"), SymExpr::integer(2)),
        ]));
    }

    #[test]
    fn rational_powers() {
        assert_eq!(simplified("4**(3/2)"), SymExpr::integer(8));
        assert_eq!(simplified("(8/27)**(1/3)"), num(2, 3));
        assert_eq!(simplified("2**-2"), num(1, 4));
        assert_eq!(simplified("8**(1/2)"), SymExpr::Mul(vec![
            SymExpr::integer(2),
            SymExpr::pow(SymExpr::integer(2), num(1, 2)),
        ]));
    }

    #[test]
    fn distribute_coefficient() {
        assert_eq!(simplified("-(x + 1)"), SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::integer(-1), sym("x")]),
            SymExpr::integer(-1),
        ]));
    }

    #[test]
    fn logarithms() {
        assert_eq!(simplified("log(1) + log(E)"), SymExpr::integer(1));
        assert_eq!(simplified("log(E**(2*x))"), SymExpr::Mul(vec![SymExpr::integer(2), sym("x")]));
        assert_eq!(simplified("E**log(x + 1)"), SymExpr::Add(vec![sym("x"), SymExpr::integer(1)]));
    }

    #[test]
    fn trigonometric_values() {
        assert_eq!(simplified("sin(pi/6)"), num(1, 2));
        assert_eq!(simplified("cos(pi)"), SymExpr::integer(-1));
        assert_eq!(simplified("tan(pi/4)"), SymExpr::integer(1));
        assert_eq!(simplified("sin(2*pi) + cos(0)"), SymExpr::integer(1));
        assert_eq!(simplified("cos(pi/4)"), SymExpr::Mul(vec![
            num(1, 2),
            SymExpr::pow(SymExpr::integer(2), num(1, 2)),
        ]));
    }

    #[test]
    fn odd_even_functions() {
        assert_eq!(simplified("sin(-x) + cos(-x)"), SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::integer(-1), SymExpr::call("sin", vec![sym("x")])]),
            SymExpr::call("cos", vec![sym("x")]),
        ]));
    }

    #[test]
    fn constants_are_kept() {
        assert_eq!(simplified("pi + pi"), SymExpr::Mul(vec![
            SymExpr::integer(2),
            SymExpr::constant(Constant::Pi),
        ]));
    }

    #[test]
    fn steps_are_recorded() {
        let expr = SymExpr::try_from(parse_plain("0 + x*1").unwrap()).unwrap();
        let (simplified, steps) = simplify_with_steps(&expr);
        assert_eq!(simplified, sym("x"));
        assert!(steps.contains(&Step::AddZero));
        assert!(steps.contains(&Step::MultiplyOne));
    }
}
