//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Extracts the rational coefficient and the remaining factors of a term. If the term has no
/// numeric factor, the coefficient is 1.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `1/4*a*b` -> `(1/4, a*b)`
/// - `a` -> `(1, a)`
fn get_coeff(expr: &SymExpr) -> (Rational, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => (n.clone(), SymExpr::integer(1)),
        SymExpr::Mul(factors) => {
            let mut coefficient = Rational::from(1);
            let mut rest = Vec::with_capacity(factors.len());
            for factor in factors {
                match factor.as_number() {
                    Some(n) => coefficient *= n,
                    None => rest.push(factor.clone()),
                }
            }
            (coefficient, SymExpr::Mul(rest).downgrade())
        },
        _ => (Rational::from(1), expr.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// `2+3 = 5`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut remaining = terms.iter().map(get_coeff).collect::<Vec<_>>();
        let mut new_terms = Vec::with_capacity(remaining.len());

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while !remaining.is_empty() {
            let (mut coefficient, factors) = remaining.swap_remove(0);

            // look at every other term, and merge the ones with the same factors
            let mut idx = 0;
            while idx < remaining.len() {
                if remaining[idx].1 == factors {
                    let (other, _) = remaining.swap_remove(idx);
                    coefficient += other;
                } else {
                    idx += 1;
                }
            }

            if coefficient == 0 {
                continue;
            }
            if factors.is_one() {
                new_terms.push(SymExpr::number(coefficient));
            } else if coefficient == 1 {
                new_terms.push(factors);
            } else {
                new_terms.push(SymExpr::number(coefficient) * factors);
            }
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}
