//! Simplification rules related to the distributive property.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};

/// `n*(a+b) = n*a + n*b`, for a numeric coefficient `n`
///
/// Only a product of exactly one number and one sum is distributed. Distributing arbitrary
/// products is left to [`expand`](crate::symbolic::expand), since it does not always make the
/// expression simpler.
pub fn distribute_coefficient(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let [lhs, rhs] = factors else {
            return None;
        };
        let (coefficient, terms) = match (lhs, rhs) {
            (SymExpr::Add(terms), coefficient) | (coefficient, SymExpr::Add(terms))
                if coefficient.is_number() => (coefficient, terms),
            _ => return None,
        };

        let new_terms = terms.iter()
            .map(|term| coefficient.clone() * term.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributeCoefficient);
    Some(opt)
}

/// Applies all distribution rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distribute_coefficient(expr, step_collector)
}
