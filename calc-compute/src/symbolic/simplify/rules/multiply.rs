//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::do_multiply, step::Step},
    step_collector::StepCollector,
};
use rug::Rational;

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::integer(0))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// Multiplies all numeric factors together.
///
/// `2*a*3 = 6*a`
/// `1/2*a*4 = 2*a`
pub fn fold_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().filter(|factor| factor.is_number()).count() < 2 {
            return None;
        }

        let mut product = Rational::from(1);
        let mut new_factors = Vec::with_capacity(factors.len());
        for factor in factors {
            match factor.as_number() {
                Some(n) => product *= n,
                None => new_factors.push(factor.clone()),
            }
        }
        new_factors.insert(0, SymExpr::number(product));
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::FoldNumbers);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// Combines like factors.
///
/// `a*a = a^2`
/// `a^b*a^c = a^(b+c)`
/// etc.
///
/// Bare numbers are left to [`fold_numbers`], so `2*2^(1/2)` is kept as is.
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        /// Utility function to extract the base and exponent of an expression. If the expression
        /// is not [`SymExpr::Exp`], the exponent is `1`.
        ///
        /// - `a^b` -> `(a, b)`
        /// - `a` -> `(a, 1)`
        fn get_exp(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Exp(lhs, rhs) => (*lhs.clone(), *rhs.clone()),
                expr => (expr.clone(), SymExpr::integer(1)),
            }
        }

        let mut new_factors = Vec::with_capacity(factors.len());
        let mut remaining = Vec::with_capacity(factors.len());
        for factor in factors {
            if factor.is_number() {
                new_factors.push(factor.clone());
            } else {
                remaining.push(get_exp(factor));
            }
        }

        let mut combined = false;
        while !remaining.is_empty() {
            let (base, mut exp) = remaining.swap_remove(0);

            // bases must be strictly equal
            // if they are, apply a^b*a^c = a^(b+c)
            let mut idx = 0;
            while idx < remaining.len() {
                if remaining[idx].0 == base {
                    let (_, other) = remaining.swap_remove(idx);
                    exp += other;
                    combined = true;
                } else {
                    idx += 1;
                }
            }

            if exp.is_one() {
                new_factors.push(base);
            } else {
                new_factors.push(SymExpr::pow(base, exp));
            }
        }

        if combined {
            Some(SymExpr::Mul(new_factors).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| fold_numbers(expr, step_collector))
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}
