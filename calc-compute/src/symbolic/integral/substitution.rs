//! Integration by substitution, `∫f(g(x)) g'(x) dx = ∫f(u) du`.

use crate::symbolic::{
    derivative::derivative,
    expr::{Primary, SymExpr},
    simplify::simplify,
    substitute::{replace, substitute},
};
use super::integrate;

/// Collects the subexpressions of `f` that are worth trying as `u`, innermost first.
fn candidates(f: &SymExpr, var: &str) -> Vec<SymExpr> {
    let mut candidates: Vec<SymExpr> = Vec::new();
    let mut push = |expr: &SymExpr| {
        if expr.contains_symbol(var) && expr.as_symbol().is_none() && !candidates.contains(expr) {
            candidates.push(expr.clone());
        }
    };

    for expr in f.post_order_iter() {
        match expr {
            SymExpr::Primary(Primary::Call(_, args)) => {
                args.iter().for_each(&mut push);
                push(expr);
            },
            SymExpr::Exp(base, exp) => {
                push(&**base);
                push(&**exp);
                push(expr);
            },
            _ => {},
        }
    }
    candidates
}

/// Looks for a subexpression `g(x)` such that the integrand is `h(g(x)) g'(x)`, and integrates
/// `h(u)` instead.
pub(super) fn by_substitution(f: &SymExpr, var: &str, depth: usize) -> Option<SymExpr> {
    let u = format!("#u{}", depth);
    let u_symbol = SymExpr::symbol(u.as_str());

    for candidate in candidates(f, var) {
        if candidate == *f {
            continue;
        }

        let Ok(candidate_derivative) = derivative(&candidate, var) else {
            continue;
        };
        if candidate_derivative.is_zero() {
            continue;
        }

        let ratio = simplify(&(f.clone() * candidate_derivative.recip()));
        let in_u = simplify(&replace(&ratio, &candidate, &u_symbol));
        if in_u.contains_symbol(var) {
            continue;
        }

        log::trace!("substituting {} = {} in {}", u, candidate, f);
        if let Some(result) = integrate(&in_u, &u, depth + 1) {
            return Some(substitute(&result, &u, &candidate));
        }
    }

    None
}
